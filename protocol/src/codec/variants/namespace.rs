//! Namespace registration and alias bodies.

use bytes::{BufMut, BytesMut};

use super::read_enum;
use crate::codec::identifiers::{put_address, read_address, read_mosaic_id, read_namespace_id};
use crate::codec::primitives::count_u8;
use crate::codec::{CodecError, Reader};
use crate::identity::{NamespaceId, NetworkType};
use crate::transaction::{
    AddressAliasBody, AliasAction, MosaicAliasBody, NamespaceRegistration,
    NamespaceRegistrationBody, NamespaceRegistrationType,
};

body_codec!(
    /// Namespace registration, version 1.
    NAMESPACE_REGISTRATION: NamespaceRegistration => encode_registration, decode_registration
);

body_codec!(
    /// Address alias, version 1.
    ADDRESS_ALIAS: AddressAlias => encode_address_alias, decode_address_alias
);

body_codec!(
    /// Mosaic alias, version 1.
    MOSAIC_ALIAS: MosaicAlias => encode_mosaic_alias, decode_mosaic_alias
);

// duration or parent id u64 | id u64 | registration type u8 | name size u8 | name
fn encode_registration(
    body: &NamespaceRegistrationBody,
    _network: NetworkType,
    out: &mut BytesMut,
) -> Result<(), CodecError> {
    let name_size = count_u8("namespace name", body.name.len())?;
    let slot = match body.registration {
        NamespaceRegistration::Root { duration } => duration,
        NamespaceRegistration::Child { parent_id } => parent_id.id(),
    };
    out.put_u64_le(slot);
    out.put_u64_le(body.namespace_id.id());
    out.put_u8(body.registration.registration_type().value());
    out.put_u8(name_size);
    out.put_slice(body.name.as_bytes());
    Ok(())
}

fn decode_registration(
    reader: &mut Reader<'_>,
    _network: NetworkType,
) -> Result<NamespaceRegistrationBody, CodecError> {
    let slot = reader.u64("duration or parent id")?;
    let namespace_id = read_namespace_id(reader, "namespace id")?;
    let registration = match read_enum(reader, "registration type", NamespaceRegistrationType::from_value)? {
        NamespaceRegistrationType::Root => NamespaceRegistration::Root { duration: slot },
        NamespaceRegistrationType::Child => NamespaceRegistration::Child {
            parent_id: NamespaceId::new(slot)?,
        },
    };
    let name_size = reader.u8("name size")?;
    let name = std::str::from_utf8(reader.bytes("namespace name", usize::from(name_size))?)
        .map_err(|e| CodecError::Malformed(format!("namespace name is not UTF-8: {e}")))?
        .to_string();
    Ok(NamespaceRegistrationBody {
        registration,
        namespace_id,
        name,
    })
}

fn encode_address_alias(
    body: &AddressAliasBody,
    _network: NetworkType,
    out: &mut BytesMut,
) -> Result<(), CodecError> {
    out.put_u64_le(body.namespace_id.id());
    put_address(out, &body.address);
    out.put_u8(body.action.value());
    Ok(())
}

fn decode_address_alias(
    reader: &mut Reader<'_>,
    _network: NetworkType,
) -> Result<AddressAliasBody, CodecError> {
    Ok(AddressAliasBody {
        namespace_id: read_namespace_id(reader, "namespace id")?,
        address: read_address(reader, "aliased address")?,
        action: read_enum(reader, "alias action", AliasAction::from_value)?,
    })
}

fn encode_mosaic_alias(
    body: &MosaicAliasBody,
    _network: NetworkType,
    out: &mut BytesMut,
) -> Result<(), CodecError> {
    out.put_u64_le(body.namespace_id.id());
    out.put_u64_le(body.mosaic_id.id());
    out.put_u8(body.action.value());
    Ok(())
}

fn decode_mosaic_alias(
    reader: &mut Reader<'_>,
    _network: NetworkType,
) -> Result<MosaicAliasBody, CodecError> {
    Ok(MosaicAliasBody {
        namespace_id: read_namespace_id(reader, "namespace id")?,
        mosaic_id: read_mosaic_id(reader, "aliased mosaic id")?,
        action: read_enum(reader, "alias action", AliasAction::from_value)?,
    })
}
