//! Metadata bodies.
//!
//! All three share a prefix (target address, scoped key) and a suffix
//! (size delta, value size, value). Mosaic and namespace metadata put the
//! target id between them.

use bytes::{BufMut, BytesMut};

use crate::codec::identifiers::{
    put_unresolved_address, put_unresolved_mosaic_id, read_namespace_id, read_unresolved_address,
    read_unresolved_mosaic_id,
};
use crate::codec::primitives::len_u16;
use crate::codec::{CodecError, Reader};
use crate::identity::{NetworkType, UnresolvedAddress};
use crate::transaction::{AccountMetadataBody, MetadataEntry, MosaicMetadataBody, NamespaceMetadataBody};

body_codec!(
    /// Account metadata, version 1.
    ACCOUNT_METADATA: AccountMetadata => encode_account, decode_account
);

body_codec!(
    /// Mosaic metadata, version 1.
    MOSAIC_METADATA: MosaicMetadata => encode_mosaic, decode_mosaic
);

body_codec!(
    /// Namespace metadata, version 1.
    NAMESPACE_METADATA: NamespaceMetadata => encode_namespace, decode_namespace
);

fn put_head(entry: &MetadataEntry, network: NetworkType, out: &mut BytesMut) {
    put_unresolved_address(out, &entry.target_address, network);
    out.put_u64_le(entry.scoped_key);
}

fn put_tail(entry: &MetadataEntry, out: &mut BytesMut) -> Result<(), CodecError> {
    let value_size = len_u16("metadata value", entry.value.len())?;
    out.put_i16_le(entry.value_size_delta);
    out.put_u16_le(value_size);
    out.put_slice(&entry.value);
    Ok(())
}

fn read_head(reader: &mut Reader<'_>, network: NetworkType) -> Result<(UnresolvedAddress, u64), CodecError> {
    Ok((
        read_unresolved_address(reader, "metadata target", network)?,
        reader.u64("scoped metadata key")?,
    ))
}

fn read_tail(
    reader: &mut Reader<'_>,
    (target_address, scoped_key): (UnresolvedAddress, u64),
) -> Result<MetadataEntry, CodecError> {
    let value_size_delta = reader.i16("value size delta")?;
    let value_size = reader.u16("value size")?;
    let value = reader.bytes("metadata value", usize::from(value_size))?.to_vec();
    Ok(MetadataEntry {
        target_address,
        scoped_key,
        value_size_delta,
        value,
    })
}

fn encode_account(
    body: &AccountMetadataBody,
    network: NetworkType,
    out: &mut BytesMut,
) -> Result<(), CodecError> {
    put_head(&body.entry, network, out);
    put_tail(&body.entry, out)
}

fn decode_account(reader: &mut Reader<'_>, network: NetworkType) -> Result<AccountMetadataBody, CodecError> {
    let head = read_head(reader, network)?;
    Ok(AccountMetadataBody {
        entry: read_tail(reader, head)?,
    })
}

fn encode_mosaic(
    body: &MosaicMetadataBody,
    network: NetworkType,
    out: &mut BytesMut,
) -> Result<(), CodecError> {
    put_head(&body.entry, network, out);
    put_unresolved_mosaic_id(out, body.target_mosaic_id);
    put_tail(&body.entry, out)
}

fn decode_mosaic(reader: &mut Reader<'_>, network: NetworkType) -> Result<MosaicMetadataBody, CodecError> {
    let head = read_head(reader, network)?;
    let target_mosaic_id = read_unresolved_mosaic_id(reader, "target mosaic id")?;
    Ok(MosaicMetadataBody {
        entry: read_tail(reader, head)?,
        target_mosaic_id,
    })
}

fn encode_namespace(
    body: &NamespaceMetadataBody,
    network: NetworkType,
    out: &mut BytesMut,
) -> Result<(), CodecError> {
    put_head(&body.entry, network, out);
    out.put_u64_le(body.target_namespace_id.id());
    put_tail(&body.entry, out)
}

fn decode_namespace(
    reader: &mut Reader<'_>,
    network: NetworkType,
) -> Result<NamespaceMetadataBody, CodecError> {
    let head = read_head(reader, network)?;
    let target_namespace_id = read_namespace_id(reader, "target namespace id")?;
    Ok(NamespaceMetadataBody {
        entry: read_tail(reader, head)?,
        target_namespace_id,
    })
}
