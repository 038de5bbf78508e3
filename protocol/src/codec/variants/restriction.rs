//! Account and mosaic restriction bodies.
//!
//! The three account restriction kinds share a header:
//!
//! ```text
//! flags u16 | additions u8 | deletions u8 | reserved u32 | additions | deletions
//! ```
//!
//! and differ only in the element type. The flags must target the body's own
//! kind; that is checked both ways.

use bytes::{BufMut, BytesMut};

use super::{read_enum, read_list};
use crate::codec::identifiers::{
    put_unresolved_address, put_unresolved_mosaic_id, read_unresolved_address,
    read_unresolved_mosaic_id,
};
use crate::codec::primitives::count_u8;
use crate::codec::{CodecError, Reader};
use crate::identity::NetworkType;
use crate::transaction::{
    AccountAddressRestrictionBody, AccountMosaicRestrictionBody, AccountOperationRestrictionBody,
    AccountRestrictionFlags, MosaicAddressRestrictionBody, MosaicGlobalRestrictionBody,
    MosaicRestrictionType, RestrictionTarget, TransactionType,
};

body_codec!(
    /// Account address restriction, version 1.
    ACCOUNT_ADDRESS_RESTRICTION: AccountAddressRestriction => encode_account_address, decode_account_address
);

body_codec!(
    /// Account mosaic restriction, version 1.
    ACCOUNT_MOSAIC_RESTRICTION: AccountMosaicRestriction => encode_account_mosaic, decode_account_mosaic
);

body_codec!(
    /// Account operation restriction, version 1.
    ACCOUNT_OPERATION_RESTRICTION: AccountOperationRestriction => encode_account_operation, decode_account_operation
);

body_codec!(
    /// Mosaic address restriction, version 1.
    MOSAIC_ADDRESS_RESTRICTION: MosaicAddressRestriction => encode_mosaic_address, decode_mosaic_address
);

body_codec!(
    /// Mosaic global restriction, version 1.
    MOSAIC_GLOBAL_RESTRICTION: MosaicGlobalRestriction => encode_mosaic_global, decode_mosaic_global
);

// ---------------------------------------------------------------------------
// Account restrictions
// ---------------------------------------------------------------------------

fn put_account_header(
    flags: AccountRestrictionFlags,
    target: RestrictionTarget,
    additions: usize,
    deletions: usize,
    out: &mut BytesMut,
) -> Result<(), CodecError> {
    if !flags.is_valid_for(target) {
        return Err(CodecError::Precondition(format!(
            "restriction flags 0x{:04X} do not fit a {target:?} restriction",
            flags.bits()
        )));
    }
    let additions = count_u8("restriction additions", additions)?;
    let deletions = count_u8("restriction deletions", deletions)?;
    out.put_u16_le(flags.bits());
    out.put_u8(additions);
    out.put_u8(deletions);
    out.put_u32_le(0);
    Ok(())
}

/// Flags and the two list lengths.
fn read_account_header(
    reader: &mut Reader<'_>,
    target: RestrictionTarget,
) -> Result<(AccountRestrictionFlags, u8, u8), CodecError> {
    let raw = reader.u16("restriction flags")?;
    let flags = AccountRestrictionFlags::from_bits(raw)
        .filter(|flags| flags.is_valid_for(target))
        .ok_or_else(|| {
            CodecError::Malformed(format!("restriction flags 0x{raw:04X} invalid for {target:?}"))
        })?;
    let additions = reader.u8("additions count")?;
    let deletions = reader.u8("deletions count")?;
    reader.reserved_u32("restriction reserved")?;
    Ok((flags, additions, deletions))
}

fn encode_account_address(
    body: &AccountAddressRestrictionBody,
    network: NetworkType,
    out: &mut BytesMut,
) -> Result<(), CodecError> {
    put_account_header(
        body.flags,
        RestrictionTarget::Address,
        body.additions.len(),
        body.deletions.len(),
        out,
    )?;
    for address in body.additions.iter().chain(&body.deletions) {
        put_unresolved_address(out, address, network);
    }
    Ok(())
}

fn decode_account_address(
    reader: &mut Reader<'_>,
    network: NetworkType,
) -> Result<AccountAddressRestrictionBody, CodecError> {
    let (flags, additions, deletions) = read_account_header(reader, RestrictionTarget::Address)?;
    Ok(AccountAddressRestrictionBody {
        flags,
        additions: read_list(additions, || read_unresolved_address(reader, "restricted address", network))?,
        deletions: read_list(deletions, || read_unresolved_address(reader, "restricted address", network))?,
    })
}

fn encode_account_mosaic(
    body: &AccountMosaicRestrictionBody,
    _network: NetworkType,
    out: &mut BytesMut,
) -> Result<(), CodecError> {
    put_account_header(
        body.flags,
        RestrictionTarget::Mosaic,
        body.additions.len(),
        body.deletions.len(),
        out,
    )?;
    for id in body.additions.iter().chain(&body.deletions) {
        put_unresolved_mosaic_id(out, *id);
    }
    Ok(())
}

fn decode_account_mosaic(
    reader: &mut Reader<'_>,
    _network: NetworkType,
) -> Result<AccountMosaicRestrictionBody, CodecError> {
    let (flags, additions, deletions) = read_account_header(reader, RestrictionTarget::Mosaic)?;
    Ok(AccountMosaicRestrictionBody {
        flags,
        additions: read_list(additions, || read_unresolved_mosaic_id(reader, "restricted mosaic"))?,
        deletions: read_list(deletions, || read_unresolved_mosaic_id(reader, "restricted mosaic"))?,
    })
}

fn encode_account_operation(
    body: &AccountOperationRestrictionBody,
    _network: NetworkType,
    out: &mut BytesMut,
) -> Result<(), CodecError> {
    put_account_header(
        body.flags,
        RestrictionTarget::Operation,
        body.additions.len(),
        body.deletions.len(),
        out,
    )?;
    for transaction_type in body.additions.iter().chain(&body.deletions) {
        out.put_u16_le(transaction_type.code());
    }
    Ok(())
}

fn read_operation(reader: &mut Reader<'_>) -> Result<TransactionType, CodecError> {
    let code = reader.u16("restricted operation")?;
    TransactionType::from_code(code)
        .ok_or_else(|| CodecError::Malformed(format!("unknown restricted operation 0x{code:04X}")))
}

fn decode_account_operation(
    reader: &mut Reader<'_>,
    _network: NetworkType,
) -> Result<AccountOperationRestrictionBody, CodecError> {
    let (flags, additions, deletions) = read_account_header(reader, RestrictionTarget::Operation)?;
    Ok(AccountOperationRestrictionBody {
        flags,
        additions: read_list(additions, || read_operation(reader))?,
        deletions: read_list(deletions, || read_operation(reader))?,
    })
}

// ---------------------------------------------------------------------------
// Mosaic restrictions
// ---------------------------------------------------------------------------

fn encode_mosaic_address(
    body: &MosaicAddressRestrictionBody,
    network: NetworkType,
    out: &mut BytesMut,
) -> Result<(), CodecError> {
    put_unresolved_mosaic_id(out, body.mosaic_id);
    out.put_u64_le(body.restriction_key);
    out.put_u64_le(body.previous_restriction_value);
    out.put_u64_le(body.new_restriction_value);
    put_unresolved_address(out, &body.target_address, network);
    Ok(())
}

fn decode_mosaic_address(
    reader: &mut Reader<'_>,
    network: NetworkType,
) -> Result<MosaicAddressRestrictionBody, CodecError> {
    Ok(MosaicAddressRestrictionBody {
        mosaic_id: read_unresolved_mosaic_id(reader, "restricted mosaic")?,
        restriction_key: reader.u64("restriction key")?,
        previous_restriction_value: reader.u64("previous restriction value")?,
        new_restriction_value: reader.u64("new restriction value")?,
        target_address: read_unresolved_address(reader, "restriction target", network)?,
    })
}

fn encode_mosaic_global(
    body: &MosaicGlobalRestrictionBody,
    _network: NetworkType,
    out: &mut BytesMut,
) -> Result<(), CodecError> {
    put_unresolved_mosaic_id(out, body.mosaic_id);
    put_unresolved_mosaic_id(out, body.reference_mosaic_id);
    out.put_u64_le(body.restriction_key);
    out.put_u64_le(body.previous_restriction_value);
    out.put_u64_le(body.new_restriction_value);
    out.put_u8(body.previous_restriction_type.value());
    out.put_u8(body.new_restriction_type.value());
    Ok(())
}

fn decode_mosaic_global(
    reader: &mut Reader<'_>,
    _network: NetworkType,
) -> Result<MosaicGlobalRestrictionBody, CodecError> {
    Ok(MosaicGlobalRestrictionBody {
        mosaic_id: read_unresolved_mosaic_id(reader, "restricted mosaic")?,
        reference_mosaic_id: read_unresolved_mosaic_id(reader, "reference mosaic")?,
        restriction_key: reader.u64("restriction key")?,
        previous_restriction_value: reader.u64("previous restriction value")?,
        new_restriction_value: reader.u64("new restriction value")?,
        previous_restriction_type: read_enum(
            reader,
            "previous restriction type",
            MosaicRestrictionType::from_value,
        )?,
        new_restriction_type: read_enum(reader, "new restriction type", MosaicRestrictionType::from_value)?,
    })
}
