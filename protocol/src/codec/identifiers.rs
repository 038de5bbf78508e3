//! Wire forms of addresses, unresolved references and mosaics.
//!
//! An unresolved address is always 24 bytes:
//!
//! ```text
//! address:  network | key hash (20) | checksum (3)          bit 0 of byte 0 clear
//! alias:    network|0x01 | namespace id LE (8) | zero (15)  bit 0 of byte 0 set
//! ```
//!
//! Unresolved mosaic ids are plain u64s; bit 63 tells aliases apart.

use bytes::BufMut;

use super::error::CodecError;
use super::primitives::Reader;
use crate::config::{ADDRESS_DECODED_LENGTH, ALIAS_FLAG};
use crate::identity::{
    Address, AddressError, MosaicId, NamespaceId, NetworkType, UnresolvedAddress,
    UnresolvedMosaicId,
};
use crate::transaction::Mosaic;

/// Write a resolved address.
pub fn put_address(buf: &mut impl BufMut, address: &Address) {
    buf.put_slice(address.as_bytes());
}

/// Read and validate a resolved address.
pub fn read_address(reader: &mut Reader<'_>, field: &'static str) -> Result<Address, CodecError> {
    let bytes = reader.array::<ADDRESS_DECODED_LENGTH>(field)?;
    Ok(Address::from_bytes(&bytes)?)
}

/// Write an unresolved address. Aliases are tagged with `network`.
pub fn put_unresolved_address(
    buf: &mut impl BufMut,
    address: &UnresolvedAddress,
    network: NetworkType,
) {
    match address {
        UnresolvedAddress::Address(address) => put_address(buf, address),
        UnresolvedAddress::Alias(namespace_id) => buf.put_slice(&alias_bytes(*namespace_id, network)),
    }
}

/// The 24-byte alias form of `namespace_id` on `network`.
pub fn alias_bytes(namespace_id: NamespaceId, network: NetworkType) -> [u8; ADDRESS_DECODED_LENGTH] {
    let mut bytes = [0u8; ADDRESS_DECODED_LENGTH];
    bytes[0] = network.id() | ALIAS_FLAG;
    bytes[1..9].copy_from_slice(&namespace_id.id().to_le_bytes());
    bytes
}

/// Read an unresolved address written for `network`.
///
/// Aliases must carry `network | 0x01` and zero padding; anything else could
/// not be written back byte for byte.
pub fn read_unresolved_address(
    reader: &mut Reader<'_>,
    field: &'static str,
    network: NetworkType,
) -> Result<UnresolvedAddress, CodecError> {
    let bytes = reader.array::<ADDRESS_DECODED_LENGTH>(field)?;
    if bytes[0] & ALIAS_FLAG == 0 {
        return Ok(UnresolvedAddress::Address(Address::from_bytes(&bytes)?));
    }

    let expected = network.id() | ALIAS_FLAG;
    if bytes[0] != expected {
        return Err(AddressError::AliasNetworkMismatch {
            expected,
            got: bytes[0],
        }
        .into());
    }
    if bytes[9..].iter().any(|b| *b != 0) {
        return Err(AddressError::NonZeroAliasPadding.into());
    }
    let mut id = [0u8; 8];
    id.copy_from_slice(&bytes[1..9]);
    Ok(UnresolvedAddress::Alias(NamespaceId::new(u64::from_le_bytes(id))?))
}

pub fn put_unresolved_mosaic_id(buf: &mut impl BufMut, id: UnresolvedMosaicId) {
    buf.put_u64_le(id.raw());
}

pub fn read_unresolved_mosaic_id(
    reader: &mut Reader<'_>,
    field: &'static str,
) -> Result<UnresolvedMosaicId, CodecError> {
    Ok(UnresolvedMosaicId::from_raw(reader.u64(field)?))
}

pub fn read_mosaic_id(reader: &mut Reader<'_>, field: &'static str) -> Result<MosaicId, CodecError> {
    Ok(MosaicId::new(reader.u64(field)?)?)
}

pub fn read_namespace_id(
    reader: &mut Reader<'_>,
    field: &'static str,
) -> Result<NamespaceId, CodecError> {
    Ok(NamespaceId::new(reader.u64(field)?)?)
}

/// Mosaic: id then amount, 16 bytes.
pub fn put_mosaic(buf: &mut impl BufMut, mosaic: &Mosaic) {
    put_unresolved_mosaic_id(buf, mosaic.id);
    buf.put_u64_le(mosaic.amount);
}

pub fn read_mosaic(reader: &mut Reader<'_>) -> Result<Mosaic, CodecError> {
    let id = read_unresolved_mosaic_id(reader, "mosaic id")?;
    let amount = reader.u64("mosaic amount")?;
    Ok(Mosaic { id, amount })
}
