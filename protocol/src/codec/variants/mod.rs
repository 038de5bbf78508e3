//! One codec per transaction kind.
//!
//! Each file writes typed `encode_*` / `decode_*` pairs over its body struct
//! and declares a `static` [`VariantCodec`] with [`body_codec!`], which
//! handles wrapping and unwrapping the [`EmbeddableBody`] variant. Bodies are
//! written without their envelope; the decode side is always handed a reader
//! bounded to exactly the body bytes.
//!
//! [`EmbeddableBody`]: crate::transaction::EmbeddableBody

use super::registry::VariantCodec;
use crate::transaction::AggregateKind;

/// Declares `pub static $name: VariantCodec` for the `$variant` body kind.
macro_rules! body_codec {
    ($(#[$meta:meta])* $name:ident: $variant:ident => $encode:ident, $decode:ident) => {
        $(#[$meta])*
        pub static $name: $crate::codec::VariantCodec = {
            fn encode(
                body: &$crate::transaction::EmbeddableBody,
                network: $crate::identity::NetworkType,
                out: &mut ::bytes::BytesMut,
            ) -> Result<(), $crate::codec::CodecError> {
                match body {
                    $crate::transaction::EmbeddableBody::$variant(body) => $encode(body, network, out),
                    other => Err($crate::codec::CodecError::body_mismatch(
                        $crate::transaction::TransactionType::$variant,
                        other.transaction_type(),
                    )),
                }
            }

            fn decode(
                reader: &mut $crate::codec::Reader<'_>,
                network: $crate::identity::NetworkType,
            ) -> Result<$crate::transaction::EmbeddableBody, $crate::codec::CodecError> {
                $decode(reader, network).map($crate::transaction::EmbeddableBody::$variant)
            }

            $crate::codec::VariantCodec::Body($crate::codec::BodyCodec::new(
                $crate::transaction::TransactionType::$variant,
                encode,
                decode,
            ))
        };
    };
}

pub mod key_link;
pub mod lock;
pub mod metadata;
pub mod mosaic;
pub mod multisig;
pub mod namespace;
pub mod restriction;
pub mod transfer;

pub use key_link::{ACCOUNT_KEY_LINK, NODE_KEY_LINK, VOTING_KEY_LINK, VRF_KEY_LINK};
pub use lock::{HASH_LOCK, SECRET_LOCK, SECRET_PROOF};
pub use metadata::{ACCOUNT_METADATA, MOSAIC_METADATA, NAMESPACE_METADATA};
pub use mosaic::{MOSAIC_DEFINITION, MOSAIC_SUPPLY_CHANGE};
pub use multisig::MULTISIG_ACCOUNT_MODIFICATION;
pub use namespace::{ADDRESS_ALIAS, MOSAIC_ALIAS, NAMESPACE_REGISTRATION};
pub use restriction::{
    ACCOUNT_ADDRESS_RESTRICTION, ACCOUNT_MOSAIC_RESTRICTION, ACCOUNT_OPERATION_RESTRICTION,
    MOSAIC_ADDRESS_RESTRICTION, MOSAIC_GLOBAL_RESTRICTION,
};
pub use transfer::TRANSFER;

/// Aggregate complete. Its body is handled by the aggregate codec.
pub static AGGREGATE_COMPLETE: VariantCodec = VariantCodec::Aggregate(AggregateKind::Complete);

/// Aggregate bonded. Its body is handled by the aggregate codec.
pub static AGGREGATE_BONDED: VariantCodec = VariantCodec::Aggregate(AggregateKind::Bonded);

/// Every (codec, version) pair in the standard registry.
pub(crate) static ALL: [(&VariantCodec, u8); 26] = [
    (&TRANSFER, 1),
    (&MOSAIC_DEFINITION, 1),
    (&MOSAIC_SUPPLY_CHANGE, 1),
    (&NAMESPACE_REGISTRATION, 1),
    (&ADDRESS_ALIAS, 1),
    (&MOSAIC_ALIAS, 1),
    (&ACCOUNT_KEY_LINK, 1),
    (&NODE_KEY_LINK, 1),
    (&VRF_KEY_LINK, 1),
    (&VOTING_KEY_LINK, 1),
    (&ACCOUNT_METADATA, 1),
    (&MOSAIC_METADATA, 1),
    (&NAMESPACE_METADATA, 1),
    (&HASH_LOCK, 1),
    (&SECRET_LOCK, 1),
    (&SECRET_PROOF, 1),
    (&MULTISIG_ACCOUNT_MODIFICATION, 1),
    (&ACCOUNT_ADDRESS_RESTRICTION, 1),
    (&ACCOUNT_MOSAIC_RESTRICTION, 1),
    (&ACCOUNT_OPERATION_RESTRICTION, 1),
    (&MOSAIC_ADDRESS_RESTRICTION, 1),
    (&MOSAIC_GLOBAL_RESTRICTION, 1),
    // Version 1 aggregates decode with the same layout.
    (&AGGREGATE_COMPLETE, 1),
    (&AGGREGATE_COMPLETE, 2),
    (&AGGREGATE_BONDED, 1),
    (&AGGREGATE_BONDED, 2),
];

/// Read a one-byte enumeration, rejecting values outside it.
pub(crate) fn read_enum<T>(
    reader: &mut super::Reader<'_>,
    field: &'static str,
    from_value: fn(u8) -> Option<T>,
) -> Result<T, super::CodecError> {
    let value = reader.u8(field)?;
    from_value(value)
        .ok_or_else(|| super::CodecError::Malformed(format!("unknown {field} value {value}")))
}

/// Read `count` items with `read_one`.
pub(crate) fn read_list<T>(
    count: u8,
    mut read_one: impl FnMut() -> Result<T, super::CodecError>,
) -> Result<Vec<T>, super::CodecError> {
    (0..count).map(|_| read_one()).collect()
}
