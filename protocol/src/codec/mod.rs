//! # Codec Module
//!
//! Byte-exact conversion between [`Transaction`] values and the binary
//! payloads nodes accept.
//!
//! ## Architecture
//!
//! ```text
//! mod.rs          — BinarySerialization, the public entry points
//! envelope.rs     — Top-level and embedded headers
//! aggregate.rs    — Aggregate bodies, recursing through the registry
//! registry.rs     — (type, version) → codec dispatch
//! variants/       — One static codec per body kind
//! identifiers.rs  — Addresses, aliases, mosaic ids on the wire
//! primitives.rs   — Bounds-checked little-endian reader
//! error.rs        — CodecError and its kinds
//! ```
//!
//! ## Design Decisions
//!
//! - All integers are little-endian and no field is padded.
//! - Decoding is strict: reserved fields must be zero, declared sizes must
//!   match, and every body must be consumed exactly. Anything accepted
//!   re-encodes to the same bytes.
//! - Encoding never half-writes: every precondition is checked before the
//!   output buffer is returned.
//! - The registry is immutable once built and safe to share across threads.

mod aggregate;
mod envelope;
pub mod error;
pub mod identifiers;
pub mod primitives;
pub mod registry;
pub mod variants;

pub use error::{CodecError, ErrorKind, RegistryError};
pub use primitives::Reader;
pub use registry::{BodyCodec, DecodeBodyFn, EncodeBodyFn, RegistryBuilder, VariantCodec, VariantRegistry};

use crate::config::TRANSACTION_HEADER_SIZE;
use crate::transaction::{EmbeddedTransaction, Transaction};
use envelope::SignerPolicy;

/// Serializes transactions against a [`VariantRegistry`].
///
/// # Usage
///
/// ```rust
/// use symbol_protocol::codec::BinarySerialization;
/// use symbol_protocol::identity::{Account, NetworkType};
/// use symbol_protocol::transaction::{Message, TransactionBuilder, TransferBody};
///
/// let sender = Account::generate(NetworkType::TestNet);
/// let tx = TransactionBuilder::new(
///     NetworkType::TestNet,
///     TransferBody {
///         recipient: sender.address().into(),
///         mosaics: vec![],
///         message: Some(Message::plain("hello")),
///     },
/// )
/// .signer(sender.public_key())
/// .build();
///
/// let codec = BinarySerialization::new();
/// let unsigned = codec.serialize_unsigned(&tx).unwrap();
/// assert_eq!(unsigned.len(), codec.size(&tx).unwrap());
///
/// let decoded = codec.deserialize(&unsigned).unwrap();
/// assert_eq!(decoded.signer, Some(sender.public_key()));
/// assert_eq!(decoded.signature, None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BinarySerialization<'r> {
    registry: &'r VariantRegistry,
}

impl BinarySerialization<'static> {
    /// A codec over the standard registry.
    pub fn new() -> Self {
        Self {
            registry: VariantRegistry::standard(),
        }
    }
}

impl Default for BinarySerialization<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> BinarySerialization<'r> {
    /// A codec over a custom registry.
    pub fn with_registry(registry: &'r VariantRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r VariantRegistry {
        self.registry
    }

    /// The final wire form. Fails with [`CodecError::MissingField`] unless
    /// both signer and signature are set and non-zero; zeros decode as
    /// absent, so they could not round-trip.
    pub fn serialize(&self, tx: &Transaction) -> Result<Vec<u8>, CodecError> {
        envelope::encode_transaction(self.registry, tx, SignerPolicy::Required)
    }

    /// The form signed over and used for fee estimation: an absent signer or
    /// signature is written as zeros.
    pub fn serialize_unsigned(&self, tx: &Transaction) -> Result<Vec<u8>, CodecError> {
        envelope::encode_transaction(self.registry, tx, SignerPolicy::Placeholder)
    }

    /// Encoded length of `tx`, signed or not.
    pub fn size(&self, tx: &Transaction) -> Result<usize, CodecError> {
        Ok(TRANSACTION_HEADER_SIZE + envelope::encode_body(self.registry, tx)?.len())
    }

    /// Decode a complete top-level payload.
    pub fn deserialize(&self, bytes: &[u8]) -> Result<Transaction, CodecError> {
        envelope::decode_transaction(self.registry, bytes)
    }

    /// Encode one inner transaction with its embedded header.
    pub fn serialize_embedded(&self, inner: &EmbeddedTransaction) -> Result<Vec<u8>, CodecError> {
        let mut out = bytes::BytesMut::new();
        envelope::write_embedded(self.registry, inner, &mut out)?;
        Ok(out.to_vec())
    }

    /// Decode exactly one embedded transaction.
    pub fn deserialize_embedded(&self, bytes: &[u8]) -> Result<EmbeddedTransaction, CodecError> {
        let mut reader = Reader::new(bytes);
        let inner = envelope::read_embedded(self.registry, &mut reader)?;
        reader.finish("embedded transaction")?;
        Ok(inner)
    }
}
