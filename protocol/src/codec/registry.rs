//! Dispatch from (type code, version) to a body codec.
//!
//! Each kind contributes one `static` [`VariantCodec`]. The registry maps
//! keys to references to those statics, so one codec can sit under several
//! versions: the aggregates are registered as both version 1 and version 2.
//! The standard registry is built once and shared; a registry is never
//! mutated after [`RegistryBuilder::build`].

use bytes::BytesMut;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::error::{CodecError, RegistryError};
use super::primitives::Reader;
use super::variants;
use crate::identity::NetworkType;
use crate::transaction::{AggregateKind, EmbeddableBody, TransactionType};

/// Writes a body, without envelope, for `network`.
pub type EncodeBodyFn = fn(&EmbeddableBody, NetworkType, &mut BytesMut) -> Result<(), CodecError>;

/// Reads a body from a reader bounded to exactly the body bytes.
pub type DecodeBodyFn = fn(&mut Reader<'_>, NetworkType) -> Result<EmbeddableBody, CodecError>;

/// Encoder and decoder for one non-aggregate kind.
#[derive(Debug, Clone, Copy)]
pub struct BodyCodec {
    transaction_type: TransactionType,
    pub(crate) encode: EncodeBodyFn,
    pub(crate) decode: DecodeBodyFn,
}

impl BodyCodec {
    pub const fn new(
        transaction_type: TransactionType,
        encode: EncodeBodyFn,
        decode: DecodeBodyFn,
    ) -> Self {
        Self {
            transaction_type,
            encode,
            decode,
        }
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn encode(
        &self,
        body: &EmbeddableBody,
        network: NetworkType,
        out: &mut BytesMut,
    ) -> Result<(), CodecError> {
        (self.encode)(body, network, out)
    }

    pub fn decode(
        &self,
        reader: &mut Reader<'_>,
        network: NetworkType,
    ) -> Result<EmbeddableBody, CodecError> {
        (self.decode)(reader, network)
    }
}

/// A registry entry. Aggregates recurse through the registry and so are
/// handled by the envelope layer rather than through a plain function pair.
#[derive(Debug, Clone, Copy)]
pub enum VariantCodec {
    Body(BodyCodec),
    Aggregate(AggregateKind),
}

impl VariantCodec {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Body(codec) => codec.transaction_type(),
            Self::Aggregate(kind) => kind.transaction_type(),
        }
    }

    /// The plain body codec, `None` for aggregates.
    pub fn as_body(&self) -> Option<&BodyCodec> {
        match self {
            Self::Body(codec) => Some(codec),
            Self::Aggregate(_) => None,
        }
    }
}

/// Immutable map from (type, version) to codec.
#[derive(Debug, Clone)]
pub struct VariantRegistry {
    entries: HashMap<(TransactionType, u8), &'static VariantCodec>,
}

impl VariantRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The registry holding every kind the crate knows, built on first use.
    pub fn standard() -> &'static VariantRegistry {
        static STANDARD: OnceLock<VariantRegistry> = OnceLock::new();
        STANDARD.get_or_init(|| {
            variants::ALL
                .iter()
                .try_fold(Self::builder(), |builder, (codec, version)| {
                    builder.register(*codec, *version)
                })
                .expect("standard registry has no duplicate keys")
                .build()
        })
    }

    /// Look up the codec for a known type.
    pub fn resolve(
        &self,
        transaction_type: TransactionType,
        version: u8,
    ) -> Result<&'static VariantCodec, CodecError> {
        self.entries
            .get(&(transaction_type, version))
            .copied()
            .ok_or_else(|| {
                tracing::debug!(%transaction_type, version, "no codec registered");
                CodecError::unsupported(transaction_type.code(), version)
            })
    }

    /// Look up the codec for a raw wire code, which may not name any kind.
    pub fn resolve_code(&self, code: u16, version: u8) -> Result<&'static VariantCodec, CodecError> {
        let transaction_type = TransactionType::from_code(code).ok_or_else(|| {
            tracing::debug!(code, version, "unknown type code");
            CodecError::unsupported(code, version)
        })?;
        self.resolve(transaction_type, version)
    }

    pub fn contains(&self, transaction_type: TransactionType, version: u8) -> bool {
        self.entries.contains_key(&(transaction_type, version))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collects registrations and rejects duplicate keys.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: HashMap<(TransactionType, u8), &'static VariantCodec>,
}

impl RegistryBuilder {
    /// Add `codec` under its own type at `version`.
    pub fn register(
        mut self,
        codec: &'static VariantCodec,
        version: u8,
    ) -> Result<Self, RegistryError> {
        let transaction_type = codec.transaction_type();
        if self.entries.contains_key(&(transaction_type, version)) {
            return Err(RegistryError::DuplicateEntry {
                transaction_type,
                version,
            });
        }
        self.entries.insert((transaction_type, version), codec);
        Ok(self)
    }

    pub fn build(self) -> VariantRegistry {
        tracing::debug!(entries = self.entries.len(), "variant registry built");
        VariantRegistry {
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::variants::{AGGREGATE_BONDED, AGGREGATE_COMPLETE, TRANSFER};

    #[test]
    fn standard_registry_covers_every_kind() {
        let registry = VariantRegistry::standard();
        for t in TransactionType::ALL {
            let codec = registry.resolve(t, t.current_version()).unwrap();
            assert_eq!(codec.transaction_type(), t);
        }
        // 22 body kinds plus two aggregates at two versions each.
        assert_eq!(registry.len(), 26);
    }

    #[test]
    fn aggregate_versions_share_one_codec() {
        let registry = VariantRegistry::standard();
        for t in [TransactionType::AggregateComplete, TransactionType::AggregateBonded] {
            let v1 = registry.resolve(t, 1).unwrap();
            let v2 = registry.resolve(t, 2).unwrap();
            assert!(std::ptr::eq(v1, v2), "{t}");
        }
    }

    #[test]
    fn duplicate_registration_fails() {
        let err = VariantRegistry::builder()
            .register(&TRANSFER, 1)
            .unwrap()
            .register(&TRANSFER, 1)
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateEntry { transaction_type: TransactionType::Transfer, version: 1 }
        );
    }

    #[test]
    fn one_codec_may_serve_several_versions() {
        let registry = VariantRegistry::builder()
            .register(&AGGREGATE_COMPLETE, 1)
            .and_then(|b| b.register(&AGGREGATE_COMPLETE, 2))
            .and_then(|b| b.register(&AGGREGATE_BONDED, 2))
            .unwrap()
            .build();
        assert_eq!(registry.len(), 3);
        assert!(registry.contains(TransactionType::AggregateComplete, 1));
        assert!(!registry.contains(TransactionType::AggregateBonded, 1));
    }

    #[test]
    fn unknown_keys_are_unsupported() {
        let registry = VariantRegistry::standard();
        assert_eq!(
            registry.resolve(TransactionType::Transfer, 9).unwrap_err(),
            CodecError::UnsupportedVariant { transaction_type: 0x4154, version: 9 }
        );
        assert_eq!(
            registry.resolve_code(0xFFFF, 1).unwrap_err(),
            CodecError::UnsupportedVariant { transaction_type: 0xFFFF, version: 1 }
        );
    }

    #[test]
    fn empty_registry_resolves_nothing() {
        let registry = VariantRegistry::builder().build();
        assert!(registry.is_empty());
        assert!(registry.resolve(TransactionType::Transfer, 1).is_err());
    }

    #[test]
    fn registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VariantRegistry>();

        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| VariantRegistry::standard() as *const _ as usize))
            .collect();
        let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
    }
}
