//! Aggregate bodies.
//!
//! ```text
//! transactions hash (32) | payload size u32 | reserved u32
//! inner transactions (payload size bytes, each embedded and unpadded)
//! cosignatures (104 bytes each, to the end of the body)
//! ```
//!
//! Inner transactions go back through the registry, so recursion is at
//! most one level: an embedded aggregate is refused in both directions.

use bytes::{BufMut, BytesMut};

use super::envelope::{read_embedded, write_embedded};
use super::error::CodecError;
use super::primitives::{len_u32, Reader};
use super::registry::VariantRegistry;
use crate::config::{AGGREGATE_BODY_HEADER_SIZE, COSIGNATURE_SIZE};
use crate::crypto::{Hash256, PublicKey, Signature};
use crate::transaction::{AggregateBody, AggregateKind, Cosignature};

pub(crate) fn encode(
    registry: &VariantRegistry,
    body: &AggregateBody,
    out: &mut BytesMut,
) -> Result<(), CodecError> {
    out.reserve(AGGREGATE_BODY_HEADER_SIZE + body.cosignatures.len() * COSIGNATURE_SIZE);
    let mut payload = BytesMut::new();
    for inner in &body.inner_transactions {
        write_embedded(registry, inner, &mut payload)?;
    }
    let payload_size = len_u32("aggregate payload", payload.len())?;

    out.put_slice(body.transactions_hash.as_bytes());
    out.put_u32_le(payload_size);
    out.put_u32_le(0);
    out.put_slice(&payload);
    for cosignature in &body.cosignatures {
        out.put_u64_le(cosignature.version);
        out.put_slice(cosignature.signer.as_bytes());
        out.put_slice(cosignature.signature.as_bytes());
    }
    Ok(())
}

/// Decode an aggregate body that runs to the end of `reader`.
pub(crate) fn decode(
    registry: &VariantRegistry,
    kind: AggregateKind,
    reader: &mut Reader<'_>,
) -> Result<AggregateBody, CodecError> {
    let transactions_hash = Hash256::from_bytes(reader.array("transactions hash")?);
    let payload_size = reader.u32("aggregate payload size")?;
    reader.reserved_u32("aggregate reserved")?;

    let mut payload = reader.sub_reader("aggregate payload", payload_size as usize)?;
    let mut inner_transactions = Vec::new();
    while !payload.is_empty() {
        inner_transactions.push(read_embedded(registry, &mut payload)?);
    }

    let trailing = reader.remaining();
    if trailing % COSIGNATURE_SIZE != 0 {
        return Err(CodecError::Malformed(format!(
            "{trailing} cosignature bytes is not a multiple of {COSIGNATURE_SIZE}"
        )));
    }
    let mut cosignatures = Vec::with_capacity(trailing / COSIGNATURE_SIZE);
    while !reader.is_empty() {
        cosignatures.push(Cosignature {
            version: reader.u64("cosignature version")?,
            signer: PublicKey::from_bytes(reader.array("cosignature signer")?),
            signature: Signature::from_bytes(reader.array("cosignature")?),
        });
    }

    tracing::trace!(
        ?kind,
        inner = inner_transactions.len(),
        cosignatures = cosignatures.len(),
        "decoded aggregate"
    );
    Ok(AggregateBody {
        kind,
        transactions_hash,
        inner_transactions,
        cosignatures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::NetworkType;
    use crate::transaction::{EmbeddedTransaction, KeyLinkBody, LinkAction};

    fn aggregate(cosignatures: usize) -> AggregateBody {
        let inner = EmbeddedTransaction::new(
            PublicKey::from_bytes([1; 32]),
            NetworkType::TestNet,
            crate::transaction::EmbeddableBody::NodeKeyLink(KeyLinkBody {
                linked_public_key: PublicKey::from_bytes([2; 32]),
                action: LinkAction::Link,
            }),
        );
        AggregateBody {
            kind: AggregateKind::Complete,
            transactions_hash: Hash256::from_bytes([0xEE; 32]),
            inner_transactions: vec![inner.clone(), inner],
            cosignatures: (0..cosignatures)
                .map(|i| Cosignature::new(PublicKey::from_bytes([i as u8; 32]), Signature::zeroed()))
                .collect(),
        }
    }

    #[test]
    fn payload_size_covers_inner_transactions_only() {
        let body = aggregate(1);
        let mut out = BytesMut::new();
        encode(VariantRegistry::standard(), &body, &mut out).unwrap();

        let inner_len = 44 + 33;
        assert_eq!(&out[32..36], &(2 * inner_len as u32).to_le_bytes());
        assert_eq!(out.len(), AGGREGATE_BODY_HEADER_SIZE + 2 * inner_len + COSIGNATURE_SIZE);

        let decoded =
            decode(VariantRegistry::standard(), AggregateKind::Complete, &mut Reader::new(&out)).unwrap();
        assert_eq!(decoded, body);
    }

    #[test]
    fn ragged_cosignatures_are_malformed() {
        let mut out = BytesMut::new();
        encode(VariantRegistry::standard(), &aggregate(1), &mut out).unwrap();
        out.truncate(out.len() - 1);
        let err = decode(VariantRegistry::standard(), AggregateKind::Complete, &mut Reader::new(&out))
            .unwrap_err();
        assert!(matches!(err, CodecError::Malformed(_)));
    }

    #[test]
    fn payload_size_beyond_body_is_truncated() {
        let mut out = BytesMut::new();
        encode(VariantRegistry::standard(), &aggregate(0), &mut out).unwrap();
        out[32] = out[32].wrapping_add(1);
        let err = decode(VariantRegistry::standard(), AggregateKind::Complete, &mut Reader::new(&out))
            .unwrap_err();
        assert_eq!(err.kind(), crate::codec::ErrorKind::MalformedPayload);
    }

    #[test]
    fn embedded_aggregate_is_rejected() {
        let mut out = BytesMut::new();
        encode(VariantRegistry::standard(), &aggregate(0), &mut out).unwrap();
        // Retype the first inner transaction as an aggregate complete.
        out[40 + 38..40 + 40].copy_from_slice(&[0x41, 0x41]);
        let err = decode(VariantRegistry::standard(), AggregateKind::Bonded, &mut Reader::new(&out))
            .unwrap_err();
        assert!(matches!(err, CodecError::Malformed(msg) if msg.contains("0x4141")));
    }
}
