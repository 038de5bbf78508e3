//! Transaction envelopes.
//!
//! ```text
//! top-level (124 bytes + body)
//!   size u32 | reserved u32 | signature (64) | signer (32)
//!   version u8 | network u8 | type u16 | max fee u64 | deadline u64
//!
//! embedded (44 bytes + body)
//!   size u32 | signer (32) | version u8 | network u8 | type u16 | reserved u32
//! ```
//!
//! `size` always counts the header. The body is encoded first so the size is
//! known before the header is written.

use bytes::{BufMut, BytesMut};

use super::aggregate;
use super::error::CodecError;
use super::primitives::{len_u32, Reader};
use super::registry::{VariantCodec, VariantRegistry};
use crate::config::{EMBEDDED_HEADER_SIZE, TRANSACTION_HEADER_SIZE};
use crate::crypto::{PublicKey, Signature};
use crate::identity::NetworkType;
use crate::transaction::{
    Deadline, EmbeddableBody, EmbeddedTransaction, Transaction, TransactionBody,
};

/// How a missing signer or signature is treated on encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SignerPolicy {
    /// Final wire form: both must be present and non-zero, since an
    /// all-zero field decodes as absent.
    Required,
    /// Signing and fee estimation form: absent values are written as zeros.
    Placeholder,
}

fn network_from_byte(byte: u8) -> Result<NetworkType, CodecError> {
    NetworkType::from_id(byte).ok_or(CodecError::UnknownNetwork(byte))
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

/// Encode the body of `tx` alone.
pub(crate) fn encode_body(
    registry: &VariantRegistry,
    tx: &Transaction,
) -> Result<BytesMut, CodecError> {
    let codec = registry.resolve(tx.transaction_type(), tx.version)?;
    let mut body = BytesMut::new();
    match (codec, &tx.body) {
        (VariantCodec::Body(codec), TransactionBody::Embeddable(inner)) => {
            codec.encode(inner, tx.network, &mut body)?;
        }
        (VariantCodec::Aggregate(_), TransactionBody::Aggregate(aggregate)) => {
            aggregate::encode(registry, aggregate, &mut body)?;
        }
        (codec, other) => {
            return Err(CodecError::body_mismatch(codec.transaction_type(), other.transaction_type()));
        }
    }
    Ok(body)
}

pub(crate) fn encode_transaction(
    registry: &VariantRegistry,
    tx: &Transaction,
    policy: SignerPolicy,
) -> Result<Vec<u8>, CodecError> {
    let (signer, signature) = match policy {
        SignerPolicy::Required => (
            tx.signer
                .filter(|signer| !signer.is_zero())
                .ok_or(CodecError::MissingField("signer"))?,
            tx.signature
                .filter(|signature| !signature.is_zero())
                .ok_or(CodecError::MissingField("signature"))?,
        ),
        SignerPolicy::Placeholder => (
            tx.signer.unwrap_or(PublicKey::zeroed()),
            tx.signature.unwrap_or(Signature::zeroed()),
        ),
    };

    let body = encode_body(registry, tx)?;
    let size = len_u32("transaction", TRANSACTION_HEADER_SIZE + body.len())?;

    let mut out = BytesMut::with_capacity(size as usize);
    out.put_u32_le(size);
    out.put_u32_le(0);
    out.put_slice(signature.as_bytes());
    out.put_slice(signer.as_bytes());
    out.put_u8(tx.version);
    out.put_u8(tx.network.id());
    out.put_u16_le(tx.transaction_type().code());
    out.put_u64_le(tx.max_fee);
    out.put_u64_le(tx.deadline.value());
    out.put_slice(&body);
    Ok(out.to_vec())
}

pub(crate) fn decode_transaction(
    registry: &VariantRegistry,
    bytes: &[u8],
) -> Result<Transaction, CodecError> {
    let mut reader = Reader::new(bytes);
    let size = reader.u32("size")?;
    if size as usize != bytes.len() {
        return Err(CodecError::Malformed(format!(
            "declared size {size} but payload is {} bytes",
            bytes.len()
        )));
    }
    reader.reserved_u32("header reserved")?;
    let signature = Signature::from_bytes(reader.array("signature")?);
    let signer = PublicKey::from_bytes(reader.array("signer")?);
    let version = reader.u8("version")?;
    let network = network_from_byte(reader.u8("network")?)?;
    let code = reader.u16("type")?;
    let max_fee = reader.u64("max fee")?;
    let deadline = Deadline::new(reader.u64("deadline")?);

    let codec = registry.resolve_code(code, version)?;
    tracing::trace!(
        transaction_type = %codec.transaction_type(),
        version,
        size,
        "decoding transaction"
    );
    let body = match codec {
        VariantCodec::Body(codec) => TransactionBody::Embeddable(codec.decode(&mut reader, network)?),
        VariantCodec::Aggregate(kind) => {
            TransactionBody::Aggregate(aggregate::decode(registry, *kind, &mut reader)?)
        }
    };
    reader.finish("transaction body")?;

    Ok(Transaction {
        network,
        version,
        signer: (!signer.is_zero()).then_some(signer),
        signature: (!signature.is_zero()).then_some(signature),
        max_fee,
        deadline,
        body,
    })
}

// ---------------------------------------------------------------------------
// Embedded
// ---------------------------------------------------------------------------

/// Append one embedded transaction to `out`.
pub(crate) fn write_embedded(
    registry: &VariantRegistry,
    inner: &EmbeddedTransaction,
    out: &mut BytesMut,
) -> Result<(), CodecError> {
    let transaction_type = inner.transaction_type();
    let codec = registry
        .resolve(transaction_type, inner.version)?
        .as_body()
        .ok_or_else(|| CodecError::Precondition(format!("{transaction_type} cannot be embedded")))?;

    let mut body = BytesMut::new();
    codec.encode(&inner.body, inner.network, &mut body)?;
    let size = len_u32("embedded transaction", EMBEDDED_HEADER_SIZE + body.len())?;

    out.reserve(size as usize);
    out.put_u32_le(size);
    out.put_slice(inner.signer.as_bytes());
    out.put_u8(inner.version);
    out.put_u8(inner.network.id());
    out.put_u16_le(transaction_type.code());
    out.put_u32_le(0);
    out.put_slice(&body);
    Ok(())
}

/// Read one embedded transaction, consuming exactly its declared size.
pub(crate) fn read_embedded(
    registry: &VariantRegistry,
    reader: &mut Reader<'_>,
) -> Result<EmbeddedTransaction, CodecError> {
    let size = reader.u32("embedded size")? as usize;
    if size < EMBEDDED_HEADER_SIZE {
        return Err(CodecError::Malformed(format!(
            "embedded size {size} is smaller than its {EMBEDDED_HEADER_SIZE}-byte header"
        )));
    }
    let mut inner = reader.sub_reader("embedded transaction", size - 4)?;

    let signer = PublicKey::from_bytes(inner.array("embedded signer")?);
    let version = inner.u8("embedded version")?;
    let network = network_from_byte(inner.u8("embedded network")?)?;
    let code = inner.u16("embedded type")?;
    inner.reserved_u32("embedded reserved")?;

    let codec = registry.resolve_code(code, version)?.as_body().ok_or_else(|| {
        CodecError::Malformed(format!("aggregate type 0x{code:04X} inside an aggregate"))
    })?;
    tracing::trace!(
        transaction_type = %codec.transaction_type(),
        version,
        size,
        "decoding embedded transaction"
    );
    let body: EmbeddableBody = codec.decode(&mut inner, network)?;
    inner.finish("embedded body")?;

    Ok(EmbeddedTransaction {
        signer,
        version,
        network,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::{KeyLinkBody, LinkAction, TransactionBuilder};

    fn key_link() -> KeyLinkBody {
        KeyLinkBody {
            linked_public_key: PublicKey::from_bytes([7; 32]),
            action: LinkAction::Link,
        }
    }

    fn registry() -> &'static VariantRegistry {
        VariantRegistry::standard()
    }

    #[test]
    fn header_layout() {
        let tx = TransactionBuilder::new(NetworkType::TestNet, EmbeddableBody::AccountKeyLink(key_link()))
            .max_fee(0x0102)
            .deadline(Deadline::new(0x0A0B))
            .build();
        let bytes = encode_transaction(registry(), &tx, SignerPolicy::Placeholder).unwrap();

        assert_eq!(bytes.len(), 124 + 33);
        assert_eq!(&bytes[..4], &157u32.to_le_bytes());
        assert!(bytes[4..104].iter().all(|b| *b == 0));
        assert_eq!(bytes[104], 1);
        assert_eq!(bytes[105], 0x98);
        assert_eq!(&bytes[106..108], &[0x4C, 0x41]);
        assert_eq!(&bytes[108..116], &0x0102u64.to_le_bytes());
        assert_eq!(&bytes[116..124], &0x0A0Bu64.to_le_bytes());
    }

    #[test]
    fn final_form_requires_signer_and_signature() {
        let tx = TransactionBuilder::new(NetworkType::TestNet, EmbeddableBody::AccountKeyLink(key_link()))
            .build();
        assert_eq!(
            encode_transaction(registry(), &tx, SignerPolicy::Required).unwrap_err(),
            CodecError::MissingField("signer")
        );

        let tx = tx.with_signature(PublicKey::from_bytes([1; 32]), Signature::from_bytes([2; 64]));
        assert!(encode_transaction(registry(), &tx, SignerPolicy::Required).is_ok());

        let mut unsigned = tx;
        unsigned.signature = None;
        assert_eq!(
            encode_transaction(registry(), &unsigned, SignerPolicy::Required).unwrap_err(),
            CodecError::MissingField("signature")
        );
    }

    #[test]
    fn final_form_treats_zeroed_signer_or_signature_as_missing() {
        let tx = TransactionBuilder::new(NetworkType::TestNet, EmbeddableBody::NodeKeyLink(key_link()))
            .build();

        let zero_signature = tx.clone().with_signature(PublicKey::from_bytes([1; 32]), Signature::zeroed());
        assert_eq!(
            encode_transaction(registry(), &zero_signature, SignerPolicy::Required).unwrap_err(),
            CodecError::MissingField("signature")
        );

        let zero_signer = tx.with_signature(PublicKey::zeroed(), Signature::from_bytes([2; 64]));
        assert_eq!(
            encode_transaction(registry(), &zero_signer, SignerPolicy::Required).unwrap_err(),
            CodecError::MissingField("signer")
        );

        // The placeholder form still accepts zeros and decodes them as absent.
        let bytes = encode_transaction(registry(), &zero_signature, SignerPolicy::Placeholder).unwrap();
        let decoded = decode_transaction(registry(), &bytes).unwrap();
        assert_eq!(decoded.signature, None);
        assert_eq!(decoded.signer, Some(PublicKey::from_bytes([1; 32])));
    }

    #[test]
    fn final_form_round_trips_exactly() {
        let tx = TransactionBuilder::new(NetworkType::TestNet, EmbeddableBody::NodeKeyLink(key_link()))
            .max_fee(10)
            .build()
            .with_signature(PublicKey::from_bytes([1; 32]), Signature::from_bytes([2; 64]));
        let bytes = encode_transaction(registry(), &tx, SignerPolicy::Required).unwrap();
        let decoded = decode_transaction(registry(), &bytes).unwrap();
        assert_eq!(decoded, tx);
        assert_eq!(encode_transaction(registry(), &decoded, SignerPolicy::Required).unwrap(), bytes);
    }

    #[test]
    fn declared_size_must_match_payload() {
        let tx = TransactionBuilder::new(NetworkType::TestNet, EmbeddableBody::VrfKeyLink(key_link()))
            .build();
        let mut bytes = encode_transaction(registry(), &tx, SignerPolicy::Placeholder).unwrap();
        bytes.push(0);
        assert!(matches!(
            decode_transaction(registry(), &bytes),
            Err(CodecError::Malformed(_))
        ));
    }

    #[test]
    fn unknown_network_byte_is_rejected() {
        let tx = TransactionBuilder::new(NetworkType::TestNet, EmbeddableBody::NodeKeyLink(key_link()))
            .build();
        let mut bytes = encode_transaction(registry(), &tx, SignerPolicy::Placeholder).unwrap();
        bytes[105] = 0x01;
        assert_eq!(
            decode_transaction(registry(), &bytes).unwrap_err(),
            CodecError::UnknownNetwork(0x01)
        );
    }

    #[test]
    fn embedded_header_layout() {
        let inner = EmbeddedTransaction::new(
            PublicKey::from_bytes([9; 32]),
            NetworkType::MainNet,
            EmbeddableBody::AccountKeyLink(key_link()),
        );
        let mut out = BytesMut::new();
        write_embedded(registry(), &inner, &mut out).unwrap();
        assert_eq!(out.len(), 44 + 33);
        assert_eq!(&out[..4], &77u32.to_le_bytes());
        assert_eq!(&out[4..36], &[9; 32]);
        assert_eq!(&out[36..40], &[1, 0x68, 0x4C, 0x41]);
        assert_eq!(&out[40..44], &[0; 4]);

        let decoded = read_embedded(registry(), &mut Reader::new(&out)).unwrap();
        assert_eq!(decoded, inner);
    }

    #[test]
    fn embedded_size_below_header_is_malformed() {
        let mut bytes = vec![0u8; 44];
        bytes[0] = 43;
        assert!(matches!(
            read_embedded(registry(), &mut Reader::new(&bytes)),
            Err(CodecError::Malformed(_))
        ));
    }

    #[test]
    fn embedded_size_beyond_remaining_is_truncated() {
        let mut bytes = vec![0u8; 44];
        bytes[0] = 200;
        assert!(matches!(
            read_embedded(registry(), &mut Reader::new(&bytes)),
            Err(CodecError::Truncated { .. })
        ));
    }
}
