//! End-to-end tests for the transaction codec.
//!
//! These tests go through the public API only: build a transaction, encode
//! it, decode it, and compare. Every kind the standard registry knows is
//! covered, as are the two reference scenarios (an unordered transfer and an
//! aggregate with cosignatures) and each class of decode failure.

use symbol_protocol::codec::{BinarySerialization, CodecError, ErrorKind};
use symbol_protocol::crypto::{sha3_256, Hash256, PublicKey, Signature};
use symbol_protocol::identity::{
    Account, Address, MosaicId, MosaicNonce, NamespaceId, NetworkType, UnresolvedAddress,
    UnresolvedMosaicId,
};
use symbol_protocol::transaction::*;

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

const NETWORK: NetworkType = NetworkType::TestNet;

fn recipient() -> Address {
    Address::from_raw("TATNE7Q5BITMUTRRN6IB4I7FLSDRDWZA37JGO5Q").expect("valid address")
}

fn key(seed: u8) -> PublicKey {
    PublicKey::from_bytes([seed; 32])
}

fn alias(name: &str) -> NamespaceId {
    NamespaceId::from_name(name).expect("valid namespace name")
}

fn mosaic_id(id: u64) -> MosaicId {
    MosaicId::new(id).expect("bit 63 clear")
}

fn signed(body: impl Into<TransactionBody>) -> Transaction {
    TransactionBuilder::new(NETWORK, body)
        .max_fee(2_000_000)
        .deadline(Deadline::new(86_400_000))
        .signer(key(0xA1))
        .signature(Signature::from_bytes([0xB2; 64]))
        .build()
}

/// Encode, decode, re-encode; returns the decoded transaction.
fn round_trip(tx: &Transaction) -> Transaction {
    let codec = BinarySerialization::new();
    let bytes = codec.serialize(tx).expect("encode");
    assert_eq!(bytes.len(), codec.size(tx).expect("size"));

    let decoded = codec.deserialize(&bytes).expect("decode");
    assert_eq!(codec.serialize(&decoded).expect("re-encode"), bytes);
    decoded
}

/// One body of every non-aggregate kind.
fn every_embeddable_body() -> Vec<EmbeddableBody> {
    let link = KeyLinkBody {
        linked_public_key: key(0x10),
        action: LinkAction::Link,
    };
    let entry = MetadataEntry {
        target_address: recipient().into(),
        scoped_key: 0xDEAD_BEEF,
        value_size_delta: 5,
        value: b"value".to_vec(),
    };

    vec![
        TransferBody {
            recipient: alias("alice").into(),
            mosaics: vec![Mosaic::new(alias("symbol.xym"), 1_000_000)],
            message: Some(Message::Encrypted(vec![0xEE; 48])),
        }
        .into(),
        MosaicDefinitionBody {
            mosaic_id: MosaicId::from_nonce(MosaicNonce::new(7), &recipient()),
            duration: 0,
            nonce: MosaicNonce::new(7),
            flags: MosaicFlags::TRANSFERABLE | MosaicFlags::RESTRICTABLE,
            divisibility: 3,
        }
        .into(),
        MosaicSupplyChangeBody {
            mosaic_id: mosaic_id(0x42).into(),
            delta: 10,
            action: MosaicSupplyChangeAction::Decrease,
        }
        .into(),
        NamespaceRegistrationBody::root("symbol", 365 * 2880)
            .expect("valid name")
            .into(),
        NamespaceRegistrationBody::child("xym", alias("symbol"))
            .expect("valid name")
            .into(),
        AddressAliasBody {
            namespace_id: alias("alice"),
            address: recipient(),
            action: AliasAction::Link,
        }
        .into(),
        MosaicAliasBody {
            namespace_id: alias("symbol.xym"),
            mosaic_id: mosaic_id(0x6BED_913F_A202_23F8),
            action: AliasAction::Link,
        }
        .into(),
        EmbeddableBody::AccountKeyLink(link.clone()),
        EmbeddableBody::NodeKeyLink(link.clone()),
        EmbeddableBody::VrfKeyLink(link),
        VotingKeyLinkBody {
            linked_public_key: key(0x11),
            start_epoch: 10,
            end_epoch: 370,
            action: LinkAction::Link,
        }
        .into(),
        AccountMetadataBody { entry: entry.clone() }.into(),
        MosaicMetadataBody {
            entry: entry.clone(),
            target_mosaic_id: alias("cat.token").into(),
        }
        .into(),
        NamespaceMetadataBody {
            entry,
            target_namespace_id: alias("cat"),
        }
        .into(),
        HashLockBody {
            mosaic: Mosaic::new(mosaic_id(0x42), 10_000_000),
            duration: 480,
            hash: Hash256::from_bytes(sha3_256(b"aggregate bonded")),
        }
        .into(),
        SecretLockBody {
            recipient: recipient().into(),
            secret: Hash256::from_bytes(sha3_256(b"secret")),
            mosaic: Mosaic::new(mosaic_id(0x42), 1),
            duration: 100,
            hash_algorithm: LockHashAlgorithm::Sha3_256,
        }
        .into(),
        SecretProofBody {
            recipient: recipient().into(),
            secret: Hash256::from_bytes(sha3_256(b"secret")),
            hash_algorithm: LockHashAlgorithm::Sha3_256,
            proof: b"secret".to_vec(),
        }
        .into(),
        MultisigAccountModificationBody {
            min_removal_delta: 1,
            min_approval_delta: 1,
            address_additions: vec![recipient().into(), alias("bob").into()],
            address_deletions: vec![],
        }
        .into(),
        AccountAddressRestrictionBody {
            flags: AccountRestrictionFlags::ADDRESS | AccountRestrictionFlags::BLOCK,
            additions: vec![recipient().into()],
            deletions: vec![alias("eve").into()],
        }
        .into(),
        AccountMosaicRestrictionBody {
            flags: AccountRestrictionFlags::MOSAIC_ID,
            additions: vec![mosaic_id(1).into(), alias("cat.token").into()],
            deletions: vec![],
        }
        .into(),
        AccountOperationRestrictionBody {
            flags: AccountRestrictionFlags::TRANSACTION_TYPE | AccountRestrictionFlags::OUTGOING,
            additions: vec![TransactionType::SecretLock],
            deletions: vec![TransactionType::Transfer],
        }
        .into(),
        MosaicAddressRestrictionBody {
            mosaic_id: mosaic_id(0x42).into(),
            restriction_key: 1,
            previous_restriction_value: 0,
            new_restriction_value: 2,
            target_address: recipient().into(),
        }
        .into(),
        MosaicGlobalRestrictionBody {
            mosaic_id: mosaic_id(0x42).into(),
            reference_mosaic_id: UnresolvedMosaicId::from_raw(0),
            restriction_key: 1,
            previous_restriction_value: 0,
            new_restriction_value: 2,
            previous_restriction_type: MosaicRestrictionType::None,
            new_restriction_type: MosaicRestrictionType::Equal,
        }
        .into(),
    ]
}

// ---------------------------------------------------------------------------
// 1. Reference Scenarios
// ---------------------------------------------------------------------------

#[test]
fn transfer_mosaics_come_back_sorted() {
    let tx = signed(TransferBody {
        recipient: recipient().into(),
        mosaics: vec![
            Mosaic::new(mosaic_id(0x0A), 5),
            Mosaic::new(mosaic_id(0x01), 3),
        ],
        message: None,
    });

    let codec = BinarySerialization::new();
    let decoded = codec.deserialize(&codec.serialize(&tx).unwrap()).unwrap();

    let TransactionBody::Embeddable(EmbeddableBody::Transfer(body)) = &decoded.body else {
        panic!("expected a transfer, got {:?}", decoded.body);
    };
    assert_eq!(
        body.mosaics,
        vec![Mosaic::new(mosaic_id(0x01), 3), Mosaic::new(mosaic_id(0x0A), 5)]
    );
    assert_eq!(body.recipient, UnresolvedAddress::Address(recipient()));
    assert_eq!(body.message, None);
    assert_eq!(decoded.transaction_type(), TransactionType::Transfer);
}

#[test]
fn aggregate_with_cosignatures_reencodes_exactly() {
    let sender = Account::generate(NETWORK);
    let cosigners = [Account::generate(NETWORK), Account::generate(NETWORK)];
    let hash = Hash256::from_bytes(sha3_256(b"aggregate"));

    let inner = EmbeddedTransaction::new(
        sender.public_key(),
        NETWORK,
        TransferBody {
            recipient: recipient().into(),
            mosaics: vec![Mosaic::new(mosaic_id(0x10), 1)],
            message: Some(Message::plain("inner")),
        },
    );
    let cosignatures: Vec<Cosignature> = cosigners
        .iter()
        .map(|account| Cosignature::sign(account, &hash))
        .collect();
    let tx = signed(AggregateBody {
        kind: AggregateKind::Complete,
        transactions_hash: hash,
        inner_transactions: vec![inner.clone()],
        cosignatures: cosignatures.clone(),
    });
    assert_eq!(tx.version, 2);

    let codec = BinarySerialization::new();
    let bytes = codec.serialize(&tx).unwrap();
    let decoded = codec.deserialize(&bytes).unwrap();

    let TransactionBody::Aggregate(aggregate) = &decoded.body else {
        panic!("expected an aggregate");
    };
    assert_eq!(aggregate.inner_transactions.len(), 1);
    assert_eq!(aggregate.inner_transactions[0].transaction_type(), TransactionType::Transfer);
    assert_eq!(aggregate.inner_transactions[0], inner);
    assert_eq!(aggregate.cosignatures, cosignatures);
    assert!(aggregate.cosignatures.iter().all(|c| c.verify(&hash)));

    assert_eq!(codec.serialize(&decoded).unwrap(), bytes);
}

// ---------------------------------------------------------------------------
// 2. Round Trips
// ---------------------------------------------------------------------------

#[test]
fn every_kind_round_trips_top_level() {
    for body in every_embeddable_body() {
        let tx = signed(body);
        assert_eq!(round_trip(&tx), tx, "{}", tx.transaction_type());
    }
}

#[test]
fn every_kind_round_trips_embedded() {
    let codec = BinarySerialization::new();
    for body in every_embeddable_body() {
        let inner = EmbeddedTransaction::new(key(0x33), NETWORK, body);
        let bytes = codec.serialize_embedded(&inner).unwrap();
        assert_eq!(codec.deserialize_embedded(&bytes).unwrap(), inner);
    }
}

#[test]
fn bonded_aggregate_carries_every_kind() {
    let inner_transactions: Vec<_> = every_embeddable_body()
        .into_iter()
        .map(|body| EmbeddedTransaction::new(key(0x44), NETWORK, body))
        .collect();
    let tx = signed(AggregateBody {
        kind: AggregateKind::Bonded,
        transactions_hash: Hash256::zeroed(),
        inner_transactions,
        cosignatures: vec![],
    });
    assert_eq!(round_trip(&tx), tx);
}

#[test]
fn version_one_aggregate_still_decodes() {
    let mut tx = signed(AggregateBody {
        kind: AggregateKind::Complete,
        transactions_hash: Hash256::from_bytes([1; 32]),
        inner_transactions: vec![],
        cosignatures: vec![],
    });
    tx.version = 1;
    let decoded = round_trip(&tx);
    assert_eq!(decoded.version, 1);
}

#[test]
fn unsigned_form_decodes_to_absent_signer_and_signature() {
    let codec = BinarySerialization::new();
    let tx = TransactionBuilder::new(NETWORK, EmbeddableBody::NodeKeyLink(KeyLinkBody {
        linked_public_key: key(1),
        action: LinkAction::Unlink,
    }))
    .build();

    assert_eq!(codec.serialize(&tx).unwrap_err(), CodecError::MissingField("signer"));
    let bytes = codec.serialize_unsigned(&tx).unwrap();
    assert!(bytes[8..104].iter().all(|b| *b == 0));

    let decoded = codec.deserialize(&bytes).unwrap();
    assert_eq!(decoded.signer, None);
    assert_eq!(decoded.signature, None);
    assert_eq!(decoded, tx);
}

// ---------------------------------------------------------------------------
// 3. Failure Taxonomy
// ---------------------------------------------------------------------------

#[test]
fn unknown_type_or_version_is_unsupported() {
    let codec = BinarySerialization::new();
    let mut bytes = codec.serialize(&signed(every_embeddable_body().remove(0))).unwrap();

    bytes[104] = 7;
    assert_eq!(codec.deserialize(&bytes).unwrap_err().kind(), ErrorKind::UnsupportedVariant);

    bytes[104] = 1;
    bytes[106..108].copy_from_slice(&0x9999u16.to_le_bytes());
    assert_eq!(
        codec.deserialize(&bytes).unwrap_err(),
        CodecError::UnsupportedVariant { transaction_type: 0x9999, version: 1 }
    );
}

/// `bytes[..len]` with its size field rewritten to `len`, so the header
/// check passes and decoding reaches the body.
fn resized_prefix(bytes: &[u8], len: usize) -> Vec<u8> {
    let mut prefix = bytes[..len].to_vec();
    if len >= 4 {
        prefix[..4].copy_from_slice(&(len as u32).to_le_bytes());
    }
    prefix
}

#[test]
fn every_truncation_is_malformed() {
    let codec = BinarySerialization::new();
    for body in every_embeddable_body() {
        let kind = body.transaction_type();
        let bytes = codec.serialize(&signed(body)).unwrap();
        for len in 0..bytes.len() {
            let err = codec.deserialize(&resized_prefix(&bytes, len)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedPayload, "{kind}: prefix of {len} bytes");
        }
    }
}

#[test]
fn every_embedded_truncation_is_malformed() {
    let codec = BinarySerialization::new();
    for body in every_embeddable_body() {
        let kind = body.transaction_type();
        let bytes = codec.serialize_embedded(&EmbeddedTransaction::new(key(0xC3), NETWORK, body)).unwrap();
        for len in 0..bytes.len() {
            let err = codec.deserialize_embedded(&resized_prefix(&bytes, len)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedPayload, "{kind}: prefix of {len} bytes");
        }
    }
}

#[test]
fn body_truncations_reach_the_variant_decoder() {
    let codec = BinarySerialization::new();
    let bytes = codec
        .serialize(&signed(EmbeddableBody::AccountKeyLink(KeyLinkBody {
            linked_public_key: key(0x44),
            action: LinkAction::Unlink,
        })))
        .unwrap();
    // Header intact, linked key cut short: the failure names a body field,
    // not the declared size.
    let err = codec.deserialize(&resized_prefix(&bytes, 124 + 10)).unwrap_err();
    assert!(matches!(err, CodecError::Truncated { .. }), "got {err:?}");
}

#[test]
fn trailing_body_bytes_are_malformed() {
    let codec = BinarySerialization::new();
    let mut bytes = codec
        .serialize(&signed(EmbeddableBody::VrfKeyLink(KeyLinkBody {
            linked_public_key: key(9),
            action: LinkAction::Link,
        })))
        .unwrap();
    bytes.push(0);
    let size = bytes.len() as u32;
    bytes[..4].copy_from_slice(&size.to_le_bytes());
    assert!(matches!(codec.deserialize(&bytes), Err(CodecError::Malformed(_))));
}

#[test]
fn corrupted_recipient_checksum_is_a_validation_error() {
    let codec = BinarySerialization::new();
    let tx = signed(TransferBody {
        recipient: recipient().into(),
        mosaics: vec![],
        message: None,
    });
    let mut bytes = codec.serialize(&tx).unwrap();
    bytes[124 + 23] ^= 0x01;
    assert_eq!(codec.deserialize(&bytes).unwrap_err().kind(), ErrorKind::Validation);
}

#[test]
fn invalid_restriction_flags_are_a_precondition_failure() {
    let codec = BinarySerialization::new();
    let tx = signed(AccountOperationRestrictionBody {
        flags: AccountRestrictionFlags::TRANSACTION_TYPE,
        additions: vec![TransactionType::Transfer],
        deletions: vec![],
    });
    assert_eq!(codec.serialize(&tx).unwrap_err().kind(), ErrorKind::Precondition);
}
