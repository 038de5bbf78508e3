//! # Transaction Module
//!
//! The in-memory model of every transaction the codec can read or write.
//!
//! ## Architecture
//!
//! ```text
//! types.rs       — Type codes, one-byte enums, flag sets, Mosaic, Message, Deadline
//! body.rs        — One body struct per kind, EmbeddableBody and TransactionBody
//! builder.rs     — Transaction / EmbeddedTransaction envelopes and TransactionBuilder
//! cosignature.rs — Aggregate cosignatures
//! ```
//!
//! ## Design Decisions
//!
//! - The numeric type lives in the body variant, never beside it.
//! - Inner transactions hold an [`EmbeddableBody`], so an aggregate can't
//!   nest another aggregate.
//! - All amounts and durations are `u64` in atomic units or blocks. No
//!   floating point anywhere near monetary values.

pub mod body;
pub mod builder;
pub mod cosignature;
pub mod types;

pub use body::{
    AccountAddressRestrictionBody, AccountMetadataBody, AccountMosaicRestrictionBody,
    AccountOperationRestrictionBody, AddressAliasBody, AggregateBody, AggregateKind,
    EmbeddableBody, HashLockBody, KeyLinkBody, MetadataEntry, MosaicAddressRestrictionBody,
    MosaicAliasBody, MosaicDefinitionBody, MosaicGlobalRestrictionBody, MosaicMetadataBody,
    MosaicSupplyChangeBody, MultisigAccountModificationBody, NamespaceMetadataBody,
    NamespaceRegistration, NamespaceRegistrationBody, SecretLockBody, SecretProofBody,
    TransactionBody, TransferBody, VotingKeyLinkBody,
};
pub use builder::{EmbeddedTransaction, Transaction, TransactionBuilder};
pub use cosignature::Cosignature;
pub use types::{
    AccountRestrictionFlags, AliasAction, Deadline, LinkAction, LockHashAlgorithm, Message, Mosaic,
    MosaicFlags, MosaicRestrictionType, MosaicSupplyChangeAction, NamespaceRegistrationType,
    RestrictionTarget, TransactionType,
};
