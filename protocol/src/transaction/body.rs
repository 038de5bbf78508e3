//! Transaction bodies: the fields specific to each kind.
//!
//! [`EmbeddableBody`] is the closed set of kinds that may appear inside an
//! aggregate. [`TransactionBody`] adds the aggregates themselves. Because an
//! inner transaction holds an `EmbeddableBody`, an aggregate nested in an
//! aggregate cannot be constructed at all.

use serde::{Deserialize, Serialize};

use super::builder::EmbeddedTransaction;
use super::cosignature::Cosignature;
use super::types::{
    AccountRestrictionFlags, AliasAction, LinkAction, LockHashAlgorithm, Message, Mosaic,
    MosaicFlags, MosaicRestrictionType, MosaicSupplyChangeAction, NamespaceRegistrationType,
    TransactionType,
};
use crate::crypto::{Hash256, PublicKey};
use crate::identity::{
    Address, MosaicId, MosaicNonce, NamespaceId, UnresolvedAddress, UnresolvedMosaicId,
};

// ---------------------------------------------------------------------------
// Transfer
// ---------------------------------------------------------------------------

/// Send mosaics and an optional message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferBody {
    pub recipient: UnresolvedAddress,
    /// Written in ascending id order regardless of the order held here.
    pub mosaics: Vec<Mosaic>,
    pub message: Option<Message>,
}

// ---------------------------------------------------------------------------
// Mosaics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicDefinitionBody {
    pub mosaic_id: MosaicId,
    /// Blocks until expiry, zero for eternal mosaics.
    pub duration: u64,
    pub nonce: MosaicNonce,
    pub flags: MosaicFlags,
    pub divisibility: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicSupplyChangeBody {
    pub mosaic_id: UnresolvedMosaicId,
    pub delta: u64,
    pub action: MosaicSupplyChangeAction,
}

// ---------------------------------------------------------------------------
// Namespaces
// ---------------------------------------------------------------------------

/// Root namespaces rent for a duration, children hang off a parent. Both
/// share one u64 slot on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NamespaceRegistration {
    Root { duration: u64 },
    Child { parent_id: NamespaceId },
}

impl NamespaceRegistration {
    pub fn registration_type(self) -> NamespaceRegistrationType {
        match self {
            Self::Root { .. } => NamespaceRegistrationType::Root,
            Self::Child { .. } => NamespaceRegistrationType::Child,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceRegistrationBody {
    pub registration: NamespaceRegistration,
    pub namespace_id: NamespaceId,
    pub name: String,
}

impl NamespaceRegistrationBody {
    /// Register a root namespace, deriving its id from `name`.
    pub fn root(name: &str, duration: u64) -> Result<Self, crate::identity::IdError> {
        Ok(Self {
            registration: NamespaceRegistration::Root { duration },
            namespace_id: NamespaceId::from_name(name)?,
            name: name.to_string(),
        })
    }

    /// Register `name` under `parent_id`, deriving the child id.
    pub fn child(name: &str, parent_id: NamespaceId) -> Result<Self, crate::identity::IdError> {
        Ok(Self {
            registration: NamespaceRegistration::Child { parent_id },
            namespace_id: NamespaceId::child(parent_id, name)?,
            name: name.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressAliasBody {
    pub namespace_id: NamespaceId,
    pub address: Address,
    pub action: AliasAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicAliasBody {
    pub namespace_id: NamespaceId,
    pub mosaic_id: MosaicId,
    pub action: AliasAction,
}

// ---------------------------------------------------------------------------
// Key links
// ---------------------------------------------------------------------------

/// Shared by account, node and VRF key links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyLinkBody {
    pub linked_public_key: PublicKey,
    pub action: LinkAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingKeyLinkBody {
    pub linked_public_key: PublicKey,
    pub start_epoch: u32,
    pub end_epoch: u32,
    pub action: LinkAction,
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Fields common to the three metadata kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataEntry {
    pub target_address: UnresolvedAddress,
    pub scoped_key: u64,
    /// Signed change in value length relative to the stored value.
    pub value_size_delta: i16,
    pub value: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMetadataBody {
    #[serde(flatten)]
    pub entry: MetadataEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicMetadataBody {
    #[serde(flatten)]
    pub entry: MetadataEntry,
    pub target_mosaic_id: UnresolvedMosaicId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceMetadataBody {
    #[serde(flatten)]
    pub entry: MetadataEntry,
    pub target_namespace_id: NamespaceId,
}

// ---------------------------------------------------------------------------
// Locks
// ---------------------------------------------------------------------------

/// Funds locked so an aggregate bonded can be announced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashLockBody {
    pub mosaic: Mosaic,
    pub duration: u64,
    /// Hash of the aggregate bonded the lock guards.
    pub hash: Hash256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretLockBody {
    pub recipient: UnresolvedAddress,
    pub secret: Hash256,
    pub mosaic: Mosaic,
    pub duration: u64,
    pub hash_algorithm: LockHashAlgorithm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretProofBody {
    pub recipient: UnresolvedAddress,
    pub secret: Hash256,
    pub hash_algorithm: LockHashAlgorithm,
    pub proof: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Multisig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisigAccountModificationBody {
    pub min_removal_delta: i8,
    pub min_approval_delta: i8,
    pub address_additions: Vec<UnresolvedAddress>,
    pub address_deletions: Vec<UnresolvedAddress>,
}

// ---------------------------------------------------------------------------
// Restrictions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountAddressRestrictionBody {
    pub flags: AccountRestrictionFlags,
    pub additions: Vec<UnresolvedAddress>,
    pub deletions: Vec<UnresolvedAddress>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMosaicRestrictionBody {
    pub flags: AccountRestrictionFlags,
    pub additions: Vec<UnresolvedMosaicId>,
    pub deletions: Vec<UnresolvedMosaicId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountOperationRestrictionBody {
    pub flags: AccountRestrictionFlags,
    pub additions: Vec<TransactionType>,
    pub deletions: Vec<TransactionType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicAddressRestrictionBody {
    pub mosaic_id: UnresolvedMosaicId,
    pub restriction_key: u64,
    pub previous_restriction_value: u64,
    pub new_restriction_value: u64,
    pub target_address: UnresolvedAddress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicGlobalRestrictionBody {
    pub mosaic_id: UnresolvedMosaicId,
    /// Mosaic whose restriction is inherited; raw zero for none.
    pub reference_mosaic_id: UnresolvedMosaicId,
    pub restriction_key: u64,
    pub previous_restriction_value: u64,
    pub new_restriction_value: u64,
    pub previous_restriction_type: MosaicRestrictionType,
    pub new_restriction_type: MosaicRestrictionType,
}

// ---------------------------------------------------------------------------
// Aggregate
// ---------------------------------------------------------------------------

/// Whether the aggregate is fully signed up front or collects cosignatures
/// on chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregateKind {
    Complete,
    Bonded,
}

impl AggregateKind {
    pub fn transaction_type(self) -> TransactionType {
        match self {
            Self::Complete => TransactionType::AggregateComplete,
            Self::Bonded => TransactionType::AggregateBonded,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateBody {
    pub kind: AggregateKind,
    /// Merkle hash over the inner transactions, supplied by the caller and
    /// written as given.
    pub transactions_hash: Hash256,
    pub inner_transactions: Vec<EmbeddedTransaction>,
    pub cosignatures: Vec<Cosignature>,
}

// ---------------------------------------------------------------------------
// Sum types
// ---------------------------------------------------------------------------

/// Every kind that can stand alone or sit inside an aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmbeddableBody {
    Transfer(TransferBody),
    MosaicDefinition(MosaicDefinitionBody),
    MosaicSupplyChange(MosaicSupplyChangeBody),
    NamespaceRegistration(NamespaceRegistrationBody),
    AddressAlias(AddressAliasBody),
    MosaicAlias(MosaicAliasBody),
    AccountKeyLink(KeyLinkBody),
    NodeKeyLink(KeyLinkBody),
    VrfKeyLink(KeyLinkBody),
    VotingKeyLink(VotingKeyLinkBody),
    AccountMetadata(AccountMetadataBody),
    MosaicMetadata(MosaicMetadataBody),
    NamespaceMetadata(NamespaceMetadataBody),
    HashLock(HashLockBody),
    SecretLock(SecretLockBody),
    SecretProof(SecretProofBody),
    MultisigAccountModification(MultisigAccountModificationBody),
    AccountAddressRestriction(AccountAddressRestrictionBody),
    AccountMosaicRestriction(AccountMosaicRestrictionBody),
    AccountOperationRestriction(AccountOperationRestrictionBody),
    MosaicAddressRestriction(MosaicAddressRestrictionBody),
    MosaicGlobalRestriction(MosaicGlobalRestrictionBody),
}

impl EmbeddableBody {
    /// The type code this body is written under.
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Transfer(_) => TransactionType::Transfer,
            Self::MosaicDefinition(_) => TransactionType::MosaicDefinition,
            Self::MosaicSupplyChange(_) => TransactionType::MosaicSupplyChange,
            Self::NamespaceRegistration(_) => TransactionType::NamespaceRegistration,
            Self::AddressAlias(_) => TransactionType::AddressAlias,
            Self::MosaicAlias(_) => TransactionType::MosaicAlias,
            Self::AccountKeyLink(_) => TransactionType::AccountKeyLink,
            Self::NodeKeyLink(_) => TransactionType::NodeKeyLink,
            Self::VrfKeyLink(_) => TransactionType::VrfKeyLink,
            Self::VotingKeyLink(_) => TransactionType::VotingKeyLink,
            Self::AccountMetadata(_) => TransactionType::AccountMetadata,
            Self::MosaicMetadata(_) => TransactionType::MosaicMetadata,
            Self::NamespaceMetadata(_) => TransactionType::NamespaceMetadata,
            Self::HashLock(_) => TransactionType::HashLock,
            Self::SecretLock(_) => TransactionType::SecretLock,
            Self::SecretProof(_) => TransactionType::SecretProof,
            Self::MultisigAccountModification(_) => TransactionType::MultisigAccountModification,
            Self::AccountAddressRestriction(_) => TransactionType::AccountAddressRestriction,
            Self::AccountMosaicRestriction(_) => TransactionType::AccountMosaicRestriction,
            Self::AccountOperationRestriction(_) => TransactionType::AccountOperationRestriction,
            Self::MosaicAddressRestriction(_) => TransactionType::MosaicAddressRestriction,
            Self::MosaicGlobalRestriction(_) => TransactionType::MosaicGlobalRestriction,
        }
    }
}

/// The body of a top-level transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionBody {
    Embeddable(EmbeddableBody),
    Aggregate(AggregateBody),
}

impl TransactionBody {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Embeddable(body) => body.transaction_type(),
            Self::Aggregate(body) => body.kind.transaction_type(),
        }
    }
}

impl From<EmbeddableBody> for TransactionBody {
    fn from(body: EmbeddableBody) -> Self {
        Self::Embeddable(body)
    }
}

impl From<AggregateBody> for TransactionBody {
    fn from(body: AggregateBody) -> Self {
        Self::Aggregate(body)
    }
}

/// `From` conversions for bodies that map to exactly one kind.
macro_rules! body_conversions {
    ($($body:ident => $variant:ident),+ $(,)?) => {
        $(
            impl From<$body> for EmbeddableBody {
                fn from(body: $body) -> Self {
                    Self::$variant(body)
                }
            }

            impl From<$body> for TransactionBody {
                fn from(body: $body) -> Self {
                    Self::Embeddable(EmbeddableBody::$variant(body))
                }
            }
        )+
    };
}

body_conversions!(
    TransferBody => Transfer,
    MosaicDefinitionBody => MosaicDefinition,
    MosaicSupplyChangeBody => MosaicSupplyChange,
    NamespaceRegistrationBody => NamespaceRegistration,
    AddressAliasBody => AddressAlias,
    MosaicAliasBody => MosaicAlias,
    VotingKeyLinkBody => VotingKeyLink,
    AccountMetadataBody => AccountMetadata,
    MosaicMetadataBody => MosaicMetadata,
    NamespaceMetadataBody => NamespaceMetadata,
    HashLockBody => HashLock,
    SecretLockBody => SecretLock,
    SecretProofBody => SecretProof,
    MultisigAccountModificationBody => MultisigAccountModification,
    AccountAddressRestrictionBody => AccountAddressRestriction,
    AccountMosaicRestrictionBody => AccountMosaicRestriction,
    AccountOperationRestrictionBody => AccountOperationRestriction,
    MosaicAddressRestrictionBody => MosaicAddressRestriction,
    MosaicGlobalRestrictionBody => MosaicGlobalRestriction,
);
