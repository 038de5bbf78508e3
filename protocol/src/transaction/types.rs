//! Core type definitions shared by every transaction kind.
//!
//! These types form the vocabulary of the wire format: the type codes, the
//! one-byte enumerations, the flag sets, mosaics, messages and deadlines.
//! They are small and `Copy` wherever the wire value is fixed-width.

use bitflags::bitflags;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identity::UnresolvedMosaicId;

// ---------------------------------------------------------------------------
// TransactionType
// ---------------------------------------------------------------------------

/// Discriminant of a transaction kind, written as a little-endian u16.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u16)]
pub enum TransactionType {
    Transfer = 0x4154,
    NamespaceRegistration = 0x414E,
    AddressAlias = 0x424E,
    MosaicAlias = 0x434E,
    MosaicDefinition = 0x414D,
    MosaicSupplyChange = 0x424D,
    MultisigAccountModification = 0x4155,
    AggregateComplete = 0x4141,
    AggregateBonded = 0x4241,
    HashLock = 0x4148,
    SecretLock = 0x4152,
    SecretProof = 0x4252,
    AccountAddressRestriction = 0x4150,
    AccountMosaicRestriction = 0x4250,
    AccountOperationRestriction = 0x4350,
    AccountKeyLink = 0x414C,
    NodeKeyLink = 0x424C,
    VrfKeyLink = 0x4243,
    VotingKeyLink = 0x4143,
    MosaicAddressRestriction = 0x4251,
    MosaicGlobalRestriction = 0x4151,
    AccountMetadata = 0x4144,
    MosaicMetadata = 0x4244,
    NamespaceMetadata = 0x4344,
}

impl TransactionType {
    /// Every kind the codec knows about.
    pub const ALL: [TransactionType; 24] = [
        Self::Transfer,
        Self::NamespaceRegistration,
        Self::AddressAlias,
        Self::MosaicAlias,
        Self::MosaicDefinition,
        Self::MosaicSupplyChange,
        Self::MultisigAccountModification,
        Self::AggregateComplete,
        Self::AggregateBonded,
        Self::HashLock,
        Self::SecretLock,
        Self::SecretProof,
        Self::AccountAddressRestriction,
        Self::AccountMosaicRestriction,
        Self::AccountOperationRestriction,
        Self::AccountKeyLink,
        Self::NodeKeyLink,
        Self::VrfKeyLink,
        Self::VotingKeyLink,
        Self::MosaicAddressRestriction,
        Self::MosaicGlobalRestriction,
        Self::AccountMetadata,
        Self::MosaicMetadata,
        Self::NamespaceMetadata,
    ];

    /// The wire code.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Look up a kind by its wire code.
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Version new transactions of this kind are built with.
    pub fn current_version(self) -> u8 {
        if self.is_aggregate() {
            2
        } else {
            1
        }
    }

    /// `true` for the two aggregate kinds, which can never be embedded.
    pub fn is_aggregate(self) -> bool {
        matches!(self, Self::AggregateComplete | Self::AggregateBonded)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}(0x{:04X})", self, self.code())
    }
}

// ---------------------------------------------------------------------------
// One-byte enumerations
// ---------------------------------------------------------------------------

/// Declares a `u8`-backed enum with `value()` / `from_value()`.
macro_rules! byte_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident = $value:expr),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[repr(u8)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value),+
        }

        impl $name {
            /// The wire byte.
            pub fn value(self) -> u8 {
                self as u8
            }

            /// Look up a variant by wire byte; unknown bytes yield `None`.
            pub fn from_value(value: u8) -> Option<Self> {
                match value {
                    $(v if v == $value => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

byte_enum!(
    /// Link or unlink a key.
    LinkAction {
        Unlink = 0,
        Link = 1,
    }
);

byte_enum!(
    /// Link or unlink a namespace alias.
    AliasAction {
        Unlink = 0,
        Link = 1,
    }
);

byte_enum!(
    /// Direction of a mosaic supply change.
    MosaicSupplyChangeAction {
        Decrease = 0,
        Increase = 1,
    }
);

byte_enum!(
    /// Root or child namespace registration.
    NamespaceRegistrationType {
        Root = 0,
        Child = 1,
    }
);

byte_enum!(
    /// Hash algorithm a secret lock is bound to.
    LockHashAlgorithm {
        /// SHA3-256.
        Sha3_256 = 0,
        /// RIPEMD-160(SHA-256).
        Hash160 = 1,
        /// SHA-256(SHA-256).
        Hash256 = 2,
    }
);

byte_enum!(
    /// Comparison a mosaic global restriction applies.
    MosaicRestrictionType {
        None = 0,
        Equal = 1,
        NotEqual = 2,
        LessThan = 3,
        LessOrEqual = 4,
        GreaterThan = 5,
        GreaterOrEqual = 6,
    }
);

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

bitflags! {
    /// Properties fixed at mosaic definition time.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct MosaicFlags: u8 {
        const SUPPLY_MUTABLE = 0x01;
        const TRANSFERABLE = 0x02;
        const RESTRICTABLE = 0x04;
    }
}

bitflags! {
    /// Account restriction flags: one target bit plus direction and mode.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct AccountRestrictionFlags: u16 {
        const ADDRESS = 0x0001;
        const MOSAIC_ID = 0x0002;
        const TRANSACTION_TYPE = 0x0004;
        const OUTGOING = 0x4000;
        const BLOCK = 0x8000;
    }
}

/// What an account restriction filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RestrictionTarget {
    Address,
    Mosaic,
    Operation,
}

impl AccountRestrictionFlags {
    /// Whether these flags form a combination the network accepts for `target`.
    ///
    /// Address restrictions may be incoming or outgoing. Mosaic restrictions
    /// are incoming only. Operation restrictions are outgoing only. Any of
    /// them may allow or block.
    pub fn is_valid_for(self, target: RestrictionTarget) -> bool {
        let mode = self - Self::BLOCK;
        match target {
            RestrictionTarget::Address => {
                mode == Self::ADDRESS || mode == Self::ADDRESS | Self::OUTGOING
            }
            RestrictionTarget::Mosaic => mode == Self::MOSAIC_ID,
            RestrictionTarget::Operation => mode == Self::TRANSACTION_TYPE | Self::OUTGOING,
        }
    }
}

// ---------------------------------------------------------------------------
// Mosaic
// ---------------------------------------------------------------------------

/// An amount of a mosaic: 16 bytes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mosaic {
    pub id: UnresolvedMosaicId,
    /// Amount in atomic units.
    pub amount: u64,
}

impl Mosaic {
    pub fn new(id: impl Into<UnresolvedMosaicId>, amount: u64) -> Self {
        Self {
            id: id.into(),
            amount,
        }
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// Leading byte of a transfer message.
pub const MESSAGE_TYPE_PLAIN: u8 = 0x00;
pub const MESSAGE_TYPE_ENCRYPTED: u8 = 0x01;
pub const MESSAGE_TYPE_DELEGATION: u8 = 0xFE;

/// A transfer message. The first wire byte selects the kind; any other
/// leading byte means the message is opaque and kept whole.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Message {
    /// Unencrypted payload, usually UTF-8 text.
    Plain(Vec<u8>),
    /// Payload encrypted for the recipient.
    Encrypted(Vec<u8>),
    /// Persistent harvesting delegation request.
    PersistentHarvestingDelegation(Vec<u8>),
    /// Untyped bytes, written verbatim.
    Raw(Vec<u8>),
}

impl Message {
    /// A plain-text message.
    pub fn plain(text: &str) -> Self {
        Self::Plain(text.as_bytes().to_vec())
    }

    /// The payload without the type byte (the full bytes for `Raw`).
    pub fn payload(&self) -> &[u8] {
        match self {
            Self::Plain(p)
            | Self::Encrypted(p)
            | Self::PersistentHarvestingDelegation(p)
            | Self::Raw(p) => p,
        }
    }

    /// The payload as text, when it is valid UTF-8.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(self.payload()).ok()
    }

    /// Leading type byte, `None` for raw messages.
    pub fn type_byte(&self) -> Option<u8> {
        match self {
            Self::Plain(_) => Some(MESSAGE_TYPE_PLAIN),
            Self::Encrypted(_) => Some(MESSAGE_TYPE_ENCRYPTED),
            Self::PersistentHarvestingDelegation(_) => Some(MESSAGE_TYPE_DELEGATION),
            Self::Raw(_) => None,
        }
    }

    /// Wire length of the message field.
    pub fn encoded_len(&self) -> usize {
        self.payload().len() + usize::from(self.type_byte().is_some())
    }

    /// Classify wire bytes. Empty input means the transfer has no message.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let (&first, rest) = bytes.split_first()?;
        let message = match first {
            MESSAGE_TYPE_PLAIN => Self::Plain(rest.to_vec()),
            MESSAGE_TYPE_ENCRYPTED => Self::Encrypted(rest.to_vec()),
            MESSAGE_TYPE_DELEGATION => Self::PersistentHarvestingDelegation(rest.to_vec()),
            _ => Self::Raw(bytes.to_vec()),
        };
        Some(message)
    }

    /// `true` when [`from_bytes`](Self::from_bytes) reads this message back
    /// unchanged: a raw message must be non-empty and must not start with a
    /// known type byte.
    pub fn is_canonical(&self) -> bool {
        match self {
            Self::Raw(bytes) => !matches!(
                bytes.first(),
                None | Some(&MESSAGE_TYPE_PLAIN)
                    | Some(&MESSAGE_TYPE_ENCRYPTED)
                    | Some(&MESSAGE_TYPE_DELEGATION)
            ),
            _ => true,
        }
    }
}

// ---------------------------------------------------------------------------
// Deadline
// ---------------------------------------------------------------------------

/// Milliseconds since the network epoch after which a transaction expires.
///
/// The codec writes the value verbatim. The helpers below need the epoch
/// adjustment of the target network (seconds between the Unix epoch and
/// the network's genesis), which callers obtain from the network itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Deadline(u64);

impl Deadline {
    pub const fn new(millis: u64) -> Self {
        Self(millis)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// `lifetime` from now, or `None` if that lands before the network
    /// epoch or outside the representable range.
    pub fn from_now(epoch_adjustment: Duration, lifetime: Duration) -> Option<Self> {
        Self::at(Utc::now().checked_add_signed(lifetime)?, epoch_adjustment)
    }

    /// The deadline that expires at `instant`, or `None` for instants before
    /// the network epoch.
    pub fn at(instant: DateTime<Utc>, epoch_adjustment: Duration) -> Option<Self> {
        let millis = instant
            .timestamp_millis()
            .checked_sub(epoch_adjustment.num_milliseconds())?;
        u64::try_from(millis).ok().map(Self)
    }

    /// Wall-clock instant of this deadline, if representable.
    pub fn to_datetime(self, epoch_adjustment: Duration) -> Option<DateTime<Utc>> {
        let millis = i64::try_from(self.0).ok()?.checked_add(epoch_adjustment.num_milliseconds())?;
        Utc.timestamp_millis_opt(millis).single()
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
