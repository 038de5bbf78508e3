//! Error types for the binary codec.
//!
//! Every encode or decode that can fail returns a [`CodecError`]. The
//! variants group into four kinds (see [`ErrorKind`]) that callers handle
//! differently: an unsupported variant is a version problem, a malformed
//! payload is a protocol problem, a failed precondition is a bug in the
//! caller, and a validation failure usually means bad user input.

use thiserror::Error;

use crate::identity::{AddressError, IdError};
use crate::transaction::TransactionType;

/// Errors raised while encoding or decoding a transaction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// No codec is registered for this type code and version.
    #[error("unsupported transaction variant: type 0x{transaction_type:04X} version {version}")]
    UnsupportedVariant {
        /// Raw type code.
        transaction_type: u16,
        /// Envelope version.
        version: u8,
    },

    /// The buffer ended before a field could be read.
    #[error("truncated payload reading {field}: need {needed} bytes, {available} available")]
    Truncated {
        /// The field being read.
        field: &'static str,
        /// Bytes the field needs.
        needed: usize,
        /// Bytes left in the buffer.
        available: usize,
    },

    /// A length, reserved field or enumerated value is inconsistent.
    #[error("malformed payload: {0}")]
    Malformed(String),

    /// The final wire form needs a field the transaction doesn't have.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The transaction can't be encoded as it stands.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// The envelope names a network that doesn't exist.
    #[error("unknown network byte 0x{0:02X}")]
    UnknownNetwork(u8),

    /// An address failed its structural check.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// A mosaic or namespace id failed its structural check.
    #[error(transparent)]
    Identifier(#[from] IdError),
}

/// Coarse classification of a [`CodecError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No registry entry for the (type, version) pair.
    UnsupportedVariant,
    /// Bytes that can't be a valid payload.
    MalformedPayload,
    /// An encode the caller should never have attempted.
    Precondition,
    /// An address or identifier that fails its own checks.
    Validation,
}

impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedVariant { .. } => ErrorKind::UnsupportedVariant,
            Self::Truncated { .. } | Self::Malformed(_) => ErrorKind::MalformedPayload,
            Self::MissingField(_) | Self::Precondition(_) => ErrorKind::Precondition,
            Self::UnknownNetwork(_) | Self::Address(_) | Self::Identifier(_) => {
                ErrorKind::Validation
            }
        }
    }

    pub(crate) fn unsupported(transaction_type: u16, version: u8) -> Self {
        Self::UnsupportedVariant {
            transaction_type,
            version,
        }
    }

    /// An encode function was handed a body of another kind.
    pub(crate) fn body_mismatch(expected: TransactionType, got: TransactionType) -> Self {
        Self::Precondition(format!("{expected} codec cannot encode a {got} body"))
    }
}

/// Errors raised while building a [`VariantRegistry`](super::VariantRegistry).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two codecs claim the same key.
    #[error("duplicate registry entry for {transaction_type} version {version}")]
    DuplicateEntry {
        /// Type of the clashing entry.
        transaction_type: TransactionType,
        /// Version of the clashing entry.
        version: u8,
    },
}
