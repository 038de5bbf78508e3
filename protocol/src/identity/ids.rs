//! Numeric identifiers: mosaic ids, namespace ids and mosaic nonces.
//!
//! Mosaic and namespace ids share one 64-bit space split by bit 63: it is
//! set on every namespace id and clear on every mosaic id. That single bit
//! is what lets an unresolved mosaic field hold either kind.
//!
//! Both ids can be derived deterministically. A namespace id hashes its
//! parent id and name, a mosaic id hashes a nonce and the owner's address.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use super::address::Address;
use crate::config::{NAMESPACE_FLAG, NAMESPACE_MAX_DEPTH, NAMESPACE_MAX_NAME_LENGTH};
use crate::crypto::sha3_256_multi;

/// Errors raised when an identifier fails its structural check.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// Mosaic ids never have bit 63 set.
    #[error("mosaic id {0:016X} has the namespace bit set")]
    MosaicIdHighBit(u64),

    /// Namespace ids always have bit 63 set.
    #[error("namespace id {0:016X} lacks the namespace bit")]
    NamespaceIdMissingHighBit(u64),

    /// A namespace part is empty, too long or uses a forbidden character.
    #[error("invalid namespace name '{0}'")]
    InvalidNamespaceName(String),

    /// More than three levels in a namespace path.
    #[error("namespace path has {depth} levels, at most {max} allowed")]
    NamespaceTooDeep {
        /// Levels found.
        depth: usize,
        /// Levels allowed.
        max: usize,
    },

    /// The identifier is not valid hex.
    #[error("invalid identifier hex '{0}'")]
    InvalidHex(String),
}

/// Parses the 16-digit hex form used by the REST gateway.
fn parse_hex_u64(s: &str) -> Result<u64, IdError> {
    u64::from_str_radix(s.trim(), 16).map_err(|_| IdError::InvalidHex(s.to_string()))
}

/// Little-endian u64 from the head of a digest.
fn digest_head(digest: &[u8; 32]) -> u64 {
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(head)
}

// ---------------------------------------------------------------------------
// MosaicId
// ---------------------------------------------------------------------------

/// A 64-bit mosaic identifier with bit 63 clear.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MosaicId(u64);

impl MosaicId {
    /// Wrap a raw id, rejecting values that would read back as namespaces.
    pub fn new(id: u64) -> Result<Self, IdError> {
        if id & NAMESPACE_FLAG != 0 {
            return Err(IdError::MosaicIdHighBit(id));
        }
        Ok(Self(id))
    }

    /// Parse 16 hex digits.
    pub fn from_hex(s: &str) -> Result<Self, IdError> {
        Self::new(parse_hex_u64(s)?)
    }

    /// Derive the id a mosaic definition with `nonce` gets when `owner` creates it.
    pub fn from_nonce(nonce: MosaicNonce, owner: &Address) -> Self {
        let digest = sha3_256_multi(&[&nonce.0.to_le_bytes(), owner.as_bytes()]);
        Self(digest_head(&digest) & !NAMESPACE_FLAG)
    }

    /// The raw value.
    pub fn id(self) -> u64 {
        self.0
    }

    /// Upper-case, zero-padded hex.
    pub fn to_hex(self) -> String {
        format!("{:016X}", self.0)
    }
}

// ---------------------------------------------------------------------------
// NamespaceId
// ---------------------------------------------------------------------------

/// A 64-bit namespace identifier with bit 63 set.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespaceId(u64);

impl NamespaceId {
    /// Wrap a raw id, rejecting values that would read back as mosaics.
    pub fn new(id: u64) -> Result<Self, IdError> {
        if id & NAMESPACE_FLAG == 0 {
            return Err(IdError::NamespaceIdMissingHighBit(id));
        }
        Ok(Self(id))
    }

    /// Parse 16 hex digits.
    pub fn from_hex(s: &str) -> Result<Self, IdError> {
        Self::new(parse_hex_u64(s)?)
    }

    /// Id of the last level of a dotted path such as `symbol.xym`.
    pub fn from_name(full_name: &str) -> Result<Self, IdError> {
        let path = Self::path(full_name)?;
        path.last()
            .copied()
            .ok_or_else(|| IdError::InvalidNamespaceName(full_name.to_string()))
    }

    /// Ids of every level of a dotted path, root first.
    pub fn path(full_name: &str) -> Result<Vec<Self>, IdError> {
        let parts: Vec<&str> = full_name.split('.').collect();
        if parts.len() > NAMESPACE_MAX_DEPTH {
            return Err(IdError::NamespaceTooDeep {
                depth: parts.len(),
                max: NAMESPACE_MAX_DEPTH,
            });
        }

        let mut ids = Vec::with_capacity(parts.len());
        let mut parent = 0u64;
        for part in parts {
            let id = Self::derive(parent, part)?;
            parent = id.0;
            ids.push(id);
        }
        Ok(ids)
    }

    /// Id of `name` registered directly under `parent`.
    pub fn child(parent: NamespaceId, name: &str) -> Result<Self, IdError> {
        Self::derive(parent.0, name)
    }

    fn derive(parent: u64, name: &str) -> Result<Self, IdError> {
        if !is_valid_namespace_part(name) {
            return Err(IdError::InvalidNamespaceName(name.to_string()));
        }
        let digest = sha3_256_multi(&[&parent.to_le_bytes(), name.as_bytes()]);
        Ok(Self(digest_head(&digest) | NAMESPACE_FLAG))
    }

    /// The raw value.
    pub fn id(self) -> u64 {
        self.0
    }

    /// Upper-case, zero-padded hex.
    pub fn to_hex(self) -> String {
        format!("{:016X}", self.0)
    }
}

/// `[a-z0-9][a-z0-9_-]*`, at most 64 bytes.
fn is_valid_namespace_part(name: &str) -> bool {
    let bytes = name.as_bytes();
    let Some(first) = bytes.first() else {
        return false;
    };
    bytes.len() <= NAMESPACE_MAX_NAME_LENGTH
        && (first.is_ascii_lowercase() || first.is_ascii_digit())
        && bytes[1..]
            .iter()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'_' || *b == b'-')
}

// ---------------------------------------------------------------------------
// MosaicNonce
// ---------------------------------------------------------------------------

/// The 4-byte nonce a mosaic definition is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MosaicNonce(u32);

impl MosaicNonce {
    /// Wrap a raw nonce.
    pub fn new(nonce: u32) -> Self {
        Self(nonce)
    }

    /// A nonce from the thread RNG.
    pub fn random() -> Self {
        Self(rand::thread_rng().gen())
    }

    /// The raw value.
    pub fn value(self) -> u32 {
        self.0
    }
}

// ---------------------------------------------------------------------------
// UnresolvedMosaicId
// ---------------------------------------------------------------------------

/// A mosaic referenced either directly or through a namespace alias.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnresolvedMosaicId {
    /// A concrete mosaic.
    Mosaic(MosaicId),
    /// A namespace linked to a mosaic.
    Alias(NamespaceId),
}

impl UnresolvedMosaicId {
    /// Classify a raw wire value by bit 63. Never fails: every u64 is one or the other.
    pub fn from_raw(raw: u64) -> Self {
        if raw & NAMESPACE_FLAG != 0 {
            Self::Alias(NamespaceId(raw))
        } else {
            Self::Mosaic(MosaicId(raw))
        }
    }

    /// The raw wire value. Transfer mosaics are sorted by this.
    pub fn raw(self) -> u64 {
        match self {
            Self::Mosaic(id) => id.0,
            Self::Alias(id) => id.0,
        }
    }
}

impl From<MosaicId> for UnresolvedMosaicId {
    fn from(id: MosaicId) -> Self {
        Self::Mosaic(id)
    }
}

impl From<NamespaceId> for UnresolvedMosaicId {
    fn from(id: NamespaceId) -> Self {
        Self::Alias(id)
    }
}

// ---------------------------------------------------------------------------
// Formatting & serde
// ---------------------------------------------------------------------------

macro_rules! hex_id_impls {
    ($name:ident, $parse:expr) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:016X}", self.raw_value())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:016X})", stringify!($name), self.raw_value())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                let parse: fn(&str) -> Result<$name, IdError> = $parse;
                parse(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

trait RawValue {
    fn raw_value(&self) -> u64;
}

impl RawValue for MosaicId {
    fn raw_value(&self) -> u64 {
        self.0
    }
}

impl RawValue for NamespaceId {
    fn raw_value(&self) -> u64 {
        self.0
    }
}

impl RawValue for UnresolvedMosaicId {
    fn raw_value(&self) -> u64 {
        self.raw()
    }
}

hex_id_impls!(MosaicId, MosaicId::from_hex);
hex_id_impls!(NamespaceId, NamespaceId::from_hex);
hex_id_impls!(UnresolvedMosaicId, |s| parse_hex_u64(s).map(UnresolvedMosaicId::from_raw));

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
