//! # Addresses
//!
//! An address is derived from an Ed25519 public key and carries its own
//! network and checksum:
//!
//! ```text
//! public_key (32 bytes)
//!     -> RIPEMD-160(SHA3-256(public_key))              20 bytes
//!     -> network_byte ‖ key_hash                        21 bytes
//!     -> ‖ SHA3-256(first 21 bytes)[..3]                24 bytes
//!     -> base32(bytes ‖ 0x00) without its last char     39 chars
//! ```
//!
//! The trailing zero byte only exists so base32 lines up on a 5-byte
//! boundary. Dropping the final character leaves a 39-character string whose
//! last character holds two data bits and three zero bits, so it is always
//! one of `A`, `I`, `Q` or `Y`.
//!
//! Addresses are very often typed or pasted by humans, which is why every
//! failure here is a precise [`AddressError`] rather than a generic decode
//! error.

use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::ids::NamespaceId;
use super::network::NetworkType;
use crate::config::{
    ADDRESS_CHECKSUM_LENGTH, ADDRESS_DECODED_LENGTH, ADDRESS_ENCODED_LENGTH,
    ADDRESS_KEY_HASH_LENGTH, ADDRESS_PRETTY_GROUP,
};
use crate::crypto::{hash160, sha3_256, PublicKey};

/// Offset of the checksum inside the decoded address.
const CHECKSUM_OFFSET: usize = 1 + ADDRESS_KEY_HASH_LENGTH;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while building an address from external input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The input has the wrong number of characters or bytes.
    #[error("invalid address length: expected {expected}, got {got}")]
    InvalidLength {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// The last character of a plain address must be `A`, `I`, `Q` or `Y`.
    #[error("invalid trailing address character '{0}'")]
    InvalidTrailingCharacter(char),

    /// The text is not valid base32.
    #[error("base32 decode error: {0}")]
    Base32(String),

    /// The text is not valid hex.
    #[error("hex decode error: {0}")]
    Hex(String),

    /// The leading byte is not one of the known networks.
    #[error("unknown network byte 0x{0:02X}")]
    UnknownNetwork(u8),

    /// The embedded checksum does not match the address body.
    #[error("address checksum mismatch")]
    ChecksumMismatch,

    /// A namespace alias was tagged for a different network than its envelope.
    #[error("namespace alias tagged 0x{got:02X}, expected 0x{expected:02X}")]
    AliasNetworkMismatch {
        /// `network | 0x01` for the enclosing transaction.
        expected: u8,
        /// The first byte found on the wire.
        got: u8,
    },

    /// Bytes 9..24 of a namespace alias must be zero.
    #[error("namespace alias padding is not zero")]
    NonZeroAliasPadding,
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A validated 24-byte address.
///
/// Every constructor that accepts external input checks the network byte
/// and the checksum, so holding an `Address` means both are correct. The
/// parsed network is kept alongside the bytes and always matches byte 0.
///
/// # Examples
///
/// ```
/// use symbol_protocol::crypto::KeyPair;
/// use symbol_protocol::identity::{Address, NetworkType};
///
/// let kp = KeyPair::generate();
/// let address = Address::from_public_key(&kp.public_key(), NetworkType::TestNet);
/// assert!(address.plain().starts_with('T'));
///
/// let parsed = Address::from_raw(&address.pretty()).unwrap();
/// assert_eq!(parsed, address);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    bytes: [u8; ADDRESS_DECODED_LENGTH],
    network: NetworkType,
}

impl Address {
    /// Derive the address of `public_key` on `network`.
    pub fn from_public_key(public_key: &PublicKey, network: NetworkType) -> Self {
        let mut bytes = [0u8; ADDRESS_DECODED_LENGTH];
        bytes[0] = network.id();
        bytes[1..CHECKSUM_OFFSET].copy_from_slice(&hash160(public_key.as_bytes()));
        let checksum = checksum(&bytes[..CHECKSUM_OFFSET]);
        bytes[CHECKSUM_OFFSET..].copy_from_slice(&checksum);
        Self { bytes, network }
    }

    /// Build an address from its 24 raw bytes, validating network and checksum.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        let bytes: [u8; ADDRESS_DECODED_LENGTH] =
            bytes.try_into().map_err(|_| AddressError::InvalidLength {
                expected: ADDRESS_DECODED_LENGTH,
                got: bytes.len(),
            })?;

        let network =
            NetworkType::from_id(bytes[0]).ok_or(AddressError::UnknownNetwork(bytes[0]))?;
        if checksum(&bytes[..CHECKSUM_OFFSET]) != bytes[CHECKSUM_OFFSET..] {
            return Err(AddressError::ChecksumMismatch);
        }
        Ok(Self { bytes, network })
    }

    /// Parse the 39-character text form.
    ///
    /// Surrounding whitespace and dashes are ignored and the input is
    /// upper-cased first, so both [`plain`](Self::plain) and
    /// [`pretty`](Self::pretty) output parse back.
    pub fn from_raw(text: &str) -> Result<Self, AddressError> {
        let plain: String = text
            .trim()
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if plain.len() != ADDRESS_ENCODED_LENGTH {
            return Err(AddressError::InvalidLength {
                expected: ADDRESS_ENCODED_LENGTH,
                got: plain.len(),
            });
        }
        let last = plain.chars().last().unwrap_or_default();
        if !matches!(last, 'A' | 'I' | 'Q' | 'Y') {
            return Err(AddressError::InvalidTrailingCharacter(last));
        }

        // Re-append the character dropped on encode so base32 sees 25 whole bytes.
        let padded = format!("{plain}A");
        let decoded = BASE32_NOPAD
            .decode(padded.as_bytes())
            .map_err(|e| AddressError::Base32(e.to_string()))?;
        Self::from_bytes(&decoded[..ADDRESS_DECODED_LENGTH])
    }

    /// Parse the upper- or lower-case hex form of the raw bytes.
    pub fn from_encoded(hex_str: &str) -> Result<Self, AddressError> {
        let bytes = hex::decode(hex_str.trim()).map_err(|e| AddressError::Hex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// `true` if `text` parses as a valid address.
    pub fn is_valid_plain(text: &str) -> bool {
        Self::from_raw(text).is_ok()
    }

    /// The 39-character base32 form.
    pub fn plain(&self) -> String {
        let mut padded = [0u8; ADDRESS_DECODED_LENGTH + 1];
        padded[..ADDRESS_DECODED_LENGTH].copy_from_slice(&self.bytes);
        let mut encoded = BASE32_NOPAD.encode(&padded);
        encoded.truncate(ADDRESS_ENCODED_LENGTH);
        encoded
    }

    /// The plain form split into dash-separated groups of six.
    pub fn pretty(&self) -> String {
        self.plain()
            .as_bytes()
            .chunks(ADDRESS_PRETTY_GROUP)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Upper-case hex of the 24 raw bytes.
    pub fn encoded(&self) -> String {
        hex::encode_upper(self.bytes)
    }

    /// The network this address belongs to.
    pub fn network(&self) -> NetworkType {
        self.network
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_DECODED_LENGTH] {
        &self.bytes
    }
}

/// First three bytes of SHA3-256 over the network byte and key hash.
fn checksum(body: &[u8]) -> [u8; ADDRESS_CHECKSUM_LENGTH] {
    let digest = sha3_256(body);
    let mut out = [0u8; ADDRESS_CHECKSUM_LENGTH];
    out.copy_from_slice(&digest[..ADDRESS_CHECKSUM_LENGTH]);
    out
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_raw(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.plain())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.plain())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_raw(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// UnresolvedAddress
// ---------------------------------------------------------------------------

/// A recipient or target that is either a concrete address or a namespace
/// the network resolves to an address at execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnresolvedAddress {
    /// A concrete address.
    Address(Address),
    /// An alias that the network resolves.
    Alias(NamespaceId),
}

impl From<Address> for UnresolvedAddress {
    fn from(address: Address) -> Self {
        Self::Address(address)
    }
}

impl From<NamespaceId> for UnresolvedAddress {
    fn from(namespace_id: NamespaceId) -> Self {
        Self::Alias(namespace_id)
    }
}

impl fmt::Display for UnresolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(address) => write!(f, "{address}"),
            Self::Alias(namespace_id) => write!(f, "@{namespace_id}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
