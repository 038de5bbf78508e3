//! # Cryptographic Primitives
//!
//! Everything the codec needs from cryptography, and nothing more:
//!
//! - **Ed25519** keys and signatures for signers and cosigners.
//! - **SHA3-256** and **RIPEMD-160** for address derivation and id generation.
//!
//! The codec itself never signs or verifies anything. Keys are here so that
//! callers can derive addresses and produce cosignatures without pulling in
//! a second crypto stack.

/// Declares a fixed-size byte newtype that renders as upper-case hex.
///
/// The wire format is full of raw 32- and 64-byte blobs. They all behave the
/// same way: copyable, comparable, hex in JSON and in logs.
macro_rules! hex_bytes_newtype {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Length of the raw value in bytes.
            pub const LENGTH: usize = $len;

            /// Wraps raw bytes.
            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// The all-zero value the wire format uses as a placeholder.
            pub const fn zeroed() -> Self {
                Self([0u8; $len])
            }

            /// Borrow the raw bytes.
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// `true` when every byte is zero.
            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }

            /// Upper-case hex, the form used by the REST gateway.
            pub fn to_hex(&self) -> String {
                hex::encode_upper(self.0)
            }

            /// Parse hex of either case. The length must match exactly.
            pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
                let mut bytes = [0u8; $len];
                hex::decode_to_slice(s.trim(), &mut bytes)?;
                Ok(Self(bytes))
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = hex::FromHexError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({}..)", stringify!($name), &self.to_hex()[..16])
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

pub mod hash;
pub mod keys;

pub use hash::{hash160, ripemd160, sha3_256, sha3_256_multi, Hash256};
pub use keys::{KeyError, KeyPair, PublicKey, Signature};
