//! # Hashing Utilities
//!
//! The network fixes two hash functions and we support exactly those:
//!
//! - **SHA3-256** — address checksums, namespace and mosaic id derivation,
//!   and the inner half of the address key hash.
//! - **RIPEMD-160** — the outer half of the address key hash, applied to a
//!   SHA3-256 digest so an address commits to 20 bytes instead of 32.
//!
//! Both are thin wrappers around RustCrypto implementations. Nothing here
//! is clever, and it should stay that way.

use ripemd::Ripemd160;
use sha3::{Digest, Sha3_256};

use crate::config::{ADDRESS_KEY_HASH_LENGTH, HASH_LENGTH};

hex_bytes_newtype!(
    /// A 32-byte digest: aggregate transactions hash, lock hash or secret.
    Hash256,
    HASH_LENGTH
);

/// Compute the SHA3-256 digest of `data`.
///
/// # Example
///
/// ```
/// use symbol_protocol::crypto::sha3_256;
///
/// let digest = sha3_256(b"symbol");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn sha3_256(data: &[u8]) -> [u8; HASH_LENGTH] {
    let mut hasher = Sha3_256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA3-256 over several parts without concatenating them first.
///
/// Id derivation hashes a little-endian integer followed by a name or an
/// address. Feeding the parts one by one avoids a temporary buffer.
pub fn sha3_256_multi(parts: &[&[u8]]) -> [u8; HASH_LENGTH] {
    let mut hasher = Sha3_256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Compute the RIPEMD-160 digest of `data`.
pub fn ripemd160(data: &[u8]) -> [u8; ADDRESS_KEY_HASH_LENGTH] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// `RIPEMD-160(SHA3-256(data))`, the key hash embedded in every address.
pub fn hash160(data: &[u8]) -> [u8; ADDRESS_KEY_HASH_LENGTH] {
    ripemd160(&sha3_256(data))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha3_256_known_vector() {
        // NIST test vector for the empty message.
        assert_eq!(
            hex::encode(sha3_256(b"")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn sha3_256_is_not_keccak() {
        // Keccak-256("") starts with c5d2...; the padding differs from SHA3.
        assert!(!hex::encode(sha3_256(b"")).starts_with("c5d2"));
    }

    #[test]
    fn ripemd160_known_vector() {
        assert_eq!(
            hex::encode(ripemd160(b"")),
            "9c1185a5c5e9fc54612808977ee8f548b2258d31"
        );
        assert_eq!(
            hex::encode(ripemd160(b"abc")),
            "8eb208f7e05d987a9b044a8e98c6b087f15a0bfc"
        );
    }

    #[test]
    fn multi_part_matches_concatenation() {
        let joined = sha3_256(b"helloworld");
        let parts = sha3_256_multi(&[b"hello", b"world"]);
        assert_eq!(joined, parts);
    }

    #[test]
    fn hash256_hex_is_upper_case_and_parses_either_case() {
        let digest = Hash256::from_bytes(sha3_256(b"lock"));
        let hex = digest.to_hex();
        assert_eq!(hex, hex.to_uppercase());
        assert_eq!(Hash256::from_hex(&hex.to_lowercase()).unwrap(), digest);
        assert!(Hash256::from_hex("ABCD").is_err());
    }

    #[test]
    fn hash160_composes_sha3_then_ripemd() {
        let data = b"public key bytes";
        assert_eq!(hash160(data), ripemd160(&sha3_256(data)));
    }
}
