//! # Key Management
//!
//! Ed25519 keypairs plus the two raw values that travel on the wire: the
//! 32-byte public key and the 64-byte signature.
//!
//! ## Security considerations
//!
//! - Private keys are zeroized on drop (thanks, ed25519-dalek).
//! - Key generation uses `OsRng`.
//! - Secret key bytes are never logged and never serialized implicitly.

use ed25519_dalek::{
    Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey, SECRET_KEY_LENGTH,
};
use rand::rngs::OsRng;
use std::fmt;
use thiserror::Error;

use crate::config::{PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};

/// Errors that can occur during key operations.
///
/// Deliberately vague about *why* a secret was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("invalid secret key bytes: wrong length or not hex")]
    InvalidSecretKey,

    #[error("invalid public key bytes: not a valid Ed25519 point")]
    InvalidPublicKey,
}

hex_bytes_newtype!(
    /// An Ed25519 public key as it appears in signer, cosigner and link fields.
    ///
    /// No curve check happens on construction: the wire carries arbitrary 32
    /// bytes (link keys, zero placeholders) and the codec must round-trip them.
    /// Use [`PublicKey::to_verifying_key`] when a real point is required.
    PublicKey,
    PUBLIC_KEY_LENGTH
);

hex_bytes_newtype!(
    /// A 64-byte Ed25519 signature.
    Signature,
    SIGNATURE_LENGTH
);

/// An Ed25519 signing keypair.
///
/// `KeyPair` intentionally does NOT implement `Serialize`/`Deserialize`.
/// Exporting a private key should be an explicit call to
/// [`secret_key_bytes`](Self::secret_key_bytes).
///
/// # Examples
///
/// ```
/// use symbol_protocol::crypto::KeyPair;
///
/// let kp = KeyPair::generate();
/// let sig = kp.sign(b"aggregate hash");
/// assert!(kp.public_key().verify(b"aggregate hash", &sig));
/// ```
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate a fresh keypair using the OS cryptographic RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Build a keypair from a 32-byte secret. In Ed25519 the secret *is* the seed.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Parse a hex-encoded 32-byte secret key.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let mut seed = [0u8; SECRET_KEY_LENGTH];
        hex::decode_to_slice(hex_str.trim(), &mut seed).map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self::from_seed(&seed))
    }

    /// The public half of this keypair.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_bytes(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign `message`. Ed25519 signatures are deterministic.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature::from_bytes(self.signing_key.sign(message).to_bytes())
    }

    /// Exports the raw 32-byte secret key material. Handle with care.
    pub fn secret_key_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.signing_key.to_bytes()
    }
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        Self::from_seed(&self.signing_key.to_bytes())
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret key material, not even partially.
        write!(f, "KeyPair(pub={})", self.public_key().to_hex())
    }
}

impl PartialEq for KeyPair {
    /// Compare public keys; comparing secrets in non-constant time is a bad habit.
    fn eq(&self, other: &Self) -> bool {
        self.public_key() == other.public_key()
    }
}

impl Eq for KeyPair {}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

impl PublicKey {
    /// Convert to a dalek `VerifyingKey`, rejecting bytes that are not a point.
    pub fn to_verifying_key(&self) -> Result<VerifyingKey, KeyError> {
        VerifyingKey::from_bytes(self.as_bytes()).map_err(|_| KeyError::InvalidPublicKey)
    }

    /// Verify `signature` over `message`. Any failure is just `false`.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let Ok(verifying_key) = self.to_verifying_key() else {
            return false;
        };
        let dalek_sig = DalekSignature::from_bytes(signature.as_bytes());
        verifying_key.verify(message, &dalek_sig).is_ok()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
