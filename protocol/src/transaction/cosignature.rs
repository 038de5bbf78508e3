//! Cosignatures attached to aggregate transactions.
//!
//! A cosigner signs the hash of the aggregate, not its bytes. The hash is
//! computed outside this crate and handed in; producing it is the signing
//! subsystem's job.

use serde::{Deserialize, Serialize};

use crate::config::COSIGNATURE_VERSION;
use crate::crypto::{Hash256, PublicKey, Signature};
use crate::identity::Account;

/// One cosignature: 104 bytes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cosignature {
    pub version: u64,
    pub signer: PublicKey,
    pub signature: Signature,
}

impl Cosignature {
    /// A cosignature at the current version.
    pub fn new(signer: PublicKey, signature: Signature) -> Self {
        Self {
            version: COSIGNATURE_VERSION,
            signer,
            signature,
        }
    }

    /// Cosign the aggregate identified by `transaction_hash`.
    pub fn sign(account: &Account, transaction_hash: &Hash256) -> Self {
        Self::new(account.public_key(), account.sign(transaction_hash.as_bytes()))
    }

    /// Check this cosignature against `transaction_hash`.
    pub fn verify(&self, transaction_hash: &Hash256) -> bool {
        self.signer.verify(transaction_hash.as_bytes(), &self.signature)
    }
}
