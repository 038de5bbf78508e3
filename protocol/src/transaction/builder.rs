//! Transaction envelopes and their construction via the builder pattern.
//!
//! A [`Transaction`] is an envelope (network, version, fee, deadline, signer,
//! signature) around a [`TransactionBody`]. The numeric type is never stored:
//! it is derived from the body, so the two cannot disagree.
//!
//! The builder does not sign. Signing happens outside the codec, and the
//! result is attached with [`Transaction::with_signature`].

use serde::{Deserialize, Serialize};

use super::body::{EmbeddableBody, TransactionBody};
use super::types::{Deadline, TransactionType};
use crate::crypto::{PublicKey, Signature};
use crate::identity::{Address, NetworkType};

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A top-level transaction.
///
/// `signer` and `signature` stay `None` until the transaction is signed. The
/// final wire form requires both; the placeholder form used for signing and
/// fee estimation zero-fills them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub network: NetworkType,
    pub version: u8,
    pub signer: Option<PublicKey>,
    pub signature: Option<Signature>,
    /// Highest fee the signer accepts, in atomic units of the network currency.
    pub max_fee: u64,
    pub deadline: Deadline,
    pub body: TransactionBody,
}

impl Transaction {
    /// The type code, derived from the body.
    pub fn transaction_type(&self) -> TransactionType {
        self.body.transaction_type()
    }

    /// Returns `true` if both signer and signature are present.
    pub fn is_signed(&self) -> bool {
        self.signer.is_some() && self.signature.is_some()
    }

    /// Address of the signer on this transaction's network.
    pub fn signer_address(&self) -> Option<Address> {
        self.signer
            .map(|key| Address::from_public_key(&key, self.network))
    }

    /// Attach an externally produced signature.
    pub fn with_signature(mut self, signer: PublicKey, signature: Signature) -> Self {
        self.signer = Some(signer);
        self.signature = Some(signature);
        self
    }
}

// ---------------------------------------------------------------------------
// EmbeddedTransaction
// ---------------------------------------------------------------------------

/// A transaction inside an aggregate: no fee, no deadline, no signature of
/// its own, and a signer that is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedTransaction {
    pub signer: PublicKey,
    pub version: u8,
    pub network: NetworkType,
    pub body: EmbeddableBody,
}

impl EmbeddedTransaction {
    /// Embed `body` signed by `signer`, at the kind's current version.
    pub fn new(signer: PublicKey, network: NetworkType, body: impl Into<EmbeddableBody>) -> Self {
        let body = body.into();
        Self {
            signer,
            version: body.transaction_type().current_version(),
            network,
            body,
        }
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.body.transaction_type()
    }

    pub fn signer_address(&self) -> Address {
        Address::from_public_key(&self.signer, self.network)
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Transaction`] envelopes.
///
/// # Usage
///
/// ```rust
/// use symbol_protocol::identity::{Address, MosaicId, NetworkType};
/// use symbol_protocol::transaction::{Deadline, Mosaic, TransactionBuilder, TransferBody};
///
/// let recipient = Address::from_raw("TATNE7Q5BITMUTRRN6IB4I7FLSDRDWZA37JGO5Q").unwrap();
/// let tx = TransactionBuilder::new(
///     NetworkType::TestNet,
///     TransferBody {
///         recipient: recipient.into(),
///         mosaics: vec![Mosaic::new(MosaicId::new(0x0A).unwrap(), 5)],
///         message: None,
///     },
/// )
/// .max_fee(20_000)
/// .deadline(Deadline::new(7_200_000))
/// .build();
///
/// assert_eq!(tx.version, 1);
/// assert!(!tx.is_signed());
/// ```
///
/// `version` defaults to the kind's current version. `max_fee` and
/// `deadline` default to zero.
pub struct TransactionBuilder {
    network: NetworkType,
    version: u8,
    max_fee: u64,
    deadline: Deadline,
    signer: Option<PublicKey>,
    signature: Option<Signature>,
    body: TransactionBody,
}

impl TransactionBuilder {
    pub fn new(network: NetworkType, body: impl Into<TransactionBody>) -> Self {
        let body = body.into();
        Self {
            network,
            version: body.transaction_type().current_version(),
            max_fee: 0,
            deadline: Deadline::default(),
            signer: None,
            signature: None,
            body,
        }
    }

    /// Override the version. Only needed to target an older codec.
    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    pub fn max_fee(mut self, max_fee: u64) -> Self {
        self.max_fee = max_fee;
        self
    }

    pub fn deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = deadline;
        self
    }

    /// Set the signer without a signature, e.g. to size or sign the payload.
    pub fn signer(mut self, signer: PublicKey) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn signature(mut self, signature: Signature) -> Self {
        self.signature = Some(signature);
        self
    }

    pub fn build(self) -> Transaction {
        Transaction {
            network: self.network,
            version: self.version,
            signer: self.signer,
            signature: self.signature,
            max_fee: self.max_fee,
            deadline: self.deadline,
            body: self.body,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
