//! Accounts: a keypair bound to the address it controls on one network.

use serde::{Deserialize, Serialize};

use super::address::Address;
use super::network::NetworkType;
use crate::crypto::keys::{KeyError, KeyPair, PublicKey, Signature};

/// A signing account.
///
/// Like [`KeyPair`], this is not serializable. Share a [`PublicAccount`]
/// instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    key_pair: KeyPair,
    address: Address,
}

impl Account {
    /// A fresh random account on `network`.
    pub fn generate(network: NetworkType) -> Self {
        Self::from_key_pair(KeyPair::generate(), network)
    }

    /// Restore an account from its hex-encoded private key.
    pub fn from_private_key(hex_str: &str, network: NetworkType) -> Result<Self, KeyError> {
        Ok(Self::from_key_pair(KeyPair::from_hex(hex_str)?, network))
    }

    /// Bind an existing keypair to `network`.
    pub fn from_key_pair(key_pair: KeyPair, network: NetworkType) -> Self {
        let address = Address::from_public_key(&key_pair.public_key(), network);
        Self { key_pair, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn public_key(&self) -> PublicKey {
        self.key_pair.public_key()
    }

    pub fn network(&self) -> NetworkType {
        self.address.network()
    }

    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    /// Sign arbitrary bytes with this account's key.
    pub fn sign(&self, data: &[u8]) -> Signature {
        self.key_pair.sign(data)
    }

    /// The shareable half of this account.
    pub fn public_account(&self) -> PublicAccount {
        PublicAccount {
            public_key: self.public_key(),
            address: self.address,
        }
    }
}

/// Public key and address of an account, without the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicAccount {
    pub public_key: PublicKey,
    pub address: Address,
}

impl PublicAccount {
    /// Derive the public account of `public_key` on `network`.
    pub fn from_public_key(public_key: PublicKey, network: NetworkType) -> Self {
        Self {
            public_key,
            address: Address::from_public_key(&public_key, network),
        }
    }

    /// Verify `signature` over `data` against this account's key.
    pub fn verify(&self, data: &[u8], signature: &Signature) -> bool {
        self.public_key.verify(data, signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_follows_key_and_network() {
        let account = Account::generate(NetworkType::MijinTest);
        assert_eq!(account.network(), NetworkType::MijinTest);
        assert_eq!(
            account.address(),
            Address::from_public_key(&account.public_key(), NetworkType::MijinTest)
        );
        assert!(account.address().plain().starts_with('S'));
    }

    #[test]
    fn restored_account_matches_original() {
        let account = Account::generate(NetworkType::TestNet);
        let secret = hex::encode(account.key_pair().secret_key_bytes());
        let restored = Account::from_private_key(&secret, NetworkType::TestNet).unwrap();
        assert_eq!(restored, account);
    }

    #[test]
    fn public_account_verifies_account_signatures() {
        let account = Account::generate(NetworkType::TestNet);
        let public = account.public_account();
        let signature = account.sign(b"hash");
        assert!(public.verify(b"hash", &signature));
        assert_eq!(public, PublicAccount::from_public_key(account.public_key(), NetworkType::TestNet));
    }
}
