//! Network identifiers.
//!
//! The network byte is the first byte of every address and a field of every
//! envelope. Its top five bits also pick the leading character of the base32
//! address, which is why main-net addresses start with `N` and test-net with
//! `T`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{
    NETWORK_ID_MAINNET, NETWORK_ID_MIJIN, NETWORK_ID_MIJIN_TEST, NETWORK_ID_PRIVATE,
    NETWORK_ID_PRIVATE_TEST, NETWORK_ID_TESTNET,
};

/// The networks a payload can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum NetworkType {
    /// Public main network.
    MainNet = NETWORK_ID_MAINNET,
    /// Public test network.
    TestNet = NETWORK_ID_TESTNET,
    /// Mijin private chain.
    Mijin = NETWORK_ID_MIJIN,
    /// Mijin test chain.
    MijinTest = NETWORK_ID_MIJIN_TEST,
    /// Private network.
    Private = NETWORK_ID_PRIVATE,
    /// Private test network.
    PrivateTest = NETWORK_ID_PRIVATE_TEST,
}

impl NetworkType {
    /// Every known network, in id order of the public ones first.
    pub const ALL: [NetworkType; 6] = [
        Self::MainNet,
        Self::TestNet,
        Self::Mijin,
        Self::MijinTest,
        Self::Private,
        Self::PrivateTest,
    ];

    /// The wire byte.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Look up a network by its wire byte.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.id() == id)
    }

    /// First character of a plain address on this network.
    pub fn address_prefix(self) -> char {
        const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
        ALPHABET[(self.id() >> 3) as usize] as char
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MainNet => write!(f, "MainNet"),
            Self::TestNet => write!(f, "TestNet"),
            Self::Mijin => write!(f, "Mijin"),
            Self::MijinTest => write!(f, "MijinTest"),
            Self::Private => write!(f, "Private"),
            Self::PrivateTest => write!(f, "PrivateTest"),
        }
    }
}
