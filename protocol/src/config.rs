//! # Protocol Configuration & Constants
//!
//! Every magic number of the wire format lives here. If you're hardcoding a
//! header size somewhere else, you're doing it wrong.
//!
//! These values are dictated by the network, not by us. The codec has to
//! reproduce them bit-for-bit or the node will reject the payload, so
//! "tuning" anything in this file is not an option.

// ---------------------------------------------------------------------------
// Network Identifiers
// ---------------------------------------------------------------------------

/// Public main network. Addresses start with `N`.
pub const NETWORK_ID_MAINNET: u8 = 0x68;

/// Public test network. Addresses start with `T`.
pub const NETWORK_ID_TESTNET: u8 = 0x98;

/// Mijin private chain. Addresses start with `M`.
pub const NETWORK_ID_MIJIN: u8 = 0x60;

/// Mijin test chain. Addresses start with `S`.
pub const NETWORK_ID_MIJIN_TEST: u8 = 0x90;

/// Private network. Addresses start with `P`.
pub const NETWORK_ID_PRIVATE: u8 = 0x78;

/// Private test network. Addresses start with `V`.
pub const NETWORK_ID_PRIVATE_TEST: u8 = 0xA8;

/// Seconds between the Unix epoch and main-net genesis. Deadlines count
/// from here.
pub const MAINNET_EPOCH_ADJUSTMENT_SECS: i64 = 1_615_853_185;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 public key length in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 secret key length in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Ed25519 signature length. Always 64 bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// SHA3-256 digest length, used for aggregate hashes and lock secrets.
pub const HASH_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// Decoded address: network byte, 20-byte key hash, 3-byte checksum.
pub const ADDRESS_DECODED_LENGTH: usize = 24;

/// Plain (base32) text form of an address.
pub const ADDRESS_ENCODED_LENGTH: usize = 39;

/// RIPEMD-160 output folded into every address.
pub const ADDRESS_KEY_HASH_LENGTH: usize = 20;

/// Trailing checksum bytes: the head of SHA3-256 over the first 21 bytes.
pub const ADDRESS_CHECKSUM_LENGTH: usize = 3;

/// Characters per group in the dashed ("pretty") address form.
pub const ADDRESS_PRETTY_GROUP: usize = 6;

/// Bit 0 of an unresolved address' first byte marks a namespace alias.
pub const ALIAS_FLAG: u8 = 0x01;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Bit 63 is set on every namespace id and clear on every mosaic id. The
/// decoder uses it to tell the two apart inside unresolved mosaic fields.
pub const NAMESPACE_FLAG: u64 = 1 << 63;

/// Deepest namespace path the network accepts (`root.sub.leaf`).
pub const NAMESPACE_MAX_DEPTH: usize = 3;

/// Longest single namespace part in bytes.
pub const NAMESPACE_MAX_NAME_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Envelope Layout
// ---------------------------------------------------------------------------

/// Top-level header: size, reserved, signature, signer, version, network,
/// type, max fee, deadline.
pub const TRANSACTION_HEADER_SIZE: usize =
    4 + 4 + SIGNATURE_LENGTH + PUBLIC_KEY_LENGTH + 1 + 1 + 2 + 8 + 8;

/// Embedded header: size, signer, version, network, type, reserved.
pub const EMBEDDED_HEADER_SIZE: usize = 4 + PUBLIC_KEY_LENGTH + 1 + 1 + 2 + 4;

/// Fixed part of an aggregate body before the inner transactions.
pub const AGGREGATE_BODY_HEADER_SIZE: usize = HASH_LENGTH + 4 + 4;

/// One cosignature: version, signer, signature.
pub const COSIGNATURE_SIZE: usize = 8 + PUBLIC_KEY_LENGTH + SIGNATURE_LENGTH;

/// Version of cosignatures produced by this crate.
pub const COSIGNATURE_VERSION: u64 = 0;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
