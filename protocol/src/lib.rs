// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Symbol Protocol — Transaction Codec
//!
//! Reads and writes Symbol-family transactions in the exact binary layout
//! nodes accept, and provides the pieces needed to build those
//! transactions: keys, addresses, namespace and mosaic ids.
//!
//! ## Architecture
//!
//! - **codec** — Envelope, registry and per-kind body codecs.
//! - **transaction** — The in-memory model: bodies, envelopes, builder.
//! - **identity** — Networks, addresses, accounts, mosaic and namespace ids.
//! - **crypto** — Ed25519 keys, SHA3-256 and RIPEMD-160.
//! - **config** — Wire sizes, network bytes and other protocol constants.
//!
//! ## Design Philosophy
//!
//! 1. Byte exactness first: anything decoded re-encodes to the same bytes.
//! 2. Invalid states are unrepresentable where the type system allows it.
//! 3. Every failure is a typed error; no panics on untrusted input.
//! 4. Pure and synchronous: no I/O, no global mutable state.

pub mod codec;
pub mod config;
pub mod crypto;
pub mod identity;
pub mod transaction;

pub use codec::{BinarySerialization, CodecError, ErrorKind, VariantRegistry};
pub use identity::{Address, NetworkType};
pub use transaction::{Transaction, TransactionBuilder, TransactionType};
