//! # Identity Module
//!
//! Who and what a transaction talks about: networks, accounts, addresses,
//! and the numeric ids of mosaics and namespaces.
//!
//! The identity stack is layered:
//!
//! 1. **Network** — the one-byte network id stamped on every address and
//!    envelope.
//! 2. **Account** — an Ed25519 keypair bound to a network.
//! 3. **Address** — 24 checksummed bytes derived from the public key. This is
//!    what users see, share and paste into recipient fields, as 39 base32
//!    characters.
//! 4. **Ids** — mosaic and namespace identifiers, plus the "unresolved"
//!    forms that let a namespace alias stand in for an address or a mosaic.
//!
//! ## Design Decisions
//!
//! - Every constructor that takes external input validates it. Holding an
//!   `Address` or a `MosaicId` means it passed its structural check.
//! - Unresolved references are enums, not flags on a raw value. The wire
//!   tricks used to tell them apart live in the codec.

pub mod account;
pub mod address;
pub mod ids;
pub mod network;

pub use account::{Account, PublicAccount};
pub use address::{Address, AddressError, UnresolvedAddress};
pub use ids::{IdError, MosaicId, MosaicNonce, NamespaceId, UnresolvedMosaicId};
pub use network::NetworkType;
