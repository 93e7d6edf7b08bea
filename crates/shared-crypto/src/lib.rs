//! # Shared Crypto - Verification Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | Keccak-256 | Identity keys, proof hashes, digests |
//! | `typed_data` | EIP-712-style | Domain-separated claim digests |
//! | `ecdsa` | secp256k1 | Verifier-signature recovery |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic signing, 65-byte r||s||v form
//! - **Typed data**: struct hashes bound to a versioned, chain-scoped domain
//!   so a signature can never be replayed against another deployment

#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;
pub mod typed_data;

// Re-exports
pub use ecdsa::{recover_address, EcdsaRecovery, SignerKeyPair, SignerRecovery, WireSignature};
pub use errors::CryptoError;
pub use hashing::{keccak256, keccak256_many};
pub use typed_data::TypedDomain;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
