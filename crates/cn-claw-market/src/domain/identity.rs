//! # Identity Keys
//!
//! Markets are namespaced by a 32-byte identity key: either the Keccak-256
//! of a canonicalized string handle, or a left-padded numeric id for the
//! FID-keyed variant. A market instance is configured for exactly one
//! derivation mode; the two are never mixed within a namespace.

use super::error::{MarketError, MarketResult};
use serde::{Deserialize, Serialize};
use shared_crypto::keccak256;
use shared_types::Hash;

/// Maximum canonical handle length in bytes.
pub const MAX_HANDLE_BYTES: usize = 32;

/// Key namespacing one market.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct IdentityKey(pub [u8; 32]);

impl IdentityKey {
    /// Derive from a string handle after canonicalization.
    pub fn from_handle(handle: &str) -> MarketResult<Self> {
        let canonical = canonicalize_handle(handle)?;
        Ok(Self(keccak256(canonical.as_bytes())))
    }

    /// Derive from a numeric id (big-endian, left-padded).
    pub fn from_fid(fid: u64) -> Self {
        let mut key = [0u8; 32];
        key[24..].copy_from_slice(&fid.to_be_bytes());
        Self(key)
    }

    pub fn as_bytes(&self) -> &Hash {
        &self.0
    }
}

/// Unresolved key material supplied by a caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeySource {
    Handle(String),
    Fid(u64),
}

/// Canonicalize a handle: ASCII uppercase folds to lowercase; only
/// `[a-z0-9_]` is accepted; empty and oversized handles are rejected.
pub fn canonicalize_handle(handle: &str) -> MarketResult<String> {
    if handle.is_empty() {
        return Err(MarketError::EmptyHandle);
    }
    if handle.len() > MAX_HANDLE_BYTES {
        return Err(MarketError::HandleTooLong {
            len: handle.len(),
            max: MAX_HANDLE_BYTES,
        });
    }
    let mut canonical = String::with_capacity(handle.len());
    for ch in handle.chars() {
        let folded = ch.to_ascii_lowercase();
        match folded {
            'a'..='z' | '0'..='9' | '_' => canonical.push(folded),
            other => return Err(MarketError::InvalidHandleChar(other)),
        }
    }
    Ok(canonical)
}
