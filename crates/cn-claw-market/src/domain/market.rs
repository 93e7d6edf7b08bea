//! # Market Entities
//!
//! One [`Market`] per identity key. The record is created exactly once (by
//! explicit creation or first trade), lives forever, and cycles between
//! verified and unverified as the owner binds, loses, and re-binds a wallet.

use super::error::{MarketError, MarketResult};
use super::identity::IdentityKey;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, Timestamp};

/// Maximum metadata bio length in bytes.
pub const MAX_BIO_BYTES: usize = 280;

/// Maximum metadata website length in bytes.
pub const MAX_WEBSITE_BYTES: usize = 256;

/// Per-identity market record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Market {
    /// Outstanding position units.
    pub supply: u64,
    /// Agent fees accrued and not yet claimed; zeroed on claim/flush.
    pub pending_fees: Amount,
    /// Lifetime agent fees accrued (monotonic).
    pub lifetime_fees: Amount,
    /// Lifetime base-price volume traded (monotonic).
    pub lifetime_volume: Amount,
    /// Wallet bound by verification; `None` while unverified.
    pub verified_wallet: Option<Address>,
    /// Creation timestamp; set exactly once.
    pub created_at: Timestamp,
    /// Display label supplied at creation.
    pub display_label: String,
}

impl Market {
    pub fn new(created_at: Timestamp, display_label: String) -> Self {
        Self {
            supply: 0,
            pending_fees: 0,
            lifetime_fees: 0,
            lifetime_volume: 0,
            verified_wallet: None,
            created_at,
            display_label,
        }
    }

    pub fn is_verified(&self) -> bool {
        self.verified_wallet.is_some()
    }

    /// Bind the verified wallet. Rejected while already verified; an admin
    /// revoke must come first.
    pub fn bind_wallet(&mut self, wallet: Address) -> MarketResult<()> {
        if self.is_verified() {
            return Err(MarketError::AlreadyVerified);
        }
        self.verified_wallet = Some(wallet);
        Ok(())
    }

    /// Rebind to a different wallet; only valid while verified.
    pub fn rebind_wallet(&mut self, wallet: Address) -> MarketResult<()> {
        if !self.is_verified() {
            return Err(MarketError::NotVerified);
        }
        self.verified_wallet = Some(wallet);
        Ok(())
    }

    /// Clear the verification binding. Supply, balances, and pending fees
    /// are untouched.
    pub fn revoke(&mut self) -> MarketResult<()> {
        if !self.is_verified() {
            return Err(MarketError::NotVerified);
        }
        self.verified_wallet = None;
        Ok(())
    }

    /// Take the pending fee balance, zeroing it.
    pub fn take_pending_fees(&mut self) -> Amount {
        std::mem::take(&mut self.pending_fees)
    }
}

/// Optional self-service metadata; persists independently of verification
/// state and is explicitly NOT cleared on revoke (historical record).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMetadata {
    pub bio: String,
    pub website: String,
    pub token: Option<Address>,
}

impl AgentMetadata {
    pub fn validate(&self) -> MarketResult<()> {
        if self.bio.len() > MAX_BIO_BYTES {
            return Err(MarketError::StringTooLong {
                field: "bio",
                len: self.bio.len(),
                max: MAX_BIO_BYTES,
            });
        }
        if self.website.len() > MAX_WEBSITE_BYTES {
            return Err(MarketError::StringTooLong {
                field: "website",
                len: self.website.len(),
                max: MAX_WEBSITE_BYTES,
            });
        }
        Ok(())
    }
}

/// Read-model snapshot returned by `get_market`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarketView {
    pub key: IdentityKey,
    pub supply: u64,
    pub pending_fees: Amount,
    pub lifetime_fees: Amount,
    pub lifetime_volume: Amount,
    pub verified_wallet: Option<Address>,
    pub is_verified: bool,
    pub created_at: Timestamp,
    pub display_label: String,
    /// Price of the next unit on the curve.
    pub current_price: Amount,
}

/// Subject of a whitelist toggle: buyer wallets under the flat policy,
/// identity keys under the legacy policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WhitelistEntry {
    Wallet(Address),
    Key(IdentityKey),
}
