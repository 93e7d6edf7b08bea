//! Error types for the bonding-market core.
//!
//! Every failure is a distinct named condition; a returned error means the
//! call committed nothing.

use shared_crypto::CryptoError;
use shared_types::{Address, Amount, ReentrancyError, TokenError};

/// Bonding-market error taxonomy.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MarketError {
    // --- validation ---
    #[error("handle is empty")]
    EmptyHandle,

    #[error("handle exceeds {max} bytes: {len}")]
    HandleTooLong { len: usize, max: usize },

    #[error("handle contains invalid character {0:?}")]
    InvalidHandleChar(char),

    #[error("key source does not match this market's derivation mode")]
    KeyDerivationMismatch,

    #[error("amount must be nonzero")]
    ZeroAmount,

    #[error("{field} exceeds {max} bytes: {len}")]
    StringTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("fee of {bps} bps exceeds cap of {cap} bps")]
    FeeAboveCap { bps: u16, cap: u16 },

    // --- state ---
    #[error("market already exists")]
    MarketExists,

    #[error("market does not exist")]
    MarketNotFound,

    #[error("market is already verified")]
    AlreadyVerified,

    #[error("market is not verified")]
    NotVerified,

    #[error("insufficient units: have {have}, need {need}")]
    InsufficientUnits { have: u64, need: u64 },

    #[error("selling all {supply} outstanding units would drain the market")]
    WouldDrainMarket { supply: u64 },

    #[error("first buy must take at least 2 units, got {amount}")]
    FirstBuyTooSmall { amount: u64 },

    #[error("trading is paused")]
    Paused,

    #[error("caller is not the owner")]
    NotOwner,

    #[error("caller is not the pending owner")]
    NotPendingOwner,

    #[error("caller {0:?} is not the verified wallet")]
    NotVerifiedWallet(Address),

    // --- cryptographic ---
    #[error("signature does not recover to the configured verifier")]
    UntrustedSigner,

    #[error("signature expired: issued {issued}, now {now}")]
    SignatureExpired { issued: u64, now: u64 },

    #[error("claim digest already consumed")]
    DigestAlreadyUsed,

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    // --- economic ---
    #[error("total cost {total_cost} exceeds max cost {max_cost}")]
    MaxCostExceeded {
        total_cost: Amount,
        max_cost: Amount,
    },

    #[error("proceeds {proceeds} below min proceeds {min_proceeds}")]
    MinProceedsNotMet {
        proceeds: Amount,
        min_proceeds: Amount,
    },

    #[error("payment {supplied} below required {required}")]
    InsufficientPayment { supplied: Amount, required: Amount },

    #[error("no fees pending")]
    NoPendingFees,

    #[error("price exceeds representable amount")]
    PriceOverflow,

    // --- external calls ---
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Reentrancy(#[from] ReentrancyError),
}

/// Result type for bonding-market operations.
pub type MarketResult<T> = Result<T, MarketError>;
