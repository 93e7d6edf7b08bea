//! Error types for the proof-chain network core.
//!
//! Every failure is a distinct named condition; a returned error means the
//! call committed nothing.

use shared_types::{Address, Amount, Hash, ReentrancyError, Timestamp, TokenError};

use crate::ports::SwapError;

/// Proof-chain network error taxonomy.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NetworkError {
    // --- validation ---
    #[error("agent name is empty")]
    NameEmpty,

    #[error("agent name exceeds {max} bytes: {len}")]
    NameTooLong { len: usize, max: usize },

    #[error("proof hash must be nonzero")]
    ZeroProofHash,

    #[error("block type is empty")]
    BlockTypeEmpty,

    #[error("block type exceeds {max} bytes: {len}")]
    BlockTypeTooLong { len: usize, max: usize },

    #[error("summary exceeds {max} bytes: {len}")]
    SummaryTooLong { len: usize, max: usize },

    // --- state ---
    #[error("wallet already registered")]
    AgentExists,

    #[error("agent does not exist")]
    AgentNotFound,

    #[error("agent is not active")]
    AgentInactive,

    #[error("rate limited: last inscription at {last}, retry at {retry_at}, now {now}")]
    RateLimited {
        last: Timestamp,
        retry_at: Timestamp,
        now: Timestamp,
    },

    #[error("chain break: expected prev hash {expected:?}, got {presented:?}")]
    ChainBreak { expected: Hash, presented: Hash },

    #[error("agent is not a validator")]
    NotValidator,

    #[error("agent is already a validator")]
    AlreadyValidator,

    #[error("validator stake already locked")]
    AlreadyStaked,

    #[error("validator has no locked stake")]
    NotStaked,

    #[error("validator already attested this proof hash")]
    AlreadyAttested,

    #[error("no contradictory attestations found for this validator and proof hash")]
    NoEquivocationFound,

    #[error("network is paused")]
    Paused,

    #[error("caller is not a custodian")]
    NotCustodian,

    // --- economic ---
    #[error("insufficient buyback pool: have {have}, need {need}")]
    InsufficientPool { have: Amount, need: Amount },

    #[error("withdrawal of {need} exceeds free treasury balance {have}")]
    InsufficientFreeBalance { have: Amount, need: Amount },

    // --- external calls ---
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Swap(#[from] SwapError),

    #[error(transparent)]
    Reentrancy(#[from] ReentrancyError),

    // --- upgrade ---
    #[error("proposed upgrade target {0:?} is the zero address")]
    ZeroUpgradeTarget(Address),
}

/// Result type for proof-chain network operations.
pub type NetworkResult<T> = Result<T, NetworkError>;
