//! # cn-custos-network
//!
//! Tamper-evident proof-of-work-cycle ledger for Custos Protocol.
//!
//! ## Architecture
//!
//! Registered agents append hash-linked proof records to their own chains;
//! validators attest to proofs for a fee; misbehaving validators are slashed.
//! USDC fees fund a per-epoch reward pool and a token buyback pool, and a
//! 2-of-2 custodian gate authorizes logic upgrades.
//!
//! ```text
//! agent ──inscribe──→ [CustosNetworkService] ──fees──→ treasury / epoch pool
//! validator ──attest─→   └─ FungibleToken port (USDC leg)
//! custodian ─buyback─→   └─ SwapVenue port    (opaque calldata)
//! ```
//!
//! ## Security
//!
//! - Hash-chain continuity is a hard precondition; breaks are never repaired
//! - Per-validator one-attestation-per-proof guard
//! - Scoped re-entrancy guard on every mutating entry point
//! - 2-of-2 custodian approval for upgrade authorization

pub mod domain;
pub mod events;
pub mod ports;
pub mod service;
pub mod state;

// Re-export main types
pub use domain::{
    Agent, AgentRole, Attestation, EpochSnapshot, NetworkConfig, NetworkError, NetworkResult,
};
pub use events::NetworkEvent;
pub use ports::{SwapError, SwapVenue};
pub use service::{CustosNetworkService, EpochStatus};
