//! # cn-claw-market
//!
//! Bonding-curve speculation market ("Claws") for Custos Protocol.
//!
//! ## Architecture
//!
//! One market per identity key (handle hash or numeric id). Traders buy and
//! sell fungible position units against a closed-form sum-of-squares pricing
//! curve; every trade splits fees between a protocol treasury and the
//! market's verified identity owner.
//!
//! The core is a deterministic state machine driven by externally
//! authenticated calls: the execution environment supplies the caller
//! address and a monotonic timestamp per call. The only signatures the core
//! verifies itself are the typed verifier claims binding an identity key to
//! a wallet.
//!
//! ```text
//! caller ──buy/sell──→ [ClawMarketService] ──fees──→ treasury / pending
//!        ──verify────→   └─ SignerRecovery port (injected verifier key)
//!                        └─ FungibleToken port  (payment leg)
//! ```
//!
//! ## Security
//!
//! - Checks-effects-interactions ordering on every mutating entry point
//! - Scoped re-entrancy guard released on all exit paths
//! - Typed-data verifier signatures with expiry and digest-replay protection
//! - Two-step ownership transfer for the admin role

pub mod domain;
pub mod events;
pub mod service;
pub mod state;

// Re-export main types
pub use domain::{
    AgentClaim, AgentMetadata, BuyCostBreakdown, CurveParams, FeeConfig, IdentityKey,
    KeyDerivation, KeySource, Market, MarketConfig, MarketError, MarketResult, MarketView,
    PricingPolicy, SellProceedsBreakdown, WhitelistEntry, MAX_FEE_BPS, NO_COST_LIMIT,
};
pub use events::MarketEvent;
pub use service::ClawMarketService;
