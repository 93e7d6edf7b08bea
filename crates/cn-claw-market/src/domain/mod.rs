//! Domain logic for the Claws bonding market.

pub mod config;
pub mod curve;
pub mod error;
pub mod fees;
pub mod identity;
pub mod market;
pub mod verification;

pub use config::{KeyDerivation, MarketConfig};
pub use curve::{BuyQuote, CurveParams, PricingPolicy};
pub use error::{MarketError, MarketResult};
pub use fees::{BuyCostBreakdown, FeeConfig, FeeSplit, SellProceedsBreakdown, MAX_FEE_BPS};
pub use identity::{IdentityKey, KeySource, MAX_HANDLE_BYTES};
pub use market::{AgentMetadata, Market, MarketView, WhitelistEntry};
pub use verification::{AgentClaim, CLAIM_TTL_SECS};

use shared_types::Amount;

/// Sentinel for "no slippage limit" on buys.
pub const NO_COST_LIMIT: Amount = Amount::MAX;
