//! # Fee Split Accounting
//!
//! Every trade splits a protocol fee and an agent fee off the base curve
//! price, both expressed in basis points and independently configurable up
//! to a hard cap. Buys pay `price + fees`; sells receive `price - fees`.

use super::error::{MarketError, MarketResult};
use serde::{Deserialize, Serialize};
use shared_types::{bps_share, Amount, Bps};

/// Hard cap on either fee: 1000 bps = 10%.
pub const MAX_FEE_BPS: Bps = 1_000;

/// Configured fee rates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeConfig {
    pub protocol_bps: Bps,
    pub agent_bps: Bps,
}

impl FeeConfig {
    pub fn new(protocol_bps: Bps, agent_bps: Bps) -> MarketResult<Self> {
        check_fee_cap(protocol_bps)?;
        check_fee_cap(agent_bps)?;
        Ok(Self {
            protocol_bps,
            agent_bps,
        })
    }

    /// Split fees off a base price.
    pub fn split(&self, base_price: Amount) -> FeeSplit {
        FeeSplit {
            protocol: bps_share(base_price, self.protocol_bps),
            agent: bps_share(base_price, self.agent_bps),
        }
    }
}

/// Validate a fee rate against the cap.
pub fn check_fee_cap(bps: Bps) -> MarketResult<()> {
    if bps > MAX_FEE_BPS {
        return Err(MarketError::FeeAboveCap {
            bps,
            cap: MAX_FEE_BPS,
        });
    }
    Ok(())
}

/// Fees carved off one trade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeSplit {
    pub protocol: Amount,
    pub agent: Amount,
}

/// Full cost breakdown for a buy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyCostBreakdown {
    pub base_price: Amount,
    pub protocol_fee: Amount,
    pub agent_fee: Amount,
    pub total_cost: Amount,
}

impl BuyCostBreakdown {
    pub fn new(base_price: Amount, fees: FeeSplit) -> Self {
        Self {
            base_price,
            protocol_fee: fees.protocol,
            agent_fee: fees.agent,
            total_cost: base_price + fees.protocol + fees.agent,
        }
    }
}

/// Full proceeds breakdown for a sell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellProceedsBreakdown {
    pub base_price: Amount,
    pub protocol_fee: Amount,
    pub agent_fee: Amount,
    pub proceeds: Amount,
}

impl SellProceedsBreakdown {
    pub fn new(base_price: Amount, fees: FeeSplit) -> Self {
        Self {
            base_price,
            protocol_fee: fees.protocol,
            agent_fee: fees.agent,
            proceeds: base_price - fees.protocol - fees.agent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_additivity() {
        let fees = FeeConfig::new(500, 500).unwrap();
        let base: Amount = 1_234_567;
        let split = fees.split(base);
        let buy = BuyCostBreakdown::new(base, split);

        assert_eq!(split.protocol, base * 500 / 10_000);
        assert_eq!(split.agent, base * 500 / 10_000);
        assert_eq!(buy.total_cost, base + split.protocol + split.agent);

        let sell = SellProceedsBreakdown::new(base, split);
        assert_eq!(sell.proceeds, base - split.protocol - split.agent);
    }

    #[test]
    fn test_cap_enforced() {
        assert!(FeeConfig::new(1_000, 1_000).is_ok());
        assert_eq!(
            FeeConfig::new(1_001, 0).unwrap_err(),
            MarketError::FeeAboveCap {
                bps: 1_001,
                cap: 1_000
            }
        );
        assert!(FeeConfig::new(0, 1_001).is_err());
    }

    #[test]
    fn test_zero_price_zero_fees() {
        let fees = FeeConfig::new(250, 700).unwrap();
        let split = fees.split(0);
        assert_eq!(split.protocol, 0);
        assert_eq!(split.agent, 0);
    }
}
