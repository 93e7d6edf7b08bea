//! # Bonding Curve Pricing
//!
//! Closed-form discrete pricing: the unit at supply index `j` costs
//! `j² * scale / divisor`, so a buy of `amount` units at supply `s` costs
//! the sum over indices `s .. s+amount-1`, computed via
//! `Σ_{1}^{n} i² = n(n+1)(2n+1)/6` as a difference of two partial sums.
//!
//! The unit at index 0 prices to zero, which is what makes the first unit
//! of a fresh market free under the flat policy.
//!
//! All intermediates are carried in `U256` so the math matches unsigned
//! 256-bit integer semantics exactly; results that do not fit the public
//! `u128` amount type surface as `PriceOverflow`.

use super::error::{MarketError, MarketResult};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_types::Amount;

/// Fixed-point scale and protocol-specific divisor for one curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveParams {
    /// Fixed-point unit of the payment token (e.g. 1e18 for wei, 1e6 for USDC).
    pub scale: Amount,
    /// Curve steepness divisor.
    pub divisor: Amount,
}

impl CurveParams {
    /// Price of buying `amount` units when `supply` units are outstanding.
    ///
    /// `price(0, 1) == 0`; `price(0, 2) == scale / divisor`.
    pub fn price(&self, supply: u64, amount: u64) -> MarketResult<Amount> {
        if amount == 0 {
            return Ok(0);
        }
        let upper = sum_of_squares(U256::from(supply) + U256::from(amount) - 1);
        let lower = if supply == 0 {
            U256::zero()
        } else {
            sum_of_squares(U256::from(supply) - 1)
        };
        let wide = (upper - lower) * U256::from(self.scale) / U256::from(self.divisor);
        if wide > U256::from(Amount::MAX) {
            return Err(MarketError::PriceOverflow);
        }
        Ok(wide.as_u128())
    }
}

/// `Σ_{i=1}^{n} i²` via the closed form `n(n+1)(2n+1)/6`.
fn sum_of_squares(n: U256) -> U256 {
    n * (n + 1) * (n * 2 + 1) / 6
}

/// Pricing-policy variants across the contract family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricingPolicy {
    /// The supply-0 unit is free for everyone; non-whitelisted first buyers
    /// must take at least 2 units so they are never stuck holding only the
    /// free unit.
    FlatFreeFirstUnit,
    /// Legacy tier: whitelisted identity keys receive the supply-0 unit as a
    /// bonus atop a normal purchase; non-whitelisted first buyers must take
    /// at least 2 units.
    LegacyWhitelistBonus,
}

/// Result of pricing a buy: units credited and the base (pre-fee) cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuyQuote {
    pub units_out: u64,
    pub base_price: Amount,
}

impl PricingPolicy {
    /// Price a buy of `amount` units at `supply` outstanding.
    ///
    /// `key_whitelisted` refers to the market's identity key and only
    /// affects the legacy bonus; the flat policy's whitelist rule is the
    /// buyer-scoped floor in [`PricingPolicy::check_first_buy_floor`].
    pub fn quote_buy(
        &self,
        params: &CurveParams,
        key_whitelisted: bool,
        supply: u64,
        amount: u64,
    ) -> MarketResult<BuyQuote> {
        if amount == 0 {
            return Err(MarketError::ZeroAmount);
        }
        match self {
            Self::FlatFreeFirstUnit => Ok(BuyQuote {
                units_out: amount,
                base_price: params.price(supply, amount)?,
            }),
            Self::LegacyWhitelistBonus => {
                if supply == 0 && key_whitelisted {
                    // free unit occupies index 0; the paid units price from 1
                    Ok(BuyQuote {
                        units_out: amount + 1,
                        base_price: params.price(1, amount)?,
                    })
                } else {
                    Ok(BuyQuote {
                        units_out: amount,
                        base_price: params.price(supply, amount)?,
                    })
                }
            }
        }
    }

    /// First-buy floor: a non-whitelisted buyer opening a market must take
    /// at least 2 units (one free + one paid under the flat policy).
    pub fn check_first_buy_floor(
        &self,
        whitelisted: bool,
        supply: u64,
        amount: u64,
    ) -> MarketResult<()> {
        if supply == 0 && !whitelisted && amount < 2 {
            return Err(MarketError::FirstBuyTooSmall { amount });
        }
        Ok(())
    }

    /// Base proceeds of selling `amount` units at `supply` outstanding.
    ///
    /// Callers enforce the last-unit guard; this prices the walk back down
    /// the curve.
    pub fn quote_sell(
        &self,
        params: &CurveParams,
        supply: u64,
        amount: u64,
    ) -> MarketResult<Amount> {
        if amount == 0 {
            return Err(MarketError::ZeroAmount);
        }
        params.price(supply - amount, amount)
    }
}
