//! # Market Configuration
//!
//! One config per deployed market namespace. Three presets cover the
//! contract family: ETH-fee, USDC-fee, and USDC-cross-chain, sharing one
//! algorithmic core with different curve divisors, payment scales, and
//! key-derivation modes.

use super::curve::{CurveParams, PricingPolicy};
use serde::{Deserialize, Serialize};
use shared_crypto::TypedDomain;
use shared_types::Address;

/// Which identity-key derivation the namespace uses. Never mixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyDerivation {
    /// Keccak-256 of a canonicalized string handle.
    Handle,
    /// Raw numeric FID, left-padded.
    Fid,
}

/// Static configuration of one market namespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketConfig {
    pub curve: CurveParams,
    pub policy: PricingPolicy,
    pub key_derivation: KeyDerivation,
    /// Typed-data signing domain for verifier claims.
    pub domain_name: String,
    pub domain_version: String,
    pub chain_id: u64,
    /// Address standing in for the deployed contract in the signing domain
    /// and holding escrowed curve reserves and pending fees.
    pub self_address: Address,
}

impl MarketConfig {
    /// ETH-fee variant: wei-scaled flat curve, handle-derived keys.
    pub fn eth_fee(chain_id: u64, self_address: Address) -> Self {
        Self {
            curve: CurveParams {
                scale: 1_000_000_000_000_000_000,
                divisor: 16_000,
            },
            policy: PricingPolicy::FlatFreeFirstUnit,
            key_derivation: KeyDerivation::Handle,
            domain_name: "ClawMarket".into(),
            domain_version: "1".into(),
            chain_id,
            self_address,
        }
    }

    /// USDC-fee variant: 6-decimal scale, flat curve, handle-derived keys.
    pub fn usdc_fee(chain_id: u64, self_address: Address) -> Self {
        Self {
            curve: CurveParams {
                scale: 1_000_000,
                divisor: 400,
            },
            policy: PricingPolicy::FlatFreeFirstUnit,
            key_derivation: KeyDerivation::Handle,
            domain_name: "ClawMarket".into(),
            domain_version: "1".into(),
            chain_id,
            self_address,
        }
    }

    /// USDC cross-chain variant: FID-keyed; claims carry a chain scope.
    pub fn usdc_cross_chain(chain_id: u64, self_address: Address) -> Self {
        Self {
            key_derivation: KeyDerivation::Fid,
            ..Self::usdc_fee(chain_id, self_address)
        }
    }

    /// Legacy tier: steeper wei curve with the whitelist bonus unit.
    pub fn legacy(chain_id: u64, self_address: Address) -> Self {
        Self {
            curve: CurveParams {
                scale: 1_000_000_000_000_000_000,
                divisor: 8_000,
            },
            policy: PricingPolicy::LegacyWhitelistBonus,
            ..Self::eth_fee(chain_id, self_address)
        }
    }

    /// Signing domain for verifier claims.
    pub fn typed_domain(&self) -> TypedDomain {
        TypedDomain::new(
            self.domain_name.clone(),
            self.domain_version.clone(),
            self.chain_id,
            self.self_address,
        )
    }
}
