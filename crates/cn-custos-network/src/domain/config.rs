//! # Network Configuration
//!
//! One static config per deployed network instance: fee magnitudes, split
//! ratios, the rate-limit interval, the genesis chain root, and the fixed
//! principal addresses. Split ratios are basis points over the relevant
//! whole; each split's shares sum to 10_000 with the last share taken as
//! the remainder so rounding dust never leaks.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, Bps, Hash, Timestamp};

/// Chain root every agent's first inscription must link against, carried
/// over from the predecessor deployment.
pub const GENESIS_CHAIN_HEAD: Hash = [
    0x43, 0x55, 0x53, 0x54, 0x4f, 0x53, 0x5f, 0x47, 0x45, 0x4e, 0x45, 0x53, 0x49, 0x53, 0x5f,
    0x30, 0x30, 0x30, 0x31, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00,
];

/// Static configuration of one network instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// One-time fee charged on agent registration, paid to treasury.
    pub registration_fee: Amount,
    /// Fee charged per inscription, split treasury / epoch pool.
    pub inscription_fee: Amount,
    /// Fee charged to the inscribing agent per attestation, split
    /// validator / treasury / buyback.
    pub attestation_fee: Amount,
    /// Fixed stake a validator locks exactly once.
    pub validator_stake: Amount,
    /// Minimum seconds between two inscriptions by the same agent.
    pub min_inscription_interval: Timestamp,
    /// Chain root for every agent's first inscription.
    pub genesis_chain_head: Hash,

    /// Treasury share of each inscription fee; remainder feeds the epoch
    /// reward pool.
    pub inscription_treasury_bps: Bps,
    /// Validator and treasury shares of each attestation fee; remainder
    /// feeds the buyback pool.
    pub attestation_validator_bps: Bps,
    pub attestation_treasury_bps: Bps,
    /// Buyback-pool share of a slashed stake on custodian slash-removal;
    /// remainder goes to the acting custodian.
    pub slash_buyback_bps: Bps,
    /// Reporter share of a slashed stake on equivocation; remainder feeds
    /// the buyback pool.
    pub equivocation_reporter_bps: Bps,

    /// Protocol treasury.
    pub treasury: Address,
    /// Ecosystem wallet whose balance delta measures buyback output.
    pub ecosystem_wallet: Address,
    /// Exactly two custodians; order fixes each one's upgrade-approval slot.
    pub custodians: [Address; 2],
    /// Address standing in for the deployed contract, holding escrowed
    /// stakes and the epoch/buyback pools.
    pub self_address: Address,
}

impl NetworkConfig {
    /// Deployed-protocol defaults: USDC-denominated fees, 1-hour inscription
    /// interval, 70/30 inscription split, 70/20/10 attestation split, 50/50
    /// slash split, 30/70 equivocation split.
    pub fn mainnet(
        treasury: Address,
        ecosystem_wallet: Address,
        custodians: [Address; 2],
        self_address: Address,
    ) -> Self {
        Self {
            registration_fee: 10_000_000,  // 10 USDC
            inscription_fee: 1_000_000,    // 1 USDC
            attestation_fee: 500_000,      // 0.50 USDC
            validator_stake: 100_000_000,  // 100 USDC
            min_inscription_interval: 3_600,
            genesis_chain_head: GENESIS_CHAIN_HEAD,
            inscription_treasury_bps: 7_000,
            attestation_validator_bps: 7_000,
            attestation_treasury_bps: 2_000,
            slash_buyback_bps: 5_000,
            equivocation_reporter_bps: 3_000,
            treasury,
            ecosystem_wallet,
            custodians,
            self_address,
        }
    }

    pub fn is_custodian(&self, who: &Address) -> bool {
        self.custodians.contains(who)
    }

    /// Slot index of a custodian in the upgrade gate.
    pub fn custodian_slot(&self, who: &Address) -> Option<usize> {
        self.custodians.iter().position(|c| c == who)
    }
}
