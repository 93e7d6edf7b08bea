//! # Epoch Ledger
//!
//! A counter plus two per-epoch accumulators. Closing an epoch snapshots
//! both, resets them, and advances the counter. No historical archive is
//! kept; the emitted close event is the only record of a past epoch.

use serde::{Deserialize, Serialize};
use shared_types::Amount;

/// Per-epoch running state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochLedger {
    pub current_epoch: u64,
    pub epoch_inscriptions: u64,
    pub epoch_reward_pool: Amount,
}

/// Snapshot taken when an epoch closes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochSnapshot {
    pub epoch: u64,
    pub inscriptions: u64,
    pub reward_pool: Amount,
}

impl EpochLedger {
    pub fn new() -> Self {
        Self {
            current_epoch: 1,
            epoch_inscriptions: 0,
            epoch_reward_pool: 0,
        }
    }

    pub fn record_inscription(&mut self, pool_share: Amount) {
        self.epoch_inscriptions += 1;
        self.epoch_reward_pool += pool_share;
    }

    /// Snapshot and reset the accumulators, advancing the counter.
    pub fn close(&mut self) -> EpochSnapshot {
        let snapshot = EpochSnapshot {
            epoch: self.current_epoch,
            inscriptions: std::mem::take(&mut self.epoch_inscriptions),
            reward_pool: std::mem::take(&mut self.epoch_reward_pool),
        };
        self.current_epoch += 1;
        snapshot
    }
}

impl Default for EpochLedger {
    fn default() -> Self {
        Self::new()
    }
}
