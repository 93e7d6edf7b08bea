//! # Upgrade Gate
//!
//! 2-of-2 custodian approval over a proposed logic address. Each custodian
//! records its most recent proposal in its own slot; when both slots hold
//! the identical target the upgrade is authorized and both slots clear, so
//! stale approvals can never be replayed.

use super::error::{NetworkError, NetworkResult};
use serde::{Deserialize, Serialize};
use shared_types::{Address, ZERO_ADDRESS};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeGate {
    proposals: [Option<Address>; 2],
}

impl UpgradeGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record custodian `slot`'s proposal. Returns the authorized target
    /// when both custodians' latest proposals match, clearing both slots.
    pub fn approve(&mut self, slot: usize, target: Address) -> NetworkResult<Option<Address>> {
        if target == ZERO_ADDRESS {
            return Err(NetworkError::ZeroUpgradeTarget(target));
        }
        self.proposals[slot] = Some(target);
        if self.proposals[0] == self.proposals[1] {
            self.proposals = [None, None];
            return Ok(Some(target));
        }
        Ok(None)
    }

    pub fn pending(&self, slot: usize) -> Option<Address> {
        self.proposals[slot]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMPL_A: Address = [0xA1; 20];
    const IMPL_B: Address = [0xB2; 20];

    #[test]
    fn test_requires_both_custodians() {
        let mut gate = UpgradeGate::new();
        assert_eq!(gate.approve(0, IMPL_A).unwrap(), None);
        assert_eq!(gate.pending(0), Some(IMPL_A));

        assert_eq!(gate.approve(1, IMPL_A).unwrap(), Some(IMPL_A));
        // both slots cleared after a match
        assert_eq!(gate.pending(0), None);
        assert_eq!(gate.pending(1), None);
    }

    #[test]
    fn test_mismatched_targets_do_not_authorize() {
        let mut gate = UpgradeGate::new();
        gate.approve(0, IMPL_A).unwrap();
        assert_eq!(gate.approve(1, IMPL_B).unwrap(), None);

        // a custodian may overwrite its own proposal to converge
        assert_eq!(gate.approve(0, IMPL_B).unwrap(), Some(IMPL_B));
    }

    #[test]
    fn test_stale_approval_not_replayable() {
        let mut gate = UpgradeGate::new();
        gate.approve(0, IMPL_A).unwrap();
        gate.approve(1, IMPL_A).unwrap();

        // the matched pair was consumed; a single fresh approval is not enough
        assert_eq!(gate.approve(0, IMPL_A).unwrap(), None);
    }

    #[test]
    fn test_zero_target_rejected() {
        let mut gate = UpgradeGate::new();
        assert_eq!(
            gate.approve(0, ZERO_ADDRESS).unwrap_err(),
            NetworkError::ZeroUpgradeTarget(ZERO_ADDRESS)
        );
    }
}
