//! Audit events emitted by the network core.
//!
//! The committed state keeps no epoch history; the `EpochClosed` event is
//! the only record of a closed epoch, so indexers must retain the drained
//! log.

use crate::domain::EpochSnapshot;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, Hash, Timestamp};

/// Network audit events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkEvent {
    AgentRegistered {
        id: u64,
        wallet: Address,
        name: String,
        at: Timestamp,
    },
    ProofInscribed {
        agent_id: u64,
        proof_hash: Hash,
        prev_hash: Hash,
        block_type: String,
        cycle: u64,
        at: Timestamp,
    },
    ValidatorApproved {
        agent_id: u64,
        by: Address,
    },
    StakeLocked {
        agent_id: u64,
        amount: Amount,
    },
    ValidatorRemoved {
        agent_id: u64,
        by: Address,
        reason: String,
        slashed: bool,
        stake_returned: Amount,
    },
    AttestationRecorded {
        proof_hash: Hash,
        agent_id: u64,
        validator: Address,
        valid: bool,
        at: Timestamp,
    },
    EquivocationSlashed {
        validator: Address,
        proof_hash: Hash,
        reporter: Address,
        reporter_share: Amount,
        buyback_share: Amount,
    },
    EpochClosed(EpochSnapshot),
    BuybackExecuted {
        spent: Amount,
        received: Amount,
    },
    TreasuryWithdrawal {
        amount: Amount,
        by: Address,
    },
    UpgradeProposed {
        custodian: Address,
        target: Address,
    },
    UpgradeAuthorized {
        target: Address,
    },
    Paused,
    Unpaused,
}
