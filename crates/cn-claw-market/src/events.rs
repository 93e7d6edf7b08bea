//! Audit events emitted by the bonding-market core.
//!
//! Events accumulate in a drainable log on the service and are mirrored to
//! `tracing`; off-protocol indexers rely on them for history the committed
//! state does not retain.

use crate::domain::{IdentityKey, WhitelistEntry};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, Bps, Timestamp};

/// Which side of the curve a trade hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
}

/// Bonding-market audit events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEvent {
    MarketCreated {
        key: IdentityKey,
        display_label: String,
        at: Timestamp,
    },
    TradeExecuted {
        key: IdentityKey,
        trader: Address,
        side: TradeSide,
        units: u64,
        base_price: Amount,
        protocol_fee: Amount,
        agent_fee: Amount,
        supply_after: u64,
    },
    VerificationBound {
        key: IdentityKey,
        wallet: Address,
    },
    VerificationRevoked {
        key: IdentityKey,
        wallet: Address,
    },
    WalletRebound {
        key: IdentityKey,
        old_wallet: Address,
        new_wallet: Address,
        by_admin: bool,
    },
    FeesClaimed {
        key: IdentityKey,
        wallet: Address,
        amount: Amount,
    },
    MetadataUpdated {
        key: IdentityKey,
    },
    WhitelistUpdated {
        entry: WhitelistEntry,
        allowed: bool,
    },
    ProtocolFeeChanged {
        old_bps: Bps,
        new_bps: Bps,
    },
    AgentFeeChanged {
        old_bps: Bps,
        new_bps: Bps,
    },
    VerifierChanged {
        old: Address,
        new: Address,
    },
    TreasuryChanged {
        old: Address,
        new: Address,
    },
    Paused,
    Unpaused,
    OwnershipTransferStarted {
        owner: Address,
        pending_owner: Address,
    },
    OwnershipTransferred {
        old_owner: Address,
        new_owner: Address,
    },
}
