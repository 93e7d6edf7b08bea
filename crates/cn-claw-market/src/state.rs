//! Committed state for one market namespace.
//!
//! Explicit keyed stores owned by the service instance; nothing is global,
//! so isolated instances can coexist in tests.

use crate::domain::{AgentMetadata, IdentityKey, Market, MarketError, MarketResult};
use shared_types::{Address, Hash};
use std::collections::{HashMap, HashSet};

/// All persistent bonding-market state. Records are never deleted.
#[derive(Debug, Default)]
pub struct MarketState {
    pub(crate) markets: HashMap<IdentityKey, Market>,
    pub(crate) balances: HashMap<(IdentityKey, Address), u64>,
    pub(crate) metadata: HashMap<IdentityKey, AgentMetadata>,
    pub(crate) whitelisted_wallets: HashSet<Address>,
    pub(crate) whitelisted_keys: HashSet<IdentityKey>,
    /// Consumed claim digests (replay protection).
    pub(crate) used_digests: HashSet<Hash>,
}

impl MarketState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn market(&self, key: &IdentityKey) -> MarketResult<&Market> {
        self.markets.get(key).ok_or(MarketError::MarketNotFound)
    }

    pub fn market_mut(&mut self, key: &IdentityKey) -> MarketResult<&mut Market> {
        self.markets.get_mut(key).ok_or(MarketError::MarketNotFound)
    }

    pub fn balance(&self, key: &IdentityKey, holder: &Address) -> u64 {
        self.balances.get(&(*key, *holder)).copied().unwrap_or(0)
    }

    pub(crate) fn credit_units(&mut self, key: IdentityKey, holder: Address, units: u64) {
        *self.balances.entry((key, holder)).or_default() += units;
    }

    pub(crate) fn debit_units(
        &mut self,
        key: IdentityKey,
        holder: Address,
        units: u64,
    ) -> MarketResult<()> {
        let balance = self.balances.entry((key, holder)).or_default();
        if *balance < units {
            return Err(MarketError::InsufficientUnits {
                have: *balance,
                need: units,
            });
        }
        *balance -= units;
        Ok(())
    }
}
