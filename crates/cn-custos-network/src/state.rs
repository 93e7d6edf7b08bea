//! Committed state for one network instance.
//!
//! Explicit keyed stores owned by the service instance; records persist
//! indefinitely, nothing is garbage collected.

use crate::domain::{Agent, AttestationBook, EpochLedger, NetworkError, NetworkResult, UpgradeGate};
use shared_types::{Address, Amount};
use std::collections::HashMap;

/// All persistent network state.
#[derive(Debug)]
pub struct NetworkState {
    pub(crate) agents: HashMap<u64, Agent>,
    pub(crate) agent_by_wallet: HashMap<Address, u64>,
    pub(crate) next_agent_id: u64,
    pub(crate) attestations: AttestationBook,
    pub(crate) epoch: EpochLedger,
    /// Buyback funds accumulated from fee shares and slashes; escrowed under
    /// the core's own address alongside stakes and the epoch pool.
    pub(crate) buyback_pool: Amount,
    pub(crate) upgrade: UpgradeGate,
}

impl NetworkState {
    pub fn new() -> Self {
        Self {
            agents: HashMap::new(),
            agent_by_wallet: HashMap::new(),
            next_agent_id: 1,
            attestations: AttestationBook::new(),
            epoch: EpochLedger::new(),
            buyback_pool: 0,
            upgrade: UpgradeGate::new(),
        }
    }

    pub fn agent(&self, id: u64) -> NetworkResult<&Agent> {
        self.agents.get(&id).ok_or(NetworkError::AgentNotFound)
    }

    pub fn agent_mut(&mut self, id: u64) -> NetworkResult<&mut Agent> {
        self.agents.get_mut(&id).ok_or(NetworkError::AgentNotFound)
    }

    pub fn agent_id_by_wallet(&self, wallet: &Address) -> NetworkResult<u64> {
        self.agent_by_wallet
            .get(wallet)
            .copied()
            .ok_or(NetworkError::AgentNotFound)
    }

    /// Insert a freshly registered agent, enforcing one per wallet.
    pub(crate) fn insert_agent(&mut self, agent: Agent) -> NetworkResult<u64> {
        if self.agent_by_wallet.contains_key(&agent.wallet) {
            return Err(NetworkError::AgentExists);
        }
        let id = agent.id;
        self.agent_by_wallet.insert(agent.wallet, id);
        self.agents.insert(id, agent);
        self.next_agent_id += 1;
        Ok(id)
    }
}

impl Default for NetworkState {
    fn default() -> Self {
        Self::new()
    }
}
