//! Custos Network Service - Core business logic
//!
//! # Architecture
//! - Deterministic state machine; caller identity and timestamps arrive
//!   per call from the execution environment
//! - Fee pulls land in escrow before state moves; payouts leave after
//! - Injected ports: USDC payment token and the opaque swap venue
//! - Scoped re-entrancy guard around every mutating entry point

use crate::domain::{
    agent::validate_inscription, Agent, AgentRole, Attestation, EpochSnapshot, NetworkConfig,
    NetworkError, NetworkResult,
};
use crate::events::NetworkEvent;
use crate::ports::SwapVenue;
use crate::state::NetworkState;
use serde::{Deserialize, Serialize};
use shared_types::{bps_share, Address, Amount, FungibleToken, Hash, ReentrancyFlag, Timestamp};
use tracing::{debug, warn};

/// Snapshot of the running epoch and pool balances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochStatus {
    pub current_epoch: u64,
    pub epoch_inscriptions: u64,
    pub epoch_reward_pool: Amount,
    pub buyback_pool: Amount,
}

/// Proof-chain network core for one deployment.
pub struct CustosNetworkService<T, S>
where
    T: FungibleToken,
    S: SwapVenue,
{
    config: NetworkConfig,
    paused: bool,
    state: NetworkState,
    events: Vec<NetworkEvent>,
    guard: ReentrancyFlag,
    token: T,
    venue: S,
}

impl<T, S> CustosNetworkService<T, S>
where
    T: FungibleToken,
    S: SwapVenue,
{
    pub fn new(config: NetworkConfig, token: T, venue: S) -> Self {
        Self {
            config,
            paused: false,
            state: NetworkState::new(),
            events: Vec::new(),
            guard: ReentrancyFlag::new(),
            token,
            venue,
        }
    }

    // === REGISTRATION & INSCRIPTION ===

    /// Register the caller's wallet as a new agent. One registration per
    /// wallet; the fixed fee goes straight to treasury.
    pub fn register_agent(
        &mut self,
        caller: Address,
        now: Timestamp,
        name: String,
    ) -> NetworkResult<u64> {
        let _scope = self.guard.enter()?;
        self.ensure_not_paused()?;
        if self.state.agent_by_wallet.contains_key(&caller) {
            return Err(NetworkError::AgentExists);
        }
        let agent = Agent::register(self.state.next_agent_id, caller, name.clone(), now)?;

        if self.config.registration_fee > 0 {
            self.token
                .transfer(caller, self.config.treasury, self.config.registration_fee)?;
        }
        let id = self.state.insert_agent(agent)?;

        self.emit(NetworkEvent::AgentRegistered {
            id,
            wallet: caller,
            name,
            at: now,
        });
        Ok(id)
    }

    /// Append a proof record to the caller's hash chain.
    ///
    /// `prev_hash` must equal the genesis root for the agent's first cycle,
    /// else the agent's current chain head. Any mismatch is a hard
    /// rejection; a broken chain is never silently repaired.
    pub fn inscribe(
        &mut self,
        caller: Address,
        now: Timestamp,
        proof_hash: Hash,
        prev_hash: Hash,
        block_type: String,
        summary: String,
    ) -> NetworkResult<()> {
        let _scope = self.guard.enter()?;
        self.ensure_not_paused()?;
        validate_inscription(&proof_hash, &block_type, &summary)?;

        let id = self.state.agent_id_by_wallet(&caller)?;
        let agent = self.state.agent(id)?;
        if !agent.active {
            return Err(NetworkError::AgentInactive);
        }
        agent.check_inscription_interval(now, self.config.min_inscription_interval)?;

        let expected = agent.expected_prev_hash(self.config.genesis_chain_head);
        if prev_hash != expected {
            warn!(agent_id = id, "chain break rejected");
            return Err(NetworkError::ChainBreak {
                expected,
                presented: prev_hash,
            });
        }

        let fee = self.config.inscription_fee;
        let treasury_share = bps_share(fee, self.config.inscription_treasury_bps);
        let pool_share = fee - treasury_share;

        if fee > 0 {
            self.token.transfer(caller, self.config.self_address, fee)?;
        }

        let cycle = {
            let agent = self.state.agent_mut(id)?;
            agent.advance_chain(proof_hash, now);
            agent.cycle_count
        };
        self.state.epoch.record_inscription(pool_share);

        if treasury_share > 0 {
            self.token
                .transfer(self.config.self_address, self.config.treasury, treasury_share)?;
        }

        self.emit(NetworkEvent::ProofInscribed {
            agent_id: id,
            proof_hash,
            prev_hash,
            block_type,
            cycle,
            at: now,
        });
        Ok(())
    }

    // === VALIDATOR LIFECYCLE ===

    /// Custodian approval of an existing agent as validator.
    pub fn approve_validator(&mut self, caller: Address, agent_id: u64) -> NetworkResult<()> {
        let _scope = self.guard.enter()?;
        self.ensure_custodian(&caller)?;
        let agent = self.state.agent_mut(agent_id)?;
        if !agent.active {
            return Err(NetworkError::AgentInactive);
        }
        if agent.is_validator() {
            return Err(NetworkError::AlreadyValidator);
        }
        agent.role = AgentRole::Validator;
        self.emit(NetworkEvent::ValidatorApproved {
            agent_id,
            by: caller,
        });
        Ok(())
    }

    /// Lock the fixed validator stake, exactly once.
    pub fn lock_validator_stake(&mut self, caller: Address) -> NetworkResult<()> {
        let _scope = self.guard.enter()?;
        self.ensure_not_paused()?;
        let id = self.state.agent_id_by_wallet(&caller)?;
        let agent = self.state.agent(id)?;
        if !agent.is_validator() {
            return Err(NetworkError::NotValidator);
        }
        if agent.validator_stake > 0 {
            return Err(NetworkError::AlreadyStaked);
        }

        let stake = self.config.validator_stake;
        self.token.transfer(caller, self.config.self_address, stake)?;
        self.state.agent_mut(id)?.validator_stake = stake;

        self.emit(NetworkEvent::StakeLocked {
            agent_id: id,
            amount: stake,
        });
        Ok(())
    }

    /// Custodian removal of a validator.
    ///
    /// Non-slash removal returns the full stake to the agent's wallet.
    /// Slash removal splits the stake between the buyback pool and the
    /// acting custodian. Either way the role reverts to Inscriber and the
    /// stake zeroes.
    pub fn remove_validator(
        &mut self,
        caller: Address,
        agent_id: u64,
        reason: String,
        slash: bool,
    ) -> NetworkResult<()> {
        let _scope = self.guard.enter()?;
        self.ensure_custodian(&caller)?;
        let agent = self.state.agent_mut(agent_id)?;
        if !agent.is_validator() {
            return Err(NetworkError::NotValidator);
        }
        let wallet = agent.wallet;
        let stake = agent.demote_and_take_stake();

        let stake_returned = if slash {
            let buyback_share = bps_share(stake, self.config.slash_buyback_bps);
            let custodian_share = stake - buyback_share;
            self.state.buyback_pool += buyback_share;
            if custodian_share > 0 {
                self.token
                    .transfer(self.config.self_address, caller, custodian_share)?;
            }
            0
        } else {
            if stake > 0 {
                self.token.transfer(self.config.self_address, wallet, stake)?;
            }
            stake
        };

        self.emit(NetworkEvent::ValidatorRemoved {
            agent_id,
            by: caller,
            reason,
            slashed: slash,
            stake_returned,
        });
        Ok(())
    }

    // === ATTESTATION & SLASHING ===

    /// Record a validator's claim about an agent's proof. The fee is
    /// charged to the inscribing agent, not the validator, and split
    /// validator / treasury / buyback.
    pub fn attest(
        &mut self,
        caller: Address,
        now: Timestamp,
        agent_id: u64,
        proof_hash: Hash,
        valid: bool,
    ) -> NetworkResult<()> {
        let _scope = self.guard.enter()?;
        self.ensure_not_paused()?;

        let validator_id = self.state.agent_id_by_wallet(&caller)?;
        if !self.state.agent(validator_id)?.is_validator() {
            return Err(NetworkError::NotValidator);
        }
        let subject_wallet = {
            let subject = self.state.agent(agent_id)?;
            if !subject.active {
                return Err(NetworkError::AgentInactive);
            }
            subject.wallet
        };
        if self.state.attestations.has_attested(&proof_hash, &caller) {
            return Err(NetworkError::AlreadyAttested);
        }

        let fee = self.config.attestation_fee;
        let validator_share = bps_share(fee, self.config.attestation_validator_bps);
        let treasury_share = bps_share(fee, self.config.attestation_treasury_bps);
        let buyback_share = fee - validator_share - treasury_share;

        if fee > 0 {
            self.token
                .transfer(subject_wallet, self.config.self_address, fee)?;
        }

        self.state
            .attestations
            .record(proof_hash, caller, valid, now)?;
        self.state.buyback_pool += buyback_share;

        if validator_share > 0 {
            self.token
                .transfer(self.config.self_address, caller, validator_share)?;
        }
        if treasury_share > 0 {
            self.token
                .transfer(self.config.self_address, self.config.treasury, treasury_share)?;
        }

        self.emit(NetworkEvent::AttestationRecorded {
            proof_hash,
            agent_id,
            validator: caller,
            valid,
            at: now,
        });
        Ok(())
    }

    /// Slash a validator whose attestation history for `proof_hash` holds
    /// both a `true` and a `false` claim. Callable by anyone; the reporter
    /// earns a share of the slashed stake.
    ///
    /// The one-attestation-per-proof guard in the attestation book makes
    /// the scanned condition unreachable through the public entry points,
    /// so this path reports `NoEquivocationFound` in practice. The scan is
    /// kept exact rather than widened to a condition the record model does
    /// not actually define.
    pub fn report_equivocation(
        &mut self,
        caller: Address,
        validator: Address,
        proof_hash: Hash,
    ) -> NetworkResult<()> {
        let _scope = self.guard.enter()?;
        if !self
            .state
            .attestations
            .has_equivocation(&proof_hash, &validator)
        {
            return Err(NetworkError::NoEquivocationFound);
        }

        let id = self.state.agent_id_by_wallet(&validator)?;
        let agent = self.state.agent_mut(id)?;
        if !agent.is_validator() {
            return Err(NetworkError::NotValidator);
        }
        let stake = agent.demote_and_take_stake();

        let reporter_share = bps_share(stake, self.config.equivocation_reporter_bps);
        let buyback_share = stake - reporter_share;
        self.state.buyback_pool += buyback_share;

        if reporter_share > 0 {
            self.token
                .transfer(self.config.self_address, caller, reporter_share)?;
        }

        self.emit(NetworkEvent::EquivocationSlashed {
            validator,
            proof_hash,
            reporter: caller,
            reporter_share,
            buyback_share,
        });
        Ok(())
    }

    // === EPOCHS, BUYBACK, TREASURY ===

    /// Close the running epoch: snapshot, reset, advance. The snapshot
    /// event is the only durable record of the closed epoch.
    pub fn close_epoch(&mut self, caller: Address) -> NetworkResult<EpochSnapshot> {
        let _scope = self.guard.enter()?;
        self.ensure_custodian(&caller)?;
        let snapshot = self.state.epoch.close();
        self.emit(NetworkEvent::EpochClosed(snapshot));
        Ok(snapshot)
    }

    /// Spend up to the buyback pool through the swap venue with opaque
    /// calldata. Output is measured as the ecosystem wallet's balance
    /// delta; the calldata itself is not validated beyond call success.
    pub fn execute_buyback(
        &mut self,
        caller: Address,
        amount: Amount,
        swap_calldata: &[u8],
    ) -> NetworkResult<Amount> {
        let _scope = self.guard.enter()?;
        self.ensure_custodian(&caller)?;
        if amount > self.state.buyback_pool {
            return Err(NetworkError::InsufficientPool {
                have: self.state.buyback_pool,
                need: amount,
            });
        }

        let before = self.token.balance_of(self.config.ecosystem_wallet);

        self.token
            .approve(self.config.self_address, self.venue.address(), amount)?;
        if let Err(err) = self.venue.execute(swap_calldata) {
            // revoke the unspent allowance so a failed call leaves nothing
            // behind; the pool is only debited after the venue succeeds
            self.token
                .approve(self.config.self_address, self.venue.address(), 0)?;
            return Err(err.into());
        }
        self.state.buyback_pool -= amount;

        let received = self
            .token
            .balance_of(self.config.ecosystem_wallet)
            .saturating_sub(before);

        self.emit(NetworkEvent::BuybackExecuted {
            spent: amount,
            received,
        });
        Ok(received)
    }

    /// Move uncommitted escrow balance to treasury. Stakes and the two
    /// pools are obligations and never withdrawable this way.
    pub fn withdraw_to_treasury(&mut self, caller: Address, amount: Amount) -> NetworkResult<()> {
        let _scope = self.guard.enter()?;
        self.ensure_custodian(&caller)?;
        let free = self.free_escrow_balance();
        if amount > free {
            return Err(NetworkError::InsufficientFreeBalance {
                have: free,
                need: amount,
            });
        }
        self.token
            .transfer(self.config.self_address, self.config.treasury, amount)?;
        self.emit(NetworkEvent::TreasuryWithdrawal { amount, by: caller });
        Ok(())
    }

    // === ADMIN ===

    pub fn pause(&mut self, caller: Address) -> NetworkResult<()> {
        self.ensure_custodian(&caller)?;
        self.paused = true;
        self.emit(NetworkEvent::Paused);
        Ok(())
    }

    pub fn unpause(&mut self, caller: Address) -> NetworkResult<()> {
        self.ensure_custodian(&caller)?;
        self.paused = false;
        self.emit(NetworkEvent::Unpaused);
        Ok(())
    }

    /// Record a custodian's upgrade proposal; returns the authorized
    /// target once both custodians' latest proposals match.
    pub fn approve_upgrade(
        &mut self,
        caller: Address,
        new_impl: Address,
    ) -> NetworkResult<Option<Address>> {
        let _scope = self.guard.enter()?;
        let slot = self
            .config
            .custodian_slot(&caller)
            .ok_or(NetworkError::NotCustodian)?;
        let authorized = self.state.upgrade.approve(slot, new_impl)?;

        self.emit(NetworkEvent::UpgradeProposed {
            custodian: caller,
            target: new_impl,
        });
        if let Some(target) = authorized {
            self.emit(NetworkEvent::UpgradeAuthorized { target });
        }
        Ok(authorized)
    }

    // === VIEWS ===

    pub fn get_agent(&self, id: u64) -> NetworkResult<Agent> {
        self.state.agent(id).cloned()
    }

    pub fn get_agent_by_wallet(&self, wallet: Address) -> NetworkResult<Agent> {
        let id = self.state.agent_id_by_wallet(&wallet)?;
        self.state.agent(id).cloned()
    }

    pub fn get_attestations(&self, proof_hash: Hash) -> Vec<Attestation> {
        self.state.attestations.for_proof(&proof_hash).to_vec()
    }

    pub fn epoch_status(&self) -> EpochStatus {
        EpochStatus {
            current_epoch: self.state.epoch.current_epoch,
            epoch_inscriptions: self.state.epoch.epoch_inscriptions,
            epoch_reward_pool: self.state.epoch.epoch_reward_pool,
            buyback_pool: self.state.buyback_pool,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Read access to the payment port, for balance assertions in tests
    /// and tooling.
    pub fn token(&self) -> &T {
        &self.token
    }

    /// Drain the accumulated audit events.
    pub fn drain_events(&mut self) -> Vec<NetworkEvent> {
        std::mem::take(&mut self.events)
    }

    // === INTERNAL ===

    fn ensure_not_paused(&self) -> NetworkResult<()> {
        if self.paused {
            return Err(NetworkError::Paused);
        }
        Ok(())
    }

    fn ensure_custodian(&self, caller: &Address) -> NetworkResult<()> {
        if !self.config.is_custodian(caller) {
            return Err(NetworkError::NotCustodian);
        }
        Ok(())
    }

    /// Escrow held under the core's address minus the outstanding
    /// obligations: locked stakes and both pools.
    fn free_escrow_balance(&self) -> Amount {
        let obligations: Amount = self
            .state
            .agents
            .values()
            .map(|a| a.validator_stake)
            .sum::<Amount>()
            + self.state.epoch.epoch_reward_pool
            + self.state.buyback_pool;
        self.token
            .balance_of(self.config.self_address)
            .saturating_sub(obligations)
    }

    fn emit(&mut self, event: NetworkEvent) {
        debug!(?event, "network event");
        self.events.push(event);
    }
}

impl<T, S> std::fmt::Debug for CustosNetworkService<T, S>
where
    T: FungibleToken,
    S: SwapVenue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustosNetworkService")
            .field("paused", &self.paused)
            .field("agents", &self.state.agents.len())
            .field("epoch", &self.state.epoch.current_epoch)
            .finish()
    }
}
