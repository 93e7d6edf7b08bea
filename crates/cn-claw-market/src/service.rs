//! Claw Market Service - Core business logic
//!
//! # Architecture
//! - Deterministic state machine; caller identity and timestamps arrive
//!   per call from the execution environment
//! - Checks-effects-interactions ordering on every mutating entry point
//! - Injected ports: payment token and verifier-signature recovery
//! - Scoped re-entrancy guard around every mutating entry point

use crate::domain::{
    AgentClaim, AgentMetadata, BuyCostBreakdown, FeeConfig, IdentityKey, KeyDerivation,
    KeySource, Market, MarketConfig, MarketError, MarketResult, MarketView, PricingPolicy,
    SellProceedsBreakdown, WhitelistEntry, fees::check_fee_cap, NO_COST_LIMIT,
};
use crate::events::{MarketEvent, TradeSide};
use crate::state::MarketState;
use shared_crypto::{SignerRecovery, WireSignature};
use shared_types::{Address, Amount, Bps, FungibleToken, ReentrancyFlag, Timestamp};
use tracing::{debug, warn};

/// Bonding-market core for one namespace of markets.
pub struct ClawMarketService<T, R>
where
    T: FungibleToken,
    R: SignerRecovery,
{
    config: MarketConfig,
    fees: FeeConfig,
    owner: Address,
    pending_owner: Option<Address>,
    verifier: Address,
    treasury: Address,
    paused: bool,
    state: MarketState,
    events: Vec<MarketEvent>,
    guard: ReentrancyFlag,
    token: T,
    recovery: R,
}

impl<T, R> ClawMarketService<T, R>
where
    T: FungibleToken,
    R: SignerRecovery,
{
    pub fn new(
        config: MarketConfig,
        fees: FeeConfig,
        owner: Address,
        verifier: Address,
        treasury: Address,
        token: T,
        recovery: R,
    ) -> Self {
        Self {
            config,
            fees,
            owner,
            pending_owner: None,
            verifier,
            treasury,
            paused: false,
            state: MarketState::new(),
            events: Vec::new(),
            guard: ReentrancyFlag::new(),
            token,
            recovery,
        }
    }

    // === KEY RESOLUTION ===

    /// Resolve caller-supplied key material against this namespace's
    /// derivation mode. Handle and FID namespaces never mix.
    pub fn resolve_key(&self, source: &KeySource) -> MarketResult<IdentityKey> {
        match (self.config.key_derivation, source) {
            (KeyDerivation::Handle, KeySource::Handle(handle)) => {
                IdentityKey::from_handle(handle)
            }
            (KeyDerivation::Fid, KeySource::Fid(fid)) => Ok(IdentityKey::from_fid(*fid)),
            _ => Err(MarketError::KeyDerivationMismatch),
        }
    }

    // === TRADING ===

    /// Create a market record explicitly. Idempotency: a second creation
    /// attempt on an existing key fails.
    pub fn create_market(
        &mut self,
        _caller: Address,
        now: Timestamp,
        key: IdentityKey,
        display_label: String,
    ) -> MarketResult<()> {
        let _scope = self.guard.enter()?;
        if self.state.markets.contains_key(&key) {
            return Err(MarketError::MarketExists);
        }
        self.state
            .markets
            .insert(key, Market::new(now, display_label.clone()));
        self.emit(MarketEvent::MarketCreated {
            key,
            display_label,
            at: now,
        });
        Ok(())
    }

    /// Buy `amount` units against the curve.
    ///
    /// `payment` is the value attached to the call; exactly the total cost
    /// is taken and any excess stays with the buyer. `max_cost` is the
    /// slippage bound (`NO_COST_LIMIT` disables it).
    pub fn buy_claws(
        &mut self,
        caller: Address,
        now: Timestamp,
        key: IdentityKey,
        amount: u64,
        max_cost: Amount,
        payment: Amount,
    ) -> MarketResult<BuyCostBreakdown> {
        let _scope = self.guard.enter()?;
        self.ensure_not_paused()?;
        if amount == 0 {
            return Err(MarketError::ZeroAmount);
        }

        let supply = self.state.markets.get(&key).map_or(0, |m| m.supply);
        let floor_whitelisted = self.whitelisted_for_floor(&caller, &key);
        self.config
            .policy
            .check_first_buy_floor(floor_whitelisted, supply, amount)?;

        let quote = self.config.policy.quote_buy(
            &self.config.curve,
            self.state.whitelisted_keys.contains(&key),
            supply,
            amount,
        )?;
        let breakdown = BuyCostBreakdown::new(quote.base_price, self.fees.split(quote.base_price));

        if max_cost != NO_COST_LIMIT && breakdown.total_cost > max_cost {
            return Err(MarketError::MaxCostExceeded {
                total_cost: breakdown.total_cost,
                max_cost,
            });
        }
        if payment < breakdown.total_cost {
            return Err(MarketError::InsufficientPayment {
                supplied: payment,
                required: breakdown.total_cost,
            });
        }

        // payment leg: the attached value lands in escrow before state
        // moves; only the total cost is taken
        if breakdown.total_cost > 0 {
            self.token
                .transfer(caller, self.config.self_address, breakdown.total_cost)?;
        }

        let implicit_creation = !self.state.markets.contains_key(&key);
        let market = self
            .state
            .markets
            .entry(key)
            .or_insert_with(|| Market::new(now, String::new()));
        market.supply += quote.units_out;
        market.pending_fees += breakdown.agent_fee;
        market.lifetime_fees += breakdown.agent_fee;
        market.lifetime_volume += breakdown.base_price;
        let supply_after = market.supply;
        self.state.credit_units(key, caller, quote.units_out);

        // an indexer replaying the log must see every market created
        // before its first trade, implicit creations included
        if implicit_creation {
            self.emit(MarketEvent::MarketCreated {
                key,
                display_label: String::new(),
                at: now,
            });
        }

        if breakdown.protocol_fee > 0 {
            self.token
                .transfer(self.config.self_address, self.treasury, breakdown.protocol_fee)?;
        }

        self.emit(MarketEvent::TradeExecuted {
            key,
            trader: caller,
            side: TradeSide::Buy,
            units: quote.units_out,
            base_price: breakdown.base_price,
            protocol_fee: breakdown.protocol_fee,
            agent_fee: breakdown.agent_fee,
            supply_after,
        });
        Ok(breakdown)
    }

    /// Sell `amount` units back to the curve.
    ///
    /// A market can never be drained to zero: selling the entire supply is
    /// rejected so the curve keeps its reference point.
    pub fn sell_claws(
        &mut self,
        caller: Address,
        _now: Timestamp,
        key: IdentityKey,
        amount: u64,
        min_proceeds: Amount,
    ) -> MarketResult<SellProceedsBreakdown> {
        let _scope = self.guard.enter()?;
        self.ensure_not_paused()?;
        if amount == 0 {
            return Err(MarketError::ZeroAmount);
        }

        let supply = self.state.market(&key)?.supply;
        if amount >= supply {
            return Err(MarketError::WouldDrainMarket { supply });
        }
        let have = self.state.balance(&key, &caller);
        if have < amount {
            return Err(MarketError::InsufficientUnits { have, need: amount });
        }

        let base_price = self
            .config
            .policy
            .quote_sell(&self.config.curve, supply, amount)?;
        let breakdown = SellProceedsBreakdown::new(base_price, self.fees.split(base_price));

        if breakdown.proceeds < min_proceeds {
            return Err(MarketError::MinProceedsNotMet {
                proceeds: breakdown.proceeds,
                min_proceeds,
            });
        }

        // effects commit before any value leaves escrow
        self.state.debit_units(key, caller, amount)?;
        let market = self.state.market_mut(&key)?;
        market.supply -= amount;
        market.pending_fees += breakdown.agent_fee;
        market.lifetime_fees += breakdown.agent_fee;
        market.lifetime_volume += breakdown.base_price;
        let supply_after = market.supply;

        if breakdown.proceeds > 0 {
            self.token
                .transfer(self.config.self_address, caller, breakdown.proceeds)?;
        }
        if breakdown.protocol_fee > 0 {
            self.token
                .transfer(self.config.self_address, self.treasury, breakdown.protocol_fee)?;
        }

        self.emit(MarketEvent::TradeExecuted {
            key,
            trader: caller,
            side: TradeSide::Sell,
            units: amount,
            base_price: breakdown.base_price,
            protocol_fee: breakdown.protocol_fee,
            agent_fee: breakdown.agent_fee,
            supply_after,
        });
        Ok(breakdown)
    }

    // === VERIFICATION & SELF-SERVICE ===

    /// Verify a claim signed by the configured verifier, bind the wallet,
    /// and flush pending fees to it atomically.
    pub fn verify_and_claim(
        &mut self,
        now: Timestamp,
        claim: &AgentClaim,
        signature: &WireSignature,
    ) -> MarketResult<()> {
        let _scope = self.guard.enter()?;
        let market = self.state.market(&claim.key)?;
        if market.is_verified() {
            return Err(MarketError::AlreadyVerified);
        }
        if claim.is_expired(now) {
            return Err(MarketError::SignatureExpired {
                issued: claim.timestamp,
                now,
            });
        }

        let digest = claim.digest(&self.config.typed_domain());
        if self.state.used_digests.contains(&digest) {
            return Err(MarketError::DigestAlreadyUsed);
        }
        let signer = self.recovery.recover(&digest, signature)?;
        if signer != self.verifier {
            warn!(?signer, "verification attempt with untrusted signer");
            return Err(MarketError::UntrustedSigner);
        }

        self.state.used_digests.insert(digest);
        let market = self.state.market_mut(&claim.key)?;
        market.bind_wallet(claim.wallet)?;
        let pending = market.take_pending_fees();

        if pending > 0 {
            self.token
                .transfer(self.config.self_address, claim.wallet, pending)?;
        }

        self.emit(MarketEvent::VerificationBound {
            key: claim.key,
            wallet: claim.wallet,
        });
        if pending > 0 {
            self.emit(MarketEvent::FeesClaimed {
                key: claim.key,
                wallet: claim.wallet,
                amount: pending,
            });
        }
        Ok(())
    }

    /// Pay out pending fees to the bound wallet. Possession-based auth:
    /// only the bound wallet may call.
    pub fn claim_fees(&mut self, caller: Address, key: IdentityKey) -> MarketResult<Amount> {
        let _scope = self.guard.enter()?;
        self.ensure_bound_wallet(&key, &caller)?;

        let market = self.state.market_mut(&key)?;
        if market.pending_fees == 0 {
            return Err(MarketError::NoPendingFees);
        }
        let amount = market.take_pending_fees();

        self.token
            .transfer(self.config.self_address, caller, amount)?;

        self.emit(MarketEvent::FeesClaimed {
            key,
            wallet: caller,
            amount,
        });
        Ok(amount)
    }

    /// Set metadata for a verified identity. Persists across revocation.
    pub fn set_agent_metadata(
        &mut self,
        caller: Address,
        key: IdentityKey,
        metadata: AgentMetadata,
    ) -> MarketResult<()> {
        let _scope = self.guard.enter()?;
        self.ensure_bound_wallet(&key, &caller)?;
        metadata.validate()?;
        self.state.metadata.insert(key, metadata);
        self.emit(MarketEvent::MetadataUpdated { key });
        Ok(())
    }

    /// Rebind the caller's own verified wallet to a new address.
    pub fn update_my_wallet(
        &mut self,
        caller: Address,
        key: IdentityKey,
        new_wallet: Address,
    ) -> MarketResult<()> {
        let _scope = self.guard.enter()?;
        self.ensure_bound_wallet(&key, &caller)?;
        self.state.market_mut(&key)?.rebind_wallet(new_wallet)?;
        self.emit(MarketEvent::WalletRebound {
            key,
            old_wallet: caller,
            new_wallet,
            by_admin: false,
        });
        Ok(())
    }

    // === ADMIN ===

    /// Owner force-rebind of a verified wallet (dispute resolution).
    /// Supply, balances, and pending fees are untouched.
    pub fn update_agent_wallet(
        &mut self,
        caller: Address,
        key: IdentityKey,
        new_wallet: Address,
    ) -> MarketResult<()> {
        let _scope = self.guard.enter()?;
        self.ensure_owner(&caller)?;
        let market = self.state.market_mut(&key)?;
        let old_wallet = market.verified_wallet.ok_or(MarketError::NotVerified)?;
        market.rebind_wallet(new_wallet)?;
        self.emit(MarketEvent::WalletRebound {
            key,
            old_wallet,
            new_wallet,
            by_admin: true,
        });
        Ok(())
    }

    /// Owner revoke of a verification binding. The identity may re-verify
    /// afterward, possibly with a different wallet.
    pub fn revoke_verification(
        &mut self,
        caller: Address,
        key: IdentityKey,
    ) -> MarketResult<()> {
        let _scope = self.guard.enter()?;
        self.ensure_owner(&caller)?;
        let market = self.state.market_mut(&key)?;
        let wallet = market.verified_wallet.ok_or(MarketError::NotVerified)?;
        market.revoke()?;
        self.emit(MarketEvent::VerificationRevoked { key, wallet });
        Ok(())
    }

    pub fn set_verifier(&mut self, caller: Address, new: Address) -> MarketResult<()> {
        self.ensure_owner(&caller)?;
        let old = std::mem::replace(&mut self.verifier, new);
        self.emit(MarketEvent::VerifierChanged { old, new });
        Ok(())
    }

    pub fn set_treasury(&mut self, caller: Address, new: Address) -> MarketResult<()> {
        self.ensure_owner(&caller)?;
        let old = std::mem::replace(&mut self.treasury, new);
        self.emit(MarketEvent::TreasuryChanged { old, new });
        Ok(())
    }

    pub fn set_protocol_fee_bps(&mut self, caller: Address, bps: Bps) -> MarketResult<()> {
        self.ensure_owner(&caller)?;
        check_fee_cap(bps)?;
        let old_bps = std::mem::replace(&mut self.fees.protocol_bps, bps);
        self.emit(MarketEvent::ProtocolFeeChanged {
            old_bps,
            new_bps: bps,
        });
        Ok(())
    }

    pub fn set_agent_fee_bps(&mut self, caller: Address, bps: Bps) -> MarketResult<()> {
        self.ensure_owner(&caller)?;
        check_fee_cap(bps)?;
        let old_bps = std::mem::replace(&mut self.fees.agent_bps, bps);
        self.emit(MarketEvent::AgentFeeChanged {
            old_bps,
            new_bps: bps,
        });
        Ok(())
    }

    pub fn set_whitelisted(
        &mut self,
        caller: Address,
        entry: WhitelistEntry,
        allowed: bool,
    ) -> MarketResult<()> {
        self.ensure_owner(&caller)?;
        self.apply_whitelist(entry, allowed);
        Ok(())
    }

    pub fn set_whitelisted_batch(
        &mut self,
        caller: Address,
        entries: Vec<WhitelistEntry>,
        allowed: bool,
    ) -> MarketResult<()> {
        self.ensure_owner(&caller)?;
        for entry in entries {
            self.apply_whitelist(entry, allowed);
        }
        Ok(())
    }

    pub fn pause(&mut self, caller: Address) -> MarketResult<()> {
        self.ensure_owner(&caller)?;
        self.paused = true;
        self.emit(MarketEvent::Paused);
        Ok(())
    }

    pub fn unpause(&mut self, caller: Address) -> MarketResult<()> {
        self.ensure_owner(&caller)?;
        self.paused = false;
        self.emit(MarketEvent::Unpaused);
        Ok(())
    }

    /// Begin the two-step ownership handover.
    pub fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> MarketResult<()> {
        self.ensure_owner(&caller)?;
        self.pending_owner = Some(new_owner);
        self.emit(MarketEvent::OwnershipTransferStarted {
            owner: self.owner,
            pending_owner: new_owner,
        });
        Ok(())
    }

    /// Complete the handover; only the pending owner may accept.
    pub fn accept_ownership(&mut self, caller: Address) -> MarketResult<()> {
        if self.pending_owner != Some(caller) {
            return Err(MarketError::NotPendingOwner);
        }
        let old_owner = std::mem::replace(&mut self.owner, caller);
        self.pending_owner = None;
        self.emit(MarketEvent::OwnershipTransferred {
            old_owner,
            new_owner: caller,
        });
        Ok(())
    }

    // === VIEWS ===

    pub fn get_market(&self, key: IdentityKey) -> MarketResult<MarketView> {
        let market = self.state.market(&key)?;
        Ok(MarketView {
            key,
            supply: market.supply,
            pending_fees: market.pending_fees,
            lifetime_fees: market.lifetime_fees,
            lifetime_volume: market.lifetime_volume,
            verified_wallet: market.verified_wallet,
            is_verified: market.is_verified(),
            created_at: market.created_at,
            display_label: market.display_label.clone(),
            current_price: self.config.curve.price(market.supply, 1)?,
        })
    }

    pub fn get_balance(&self, key: IdentityKey, holder: Address) -> u64 {
        self.state.balance(&key, &holder)
    }

    /// Base price of buying `amount` units at the current supply. Quoting a
    /// market that does not exist yet prices from supply 0.
    pub fn get_buy_price(&self, key: IdentityKey, amount: u64) -> MarketResult<Amount> {
        let supply = self.state.markets.get(&key).map_or(0, |m| m.supply);
        Ok(self
            .config
            .policy
            .quote_buy(
                &self.config.curve,
                self.state.whitelisted_keys.contains(&key),
                supply,
                amount,
            )?
            .base_price)
    }

    /// Base proceeds of selling `amount` units at the current supply.
    pub fn get_sell_price(&self, key: IdentityKey, amount: u64) -> MarketResult<Amount> {
        let supply = self.state.market(&key)?.supply;
        if amount >= supply {
            return Err(MarketError::WouldDrainMarket { supply });
        }
        self.config
            .policy
            .quote_sell(&self.config.curve, supply, amount)
    }

    /// Price of the next unit on the curve.
    pub fn get_current_price(&self, key: IdentityKey) -> MarketResult<Amount> {
        let supply = self.state.markets.get(&key).map_or(0, |m| m.supply);
        self.config.curve.price(supply, 1)
    }

    pub fn get_buy_cost_breakdown(
        &self,
        key: IdentityKey,
        amount: u64,
    ) -> MarketResult<BuyCostBreakdown> {
        let base = self.get_buy_price(key, amount)?;
        Ok(BuyCostBreakdown::new(base, self.fees.split(base)))
    }

    pub fn get_sell_proceeds_breakdown(
        &self,
        key: IdentityKey,
        amount: u64,
    ) -> MarketResult<SellProceedsBreakdown> {
        let base = self.get_sell_price(key, amount)?;
        Ok(SellProceedsBreakdown::new(base, self.fees.split(base)))
    }

    pub fn get_agent_metadata(&self, key: IdentityKey) -> Option<AgentMetadata> {
        self.state.metadata.get(&key).cloned()
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn verifier(&self) -> Address {
        self.verifier
    }

    pub fn treasury(&self) -> Address {
        self.treasury
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn fee_config(&self) -> FeeConfig {
        self.fees
    }

    /// Read access to the payment port, for balance assertions in tests
    /// and tooling.
    pub fn token(&self) -> &T {
        &self.token
    }

    /// Drain the accumulated audit events.
    pub fn drain_events(&mut self) -> Vec<MarketEvent> {
        std::mem::take(&mut self.events)
    }

    // === INTERNAL ===

    fn ensure_not_paused(&self) -> MarketResult<()> {
        if self.paused {
            return Err(MarketError::Paused);
        }
        Ok(())
    }

    fn ensure_owner(&self, caller: &Address) -> MarketResult<()> {
        if *caller != self.owner {
            return Err(MarketError::NotOwner);
        }
        Ok(())
    }

    fn ensure_bound_wallet(&self, key: &IdentityKey, caller: &Address) -> MarketResult<()> {
        let market = self.state.market(key)?;
        match market.verified_wallet {
            None => Err(MarketError::NotVerified),
            Some(wallet) if wallet != *caller => Err(MarketError::NotVerifiedWallet(*caller)),
            Some(_) => Ok(()),
        }
    }

    /// Whitelist scope for the first-buy floor: buyer wallets under the
    /// flat policy, identity keys under the legacy policy.
    fn whitelisted_for_floor(&self, buyer: &Address, key: &IdentityKey) -> bool {
        match self.config.policy {
            PricingPolicy::FlatFreeFirstUnit => self.state.whitelisted_wallets.contains(buyer),
            PricingPolicy::LegacyWhitelistBonus => self.state.whitelisted_keys.contains(key),
        }
    }

    fn apply_whitelist(&mut self, entry: WhitelistEntry, allowed: bool) {
        match entry {
            WhitelistEntry::Wallet(wallet) => {
                if allowed {
                    self.state.whitelisted_wallets.insert(wallet);
                } else {
                    self.state.whitelisted_wallets.remove(&wallet);
                }
            }
            WhitelistEntry::Key(key) => {
                if allowed {
                    self.state.whitelisted_keys.insert(key);
                } else {
                    self.state.whitelisted_keys.remove(&key);
                }
            }
        }
        self.emit(MarketEvent::WhitelistUpdated { entry, allowed });
    }

    fn emit(&mut self, event: MarketEvent) {
        debug!(?event, "market event");
        self.events.push(event);
    }
}

impl<T, R> std::fmt::Debug for ClawMarketService<T, R>
where
    T: FungibleToken,
    R: SignerRecovery,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClawMarketService")
            .field("owner", &self.owner)
            .field("paused", &self.paused)
            .field("markets", &self.state.markets.len())
            .finish()
    }
}
