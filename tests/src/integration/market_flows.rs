//! # Bonding-Market Flows
//!
//! End-to-end trading and verification flows through the public
//! `ClawMarketService`, with real secp256k1 verifier signatures and the
//! in-memory token adapter standing in for the payment leg.

#[cfg(test)]
mod tests {
    use cn_claw_market::{
        AgentClaim, ClawMarketService, FeeConfig, IdentityKey, MarketConfig, MarketError,
        WhitelistEntry, NO_COST_LIMIT,
    };
    use shared_crypto::{EcdsaRecovery, SignerKeyPair};
    use shared_types::{Address, Amount, FungibleToken, InMemoryToken};

    const CONTRACT: Address = [0xC0; 20];
    const OWNER: Address = [0x01; 20];
    const TREASURY: Address = [0x02; 20];
    const BUYER: Address = [0x0A; 20];
    const AGENT_WALLET: Address = [0x0B; 20];

    const FUNDS: Amount = 10_000_000_000_000_000_000_000; // 10_000 * 1e18

    struct World {
        market: ClawMarketService<InMemoryToken, EcdsaRecovery>,
        verifier: SignerKeyPair,
    }

    fn world() -> World {
        let verifier = SignerKeyPair::from_bytes([0x42; 32]).unwrap();
        let mut token = InMemoryToken::new();
        token.mint(BUYER, FUNDS);
        let market = ClawMarketService::new(
            MarketConfig::eth_fee(8453, CONTRACT),
            FeeConfig::new(500, 500).unwrap(),
            OWNER,
            verifier.address(),
            TREASURY,
            token,
            EcdsaRecovery,
        );
        World { market, verifier }
    }

    fn key() -> IdentityKey {
        IdentityKey::from_handle("Custos_Agent").unwrap()
    }

    /// The full whitelist-buyer lifecycle: a free first unit, paid growth
    /// priced by the closed-form curve, and a symmetric walk back down.
    #[test]
    fn test_whitelisted_trading_round_trip() {
        let mut w = world();
        w.market
            .set_whitelisted(OWNER, WhitelistEntry::Wallet(BUYER), true)
            .unwrap();

        // free first unit
        let first = w
            .market
            .buy_claws(BUYER, 1_000, key(), 1, NO_COST_LIMIT, FUNDS)
            .unwrap();
        assert_eq!(first.total_cost, 0);
        assert_eq!(w.market.get_balance(key(), BUYER), 1);
        assert_eq!(w.market.get_market(key()).unwrap().supply, 1);

        // two more units priced from supply 1: indices 1 and 2
        let scale: Amount = 1_000_000_000_000_000_000;
        let base = (1 + 4) * scale / 16_000;
        let grow = w
            .market
            .buy_claws(BUYER, 1_001, key(), 2, NO_COST_LIMIT, FUNDS)
            .unwrap();
        assert_eq!(grow.base_price, base);
        assert_eq!(
            grow.total_cost,
            base + base * 500 / 10_000 + base * 500 / 10_000
        );

        // selling the same two units walks the same indices back down
        let shrink = w.market.sell_claws(BUYER, 1_002, key(), 2, 0).unwrap();
        assert_eq!(shrink.base_price, base);
        assert_eq!(
            shrink.proceeds,
            base - base * 500 / 10_000 - base * 500 / 10_000
        );

        let view = w.market.get_market(key()).unwrap();
        assert_eq!(view.supply, 1);
        assert_eq!(w.market.get_balance(key(), BUYER), 1);
    }

    /// Verification against a real recovered signature, fee flush on bind,
    /// and the replay/expiry/revoke cycle.
    #[test]
    fn test_verification_lifecycle_with_real_signatures() {
        let mut w = world();
        w.market
            .buy_claws(BUYER, 1_000, key(), 3, NO_COST_LIMIT, FUNDS)
            .unwrap();
        let pending = w.market.get_market(key()).unwrap().pending_fees;
        assert!(pending > 0);

        let claim = AgentClaim {
            key: key(),
            wallet: AGENT_WALLET,
            chain_scope: 0,
            timestamp: 2_000,
            nonce: 1,
        };
        let domain = MarketConfig::eth_fee(8453, CONTRACT).typed_domain();
        let signature = w.verifier.sign_digest(&claim.digest(&domain));

        // a stale presentation is rejected, the claim itself stays unconsumed
        assert_eq!(
            w.market
                .verify_and_claim(2_000 + 3_601, &claim, &signature)
                .unwrap_err(),
            MarketError::SignatureExpired {
                issued: 2_000,
                now: 5_601
            }
        );

        w.market.verify_and_claim(2_100, &claim, &signature).unwrap();
        let view = w.market.get_market(key()).unwrap();
        assert_eq!(view.verified_wallet, Some(AGENT_WALLET));
        assert_eq!(view.pending_fees, 0);
        assert_eq!(w.market.token().balance_of(AGENT_WALLET), pending);

        // consumed digest cannot rebind even after an admin revoke
        w.market.revoke_verification(OWNER, key()).unwrap();
        assert_eq!(
            w.market
                .verify_and_claim(2_200, &claim, &signature)
                .unwrap_err(),
            MarketError::DigestAlreadyUsed
        );

        // a fresh claim may bind a different wallet
        let second = AgentClaim {
            wallet: [0x0C; 20],
            nonce: 2,
            timestamp: 2_300,
            ..claim
        };
        let signature = w.verifier.sign_digest(&second.digest(&domain));
        w.market.verify_and_claim(2_400, &second, &signature).unwrap();
        assert_eq!(
            w.market.get_market(key()).unwrap().verified_wallet,
            Some([0x0C; 20])
        );
    }

    /// A signature from any key other than the configured verifier never
    /// binds, regardless of how well-formed the claim is.
    #[test]
    fn test_rogue_signer_rejected() {
        let mut w = world();
        w.market
            .buy_claws(BUYER, 1_000, key(), 2, NO_COST_LIMIT, FUNDS)
            .unwrap();

        let claim = AgentClaim {
            key: key(),
            wallet: AGENT_WALLET,
            chain_scope: 0,
            timestamp: 2_000,
            nonce: 1,
        };
        let domain = MarketConfig::eth_fee(8453, CONTRACT).typed_domain();
        let rogue = SignerKeyPair::generate();
        let signature = rogue.sign_digest(&claim.digest(&domain));

        assert_eq!(
            w.market.verify_and_claim(2_100, &claim, &signature).unwrap_err(),
            MarketError::UntrustedSigner
        );
        assert!(!w.market.get_market(key()).unwrap().is_verified);
    }

    /// Protocol fees stream to treasury per trade; agent fees accumulate
    /// until the bound wallet claims them.
    #[test]
    fn test_fee_routing_over_a_session() {
        let mut w = world();
        let mut treasury_expected: Amount = 0;
        let mut pending_expected: Amount = 0;

        for (amount, at) in [(2u64, 1_000u64), (3, 1_001), (1, 1_002)] {
            let paid = w
                .market
                .buy_claws(BUYER, at, key(), amount, NO_COST_LIMIT, FUNDS)
                .unwrap();
            treasury_expected += paid.protocol_fee;
            pending_expected += paid.agent_fee;
        }

        assert_eq!(w.market.token().balance_of(TREASURY), treasury_expected);
        assert_eq!(
            w.market.get_market(key()).unwrap().pending_fees,
            pending_expected
        );

        let claim = AgentClaim {
            key: key(),
            wallet: AGENT_WALLET,
            chain_scope: 0,
            timestamp: 2_000,
            nonce: 1,
        };
        let domain = MarketConfig::eth_fee(8453, CONTRACT).typed_domain();
        let signature = w.verifier.sign_digest(&claim.digest(&domain));
        w.market.verify_and_claim(2_100, &claim, &signature).unwrap();

        assert_eq!(w.market.token().balance_of(AGENT_WALLET), pending_expected);
    }
}
