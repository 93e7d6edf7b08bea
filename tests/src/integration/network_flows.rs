//! # Proof-Chain Flows
//!
//! End-to-end registration, inscription, validator, and epoch flows through
//! the public `CustosNetworkService`, with the in-memory token adapter
//! standing in for the USDC leg and a stub swap venue.

#[cfg(test)]
mod tests {
    use cn_custos_network::{
        domain::GENESIS_CHAIN_HEAD, AgentRole, CustosNetworkService, NetworkConfig, NetworkError,
        SwapError, SwapVenue,
    };
    use shared_types::{Address, Amount, FungibleToken, Hash, InMemoryToken};

    const SELF: Address = [0xC0; 20];
    const TREASURY: Address = [0x77; 20];
    const ECOSYSTEM: Address = [0xEC; 20];
    const CUSTODIAN_A: Address = [0xA1; 20];
    const CUSTODIAN_B: Address = [0xA2; 20];
    const AGENT: Address = [0x0A; 20];
    const VALIDATOR: Address = [0x0B; 20];

    const FUNDS: Amount = 1_000_000_000; // 1000 USDC

    struct NoopVenue;

    impl SwapVenue for NoopVenue {
        fn address(&self) -> Address {
            [0xDE; 20]
        }
        fn execute(&mut self, _calldata: &[u8]) -> Result<(), SwapError> {
            Ok(())
        }
    }

    fn network() -> CustosNetworkService<InMemoryToken, NoopVenue> {
        let mut token = InMemoryToken::new();
        token.mint(AGENT, FUNDS);
        token.mint(VALIDATOR, FUNDS);
        let config = NetworkConfig::mainnet(TREASURY, ECOSYSTEM, [CUSTODIAN_A, CUSTODIAN_B], SELF);
        CustosNetworkService::new(config, token, NoopVenue)
    }

    fn proof(n: u8) -> Hash {
        [n; 32]
    }

    /// The proof-chain lifecycle from the deployed protocol's runbook:
    /// register, link against genesis, hit the rate limit, break the chain,
    /// then extend it correctly.
    #[test]
    fn test_proof_chain_lifecycle() {
        let mut net = network();

        let id = net.register_agent(AGENT, 1_000, "custos-watcher".into()).unwrap();
        assert_eq!(id, 1);
        assert_eq!(net.token().balance_of(TREASURY), 10_000_000);

        // first cycle links against genesis
        net.inscribe(
            AGENT,
            2_000,
            proof(1),
            GENESIS_CHAIN_HEAD,
            "work-cycle".into(),
            "first cycle".into(),
        )
        .unwrap();
        assert_eq!(net.get_agent(id).unwrap().cycle_count, 1);

        // an immediate second inscription is rate limited
        assert!(matches!(
            net.inscribe(AGENT, 2_010, proof(2), proof(1), "work-cycle".into(), String::new())
                .unwrap_err(),
            NetworkError::RateLimited { retry_at: 5_600, .. }
        ));

        // after the interval, a wrong prev hash is a chain break
        assert_eq!(
            net.inscribe(
                AGENT,
                5_600,
                proof(2),
                GENESIS_CHAIN_HEAD,
                "work-cycle".into(),
                String::new()
            )
            .unwrap_err(),
            NetworkError::ChainBreak {
                expected: proof(1),
                presented: GENESIS_CHAIN_HEAD
            }
        );

        // the correct link extends the chain
        net.inscribe(AGENT, 5_600, proof(2), proof(1), "work-cycle".into(), String::new())
            .unwrap();
        let agent = net.get_agent(id).unwrap();
        assert_eq!(agent.cycle_count, 2);
        assert_eq!(agent.chain_head, proof(2));
    }

    /// Validator approval, staking, attestation economics, and a clean
    /// removal that returns the stake.
    #[test]
    fn test_validator_attestation_economics() {
        let mut net = network();
        let agent_id = net.register_agent(AGENT, 1_000, "worker".into()).unwrap();
        let validator_id = net
            .register_agent(VALIDATOR, 1_000, "watcher".into())
            .unwrap();

        net.approve_validator(CUSTODIAN_A, validator_id).unwrap();
        net.lock_validator_stake(VALIDATOR).unwrap();
        assert_eq!(
            net.get_agent(validator_id).unwrap().validator_stake,
            100_000_000
        );

        net.inscribe(
            AGENT,
            2_000,
            proof(1),
            GENESIS_CHAIN_HEAD,
            "work-cycle".into(),
            String::new(),
        )
        .unwrap();

        let agent_before = net.token().balance_of(AGENT);
        let validator_before = net.token().balance_of(VALIDATOR);
        net.attest(VALIDATOR, 2_100, agent_id, proof(1), true).unwrap();

        // fee falls on the inscribing agent; validator earns the major share
        assert_eq!(net.token().balance_of(AGENT), agent_before - 500_000);
        assert_eq!(net.token().balance_of(VALIDATOR), validator_before + 350_000);
        assert_eq!(net.get_attestations(proof(1)).len(), 1);

        net.remove_validator(CUSTODIAN_B, validator_id, "rotation".into(), false)
            .unwrap();
        let removed = net.get_agent(validator_id).unwrap();
        assert_eq!(removed.role, AgentRole::Inscriber);
        assert_eq!(
            net.token().balance_of(VALIDATOR),
            validator_before + 350_000 + 100_000_000
        );
    }

    /// Epoch accounting across inscriptions and a close, then a buyback
    /// funded by a slash.
    #[test]
    fn test_epoch_and_buyback_flow() {
        let mut net = network();
        net.register_agent(AGENT, 1_000, "worker".into()).unwrap();
        net.inscribe(
            AGENT,
            2_000,
            proof(1),
            GENESIS_CHAIN_HEAD,
            "work-cycle".into(),
            String::new(),
        )
        .unwrap();

        let snapshot = net.close_epoch(CUSTODIAN_A).unwrap();
        assert_eq!(snapshot.epoch, 1);
        assert_eq!(snapshot.inscriptions, 1);
        assert_eq!(snapshot.reward_pool, 300_000);
        assert_eq!(net.epoch_status().current_epoch, 2);

        // fund the buyback pool by slashing a staked validator
        let validator_id = net
            .register_agent(VALIDATOR, 3_000, "watcher".into())
            .unwrap();
        net.approve_validator(CUSTODIAN_A, validator_id).unwrap();
        net.lock_validator_stake(VALIDATOR).unwrap();
        net.remove_validator(CUSTODIAN_A, validator_id, "misconduct".into(), true)
            .unwrap();
        assert_eq!(net.epoch_status().buyback_pool, 50_000_000);

        let received = net.execute_buyback(CUSTODIAN_A, 50_000_000, b"route").unwrap();
        assert_eq!(received, 0); // stub venue delivers out-of-band
        assert_eq!(net.epoch_status().buyback_pool, 0);
    }

    /// The 2-of-2 upgrade gate across both custodians.
    #[test]
    fn test_upgrade_authorization_flow() {
        let mut net = network();
        let target: Address = [0x99; 20];

        assert_eq!(net.approve_upgrade(CUSTODIAN_A, target).unwrap(), None);
        assert_eq!(
            net.approve_upgrade(CUSTODIAN_B, target).unwrap(),
            Some(target)
        );
        // the matched pair was consumed
        assert_eq!(net.approve_upgrade(CUSTODIAN_B, target).unwrap(), None);
    }
}
