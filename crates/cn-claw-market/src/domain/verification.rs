//! # Verifier Claims
//!
//! A trusted off-protocol verifier signs a typed claim binding an identity
//! key to a claiming wallet. The core recomputes the exact digest, recovers
//! the signer, and enforces expiry plus digest-level replay protection.

use super::identity::IdentityKey;
use serde::{Deserialize, Serialize};
use shared_crypto::typed_data::{address_word, uint256};
use shared_crypto::{keccak256, keccak256_many, TypedDomain};
use shared_types::{Address, Hash, Timestamp};

/// Claims older than this are rejected.
pub const CLAIM_TTL_SECS: u64 = 3_600;

/// Typed claim signed by the verifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentClaim {
    /// Identity key being claimed.
    pub key: IdentityKey,
    /// Wallet the verification binds.
    pub wallet: Address,
    /// Chain-scoped identifier for the cross-chain variant; 0 elsewhere.
    pub chain_scope: u64,
    /// Verifier-issued timestamp.
    pub timestamp: Timestamp,
    /// Verifier-issued nonce (uniqueness enters through the final digest).
    pub nonce: u64,
}

impl AgentClaim {
    /// Struct hash over the typed encoding of every field.
    pub fn struct_hash(&self) -> Hash {
        let type_hash = keccak256(
            b"AgentClaim(bytes32 key,address wallet,uint256 chainScope,uint256 timestamp,uint256 nonce)",
        );
        keccak256_many(&[
            &type_hash,
            self.key.as_bytes(),
            &address_word(self.wallet),
            &uint256(self.chain_scope),
            &uint256(self.timestamp),
            &uint256(self.nonce),
        ])
    }

    /// Final domain-separated digest the verifier signs.
    pub fn digest(&self, domain: &TypedDomain) -> Hash {
        domain.digest(self.struct_hash())
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        now > self.timestamp + CLAIM_TTL_SECS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim() -> AgentClaim {
        AgentClaim {
            key: IdentityKey::from_handle("custos").unwrap(),
            wallet: [7; 20],
            chain_scope: 0,
            timestamp: 1_700_000_000,
            nonce: 42,
        }
    }

    fn domain() -> TypedDomain {
        TypedDomain::new("ClawMarket", "1", 8453, [0xAA; 20])
    }

    #[test]
    fn test_digest_binds_every_field() {
        let base = claim().digest(&domain());

        let mut c = claim();
        c.wallet = [8; 20];
        assert_ne!(base, c.digest(&domain()));

        let mut c = claim();
        c.nonce = 43;
        assert_ne!(base, c.digest(&domain()));

        let mut c = claim();
        c.chain_scope = 1;
        assert_ne!(base, c.digest(&domain()));

        let mut c = claim();
        c.timestamp += 1;
        assert_ne!(base, c.digest(&domain()));
    }

    #[test]
    fn test_digest_binds_domain() {
        let other = TypedDomain::new("ClawMarket", "1", 1, [0xAA; 20]);
        assert_ne!(claim().digest(&domain()), claim().digest(&other));
    }

    #[test]
    fn test_expiry_boundary() {
        let c = claim();
        assert!(!c.is_expired(c.timestamp));
        assert!(!c.is_expired(c.timestamp + CLAIM_TTL_SECS));
        assert!(c.is_expired(c.timestamp + CLAIM_TTL_SECS + 1));
    }
}
