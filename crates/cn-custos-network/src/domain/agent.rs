//! # Agent Records
//!
//! One agent per wallet, identified by a sequential id assigned at
//! registration. An agent owns a private hash chain: each inscription links
//! to the previous proof hash, with the network-wide genesis root anchoring
//! the first cycle.

use super::error::{NetworkError, NetworkResult};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, Hash, Timestamp, ZERO_HASH};

/// Maximum registered-name length in bytes.
pub const MAX_NAME_BYTES: usize = 64;

/// Maximum block-type length in bytes.
pub const MAX_BLOCK_TYPE_BYTES: usize = 32;

/// Maximum inscription-summary length in bytes.
pub const MAX_SUMMARY_BYTES: usize = 140;

/// Role ladder. Upgrade path is Inscriber to Validator via custodian
/// approval; removal or slash demotes back to Inscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentRole {
    None,
    Inscriber,
    Validator,
    ConsensusNode,
}

/// Per-wallet agent record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Sequential id starting at 1, immutable once assigned.
    pub id: u64,
    pub wallet: Address,
    pub name: String,
    pub role: AgentRole,
    /// Completed inscription count.
    pub cycle_count: u64,
    /// Last inscribed proof hash; zero sentinel until the first inscription.
    pub chain_head: Hash,
    pub last_inscribed_at: Timestamp,
    /// Zero unless actively staked.
    pub validator_stake: Amount,
    pub active: bool,
    pub registered_at: Timestamp,
}

impl Agent {
    pub fn register(
        id: u64,
        wallet: Address,
        name: String,
        registered_at: Timestamp,
    ) -> NetworkResult<Self> {
        if name.is_empty() {
            return Err(NetworkError::NameEmpty);
        }
        if name.len() > MAX_NAME_BYTES {
            return Err(NetworkError::NameTooLong {
                len: name.len(),
                max: MAX_NAME_BYTES,
            });
        }
        Ok(Self {
            id,
            wallet,
            name,
            role: AgentRole::Inscriber,
            cycle_count: 0,
            chain_head: ZERO_HASH,
            last_inscribed_at: 0,
            validator_stake: 0,
            active: true,
            registered_at,
        })
    }

    pub fn is_validator(&self) -> bool {
        self.active && matches!(self.role, AgentRole::Validator | AgentRole::ConsensusNode)
    }

    /// Required `prev_hash` for the agent's next inscription.
    pub fn expected_prev_hash(&self, genesis: Hash) -> Hash {
        if self.cycle_count == 0 {
            genesis
        } else {
            self.chain_head
        }
    }

    /// Rate-limit check against the minimum inter-inscription interval.
    pub fn check_inscription_interval(
        &self,
        now: Timestamp,
        min_interval: Timestamp,
    ) -> NetworkResult<()> {
        if self.cycle_count == 0 {
            return Ok(());
        }
        let retry_at = self.last_inscribed_at + min_interval;
        if now < retry_at {
            return Err(NetworkError::RateLimited {
                last: self.last_inscribed_at,
                retry_at,
                now,
            });
        }
        Ok(())
    }

    /// Advance the chain head after a validated inscription.
    pub fn advance_chain(&mut self, proof_hash: Hash, now: Timestamp) {
        self.chain_head = proof_hash;
        self.cycle_count += 1;
        self.last_inscribed_at = now;
    }

    /// Demote to Inscriber and take whatever stake was locked.
    pub fn demote_and_take_stake(&mut self) -> Amount {
        self.role = AgentRole::Inscriber;
        std::mem::take(&mut self.validator_stake)
    }
}

/// Validate the content fields of an inscription.
pub fn validate_inscription(
    proof_hash: &Hash,
    block_type: &str,
    summary: &str,
) -> NetworkResult<()> {
    if *proof_hash == ZERO_HASH {
        return Err(NetworkError::ZeroProofHash);
    }
    if block_type.is_empty() {
        return Err(NetworkError::BlockTypeEmpty);
    }
    if block_type.len() > MAX_BLOCK_TYPE_BYTES {
        return Err(NetworkError::BlockTypeTooLong {
            len: block_type.len(),
            max: MAX_BLOCK_TYPE_BYTES,
        });
    }
    if summary.len() > MAX_SUMMARY_BYTES {
        return Err(NetworkError::SummaryTooLong {
            len: summary.len(),
            max: MAX_SUMMARY_BYTES,
        });
    }
    Ok(())
}
