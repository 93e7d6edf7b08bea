//! Domain logic for the Custos proof-chain network.

pub mod agent;
pub mod attestation;
pub mod config;
pub mod epoch;
pub mod error;
pub mod upgrade;

pub use agent::{
    Agent, AgentRole, MAX_BLOCK_TYPE_BYTES, MAX_NAME_BYTES, MAX_SUMMARY_BYTES,
};
pub use attestation::{Attestation, AttestationBook};
pub use config::{NetworkConfig, GENESIS_CHAIN_HEAD};
pub use epoch::{EpochLedger, EpochSnapshot};
pub use error::{NetworkError, NetworkResult};
pub use upgrade::UpgradeGate;
