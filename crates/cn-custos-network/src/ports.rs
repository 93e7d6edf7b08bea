//! Outbound ports specific to the network core.
//!
//! The payment-token port lives in `shared-types`; this module adds the
//! opaque swap venue used by buyback execution.

use shared_types::Address;

/// Errors surfaced by the swap venue.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SwapError {
    #[error("swap venue call reverted: {0}")]
    CallReverted(String),
}

/// External swap venue. The core validates nothing about the calldata;
/// success of the call is the only visible signal, and output is measured
/// out-of-band as a balance delta on the ecosystem wallet.
pub trait SwapVenue {
    /// Address the core grants the token allowance to.
    fn address(&self) -> Address;

    /// Invoke the venue with caller-supplied calldata.
    fn execute(&mut self, calldata: &[u8]) -> Result<(), SwapError>;
}
