//! # Core Domain Primitives
//!
//! Value types shared by both protocol cores.
//!
//! ## Clusters
//!
//! - **Identity**: `Address`, `Hash`
//! - **Money**: `Amount`, basis-point arithmetic
//! - **Time**: `Timestamp` (opaque monotonic clock supplied per call)

use primitive_types::U256;

// Re-export U256 for curve arithmetic across both cores
pub use primitive_types::U256 as WideUint;

/// A 32-byte hash (Keccak-256).
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address.
pub type Address = [u8; 20];

/// A money amount in the payment token's base units.
pub type Amount = u128;

/// Unix timestamp in seconds, supplied by the execution environment.
pub type Timestamp = u64;

/// Basis points: hundredths of a percent. 10_000 bps = 100%.
pub type Bps = u16;

/// The all-zero address, used as the "unset" sentinel where a bound
/// wallet has not been assigned.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// The all-zero hash.
pub const ZERO_HASH: Hash = [0u8; 32];

/// Denominator for basis-point arithmetic.
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Compute `floor(amount * bps / 10_000)`.
///
/// Widened through `U256` so the multiplication cannot overflow for any
/// `u128` amount.
pub fn bps_share(amount: Amount, bps: Bps) -> Amount {
    let wide = U256::from(amount) * U256::from(bps) / U256::from(BPS_DENOMINATOR);
    // <= amount since bps <= 10_000 at every call site, so this fits
    wide.as_u128()
}
