//! # Custos Protocol Test Suite
//!
//! Unified test crate driving both cores end to end through their public
//! services, with the in-memory token adapter and deterministic signer
//! key material.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── market_flows.rs   # Bonding-market trading + verification flows
//!     └── network_flows.rs  # Proof-chain, validator, and epoch flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p cn-tests
//! cargo test -p cn-tests integration::market_flows
//! cargo test -p cn-tests integration::network_flows
//! ```

#![allow(dead_code)]

pub mod integration;
