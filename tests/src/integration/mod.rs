//! Cross-core end-to-end flows.

pub mod market_flows;
pub mod network_flows;
