//! # Shared Types Crate
//!
//! Cross-core domain primitives shared by the Claws bonding market and the
//! Custos proof-chain network.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: types used by more than one core live here.
//! - **No Ambient State**: every registry is owned by a service instance;
//!   nothing in this crate is global.
//! - **Explicit Ports**: external collaborators (the fungible token) are
//!   trait ports with in-memory adapters for tests.

pub mod entities;
pub mod guard;
pub mod token;

pub use entities::*;
pub use guard::{CallScope, ReentrancyError, ReentrancyFlag};
pub use token::{FungibleToken, InMemoryToken, TokenError};
