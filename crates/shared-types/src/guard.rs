//! # Scoped Re-entrancy Guard
//!
//! Every state-mutating entry point acquires a [`CallScope`] on entry. The
//! scope flips a shared flag and clears it on drop, so the guard releases on
//! every exit path, including early `?` returns.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Error raised when a call re-enters a core that is already executing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("re-entrant call rejected")]
pub struct ReentrancyError;

/// Shared in-flight flag owned by a service instance.
#[derive(Clone, Debug, Default)]
pub struct ReentrancyFlag {
    in_flight: Arc<AtomicBool>,
}

impl ReentrancyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the guard for the duration of one call.
    pub fn enter(&self) -> Result<CallScope, ReentrancyError> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Err(ReentrancyError);
        }
        Ok(CallScope {
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    /// Whether a call is currently executing.
    pub fn is_entered(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// RAII scope for one in-flight call. Dropping it releases the flag.
#[derive(Debug)]
pub struct CallScope {
    in_flight: Arc<AtomicBool>,
}

impl Drop for CallScope {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}
