//! # Fungible Token Port
//!
//! Both cores move fees and stakes through an external fungible-token
//! interface. The token is a trait port so tests can substitute the
//! in-memory adapter; production adapters wrap the real ledger.
//!
//! Any failed movement aborts the enclosing operation.

use crate::entities::{Address, Amount};
use std::collections::HashMap;

/// Errors surfaced by the token port.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: Amount, need: Amount },

    #[error("insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: Amount, need: Amount },

    #[error("token call failed: {0}")]
    CallFailed(String),
}

/// External fungible-token interface (ERC-20 shaped).
pub trait FungibleToken {
    /// Move `amount` from `from` to `to`. The caller vouches for `from`;
    /// cores pass either their own escrow address or the wallet that
    /// initiated the enclosing operation.
    fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<(), TokenError>;

    /// Move `amount` from `from` to `to` using a pre-granted allowance
    /// toward `spender`.
    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError>;

    /// Grant `spender` an allowance over `owner`'s balance.
    fn approve(&mut self, owner: Address, spender: Address, amount: Amount)
        -> Result<(), TokenError>;

    /// Current balance of `who`.
    fn balance_of(&self, who: Address) -> Amount;
}

/// In-memory token adapter for tests and simulation.
///
/// Implements the full allowance discipline so core logic is exercised the
/// same way it would be against a real ledger.
#[derive(Debug, Default)]
pub struct InMemoryToken {
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
}

impl InMemoryToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `who` out of thin air (test setup only).
    pub fn mint(&mut self, who: Address, amount: Amount) {
        *self.balances.entry(who).or_default() += amount;
    }

    fn debit(&mut self, who: Address, amount: Amount) -> Result<(), TokenError> {
        let balance = self.balances.entry(who).or_default();
        if *balance < amount {
            return Err(TokenError::InsufficientBalance {
                have: *balance,
                need: amount,
            });
        }
        *balance -= amount;
        Ok(())
    }
}

impl FungibleToken for InMemoryToken {
    fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<(), TokenError> {
        self.debit(from, amount)?;
        *self.balances.entry(to).or_default() += amount;
        Ok(())
    }

    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let allowance = self.allowances.entry((from, spender)).or_default();
        if *allowance < amount {
            return Err(TokenError::InsufficientAllowance {
                have: *allowance,
                need: amount,
            });
        }
        *allowance -= amount;
        self.debit(from, amount)?;
        *self.balances.entry(to).or_default() += amount;
        Ok(())
    }

    fn approve(
        &mut self,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        self.allowances.insert((owner, spender), amount);
        Ok(())
    }

    fn balance_of(&self, who: Address) -> Amount {
        self.balances.get(&who).copied().unwrap_or(0)
    }
}
