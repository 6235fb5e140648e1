//! Account-related types for the Rust Transfer Engine
//!
//! This module defines the Account structure shared between the account store
//! and the transfer engine, along with the snapshot type used for output.

use super::error::TransferError;
use rust_decimal::Decimal;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Account identifier
///
/// Opaque, unique and immutable after creation. Identifiers are compared
/// lexicographically to decide lock order.
pub type AccountId = String;

/// A financial account with a mutex-guarded balance
///
/// Accounts are owned by the account store and shared as `Arc<Account>`.
/// The balance is only mutated by the transfer engine while it holds the
/// account's lock, so `balance >= 0` holds whenever no transfer is in flight.
#[derive(Debug)]
pub struct Account {
    id: AccountId,
    balance: Mutex<Decimal>,
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(id: impl Into<AccountId>) -> Self {
        Account {
            id: id.into(),
            balance: Mutex::new(Decimal::ZERO),
        }
    }

    /// Create a new account with an opening balance
    ///
    /// # Errors
    ///
    /// Returns `TransferError::NegativeBalance` if `balance` is below zero.
    pub fn with_balance(id: impl Into<AccountId>, balance: Decimal) -> Result<Self, TransferError> {
        let id = id.into();
        if balance < Decimal::ZERO {
            return Err(TransferError::negative_balance(&id, balance));
        }

        Ok(Account {
            id,
            balance: Mutex::new(balance),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current balance
    ///
    /// Takes the account lock briefly, so the value is never read mid-update.
    pub fn balance(&self) -> Decimal {
        *self.lock_balance()
    }

    /// Consistent copy of the account for reporting
    pub fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            id: self.id.clone(),
            balance: self.balance(),
        }
    }

    /// Acquire the exclusive balance lock
    ///
    /// A poisoned lock is recovered: balances are only assigned after every
    /// fallible step of a transfer, so a poisoned guard never holds a partial update.
    pub(crate) fn lock_balance(&self) -> MutexGuard<'_, Decimal> {
        self.balance.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Point-in-time copy of an account
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSnapshot {
    pub id: AccountId,
    pub balance: Decimal,
}

impl AccountSnapshot {
    pub fn new(id: impl Into<AccountId>, balance: Decimal) -> Self {
        AccountSnapshot {
            id: id.into(),
            balance,
        }
    }
}
