//! Transfer orchestration
//!
//! This module provides the `TransferEngine` struct, which moves funds between two
//! accounts held in an `AccountRepository` and tells both owners through a `Notifier`.
//!
//! # Design
//!
//! A transfer runs in four phases:
//!
//! 1. **Validation** - non-positive amounts are rejected, self-transfers are a no-op
//! 2. **Resolution** - both accounts are looked up, `from` before `to`
//! 3. **Critical section** - both account locks are taken in id order, the sender's
//!    balance is checked and both balances are updated together
//! 4. **Notification** - after both locks are released, sender first
//!
//! # Lock Ordering
//!
//! The account whose id compares greater is always locked first. Every transfer
//! touching the same pair of accounts therefore requests the two locks in the same
//! order, whatever its direction, and no circular wait can form. There is no global
//! lock: transfers on disjoint pairs run in parallel.
//!
//! # Thread Safety
//!
//! The engine is cheap to clone (two `Arc`s) and can be shared across threads.
//! The critical section never blocks on anything but the two account locks.

use crate::core::notification::deliver;
use crate::core::traits::{AccountRepository, Notifier};
use crate::types::{Account, TransferError, TransferNotice, TransferRequest};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};

/// Transfer orchestrator
///
/// Generic over the account store and the notifier; both may be trait objects.
#[derive(Debug)]
pub struct TransferEngine<S: ?Sized, N: ?Sized> {
    /// Account lookup
    store: Arc<S>,

    /// Post-transfer notification sink
    notifier: Arc<N>,
}

impl<S: ?Sized, N: ?Sized> Clone for TransferEngine<S, N> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<S, N> TransferEngine<S, N>
where
    S: AccountRepository + ?Sized,
    N: Notifier + ?Sized,
{
    /// Create a new TransferEngine
    ///
    /// # Arguments
    ///
    /// * `store` - Account store used to resolve ids
    /// * `notifier` - Receives one notice per party after each completed transfer
    pub fn new(store: Arc<S>, notifier: Arc<N>) -> Self {
        Self { store, notifier }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Move `amount` from `from_account_id` to `to_account_id`
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The transfer completed, or both ids are equal (no-op)
    /// * `Err(TransferError::InvalidAmount)` - `amount` is zero or negative
    /// * `Err(TransferError::AccountNotFound)` - An id is unknown; `from` is reported
    ///   when both are
    /// * `Err(TransferError::InsufficientFunds)` - The sender's balance is below `amount`
    /// * `Err(TransferError::ArithmeticOverflow)` - The receiver's balance would overflow
    ///
    /// Every error leaves both balances unchanged. Notification failures are logged
    /// and never reported here.
    pub fn transfer(
        &self,
        from_account_id: &str,
        to_account_id: &str,
        amount: Decimal,
    ) -> Result<(), TransferError> {
        if amount <= Decimal::ZERO {
            return Err(TransferError::invalid_amount(amount));
        }

        if from_account_id == to_account_id {
            debug!(account = %from_account_id, %amount, "Self-transfer ignored");
            return Ok(());
        }

        let from = self.load_account(from_account_id)?;
        let to = self.load_account(to_account_id)?;

        move_funds(&from, &to, amount)?;

        info!(from = %from.id(), to = %to.id(), %amount, "Transfer completed");

        // Locks are released; notify sender, then receiver
        let sent = TransferNotice::Sent {
            to: to.id().to_string(),
            amount,
        };
        deliver(self.notifier.as_ref(), &from, &sent.to_string());

        let received = TransferNotice::Received {
            from: from.id().to_string(),
            amount,
        };
        deliver(self.notifier.as_ref(), &to, &received.to_string());

        Ok(())
    }

    /// Execute a transfer request
    pub fn execute(&self, request: &TransferRequest) -> Result<(), TransferError> {
        self.transfer(&request.from, &request.to, request.amount)
    }

    fn load_account(&self, account_id: &str) -> Result<Arc<Account>, TransferError> {
        self.store
            .get_account(account_id)
            .ok_or_else(|| TransferError::account_not_found(account_id))
    }
}

/// Debit `from` and credit `to` under both account locks
///
/// The outer lock is held while the inner one is acquired. Both new balances are
/// computed before either is assigned, so an error leaves both untouched.
fn move_funds(from: &Account, to: &Account, amount: Decimal) -> Result<(), TransferError> {
    let from_is_outer = from.id() > to.id();
    let (outer, inner) = if from_is_outer { (from, to) } else { (to, from) };

    let mut outer_balance = outer.lock_balance();
    let mut inner_balance = inner.lock_balance();

    let (from_balance, to_balance) = if from_is_outer {
        (&mut *outer_balance, &mut *inner_balance)
    } else {
        (&mut *inner_balance, &mut *outer_balance)
    };

    if *from_balance < amount {
        return Err(TransferError::insufficient_funds(
            from.id(),
            *from_balance,
            amount,
        ));
    }

    // Cannot underflow: from_balance >= amount > 0
    let debited = *from_balance - amount;
    let credited = to_balance
        .checked_add(amount)
        .ok_or_else(|| TransferError::arithmetic_overflow(to.id()))?;

    *from_balance = debited;
    *to_balance = credited;

    Ok(())
}
