//! Transfer-related types for the Rust Transfer Engine
//!
//! A transfer is a pure operation on two accounts; nothing is persisted for it.
//! This module defines the request shape and the notices sent to both parties.

use super::account::AccountId;
use rust_decimal::Decimal;
use std::fmt;

/// Request to move `amount` from one account to another
///
/// The amount is not validated on construction: the engine rejects
/// non-positive amounts with `TransferError::InvalidAmount`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    /// Account to debit
    pub from: AccountId,

    /// Account to credit
    pub to: AccountId,

    /// Amount to move, expected to be strictly positive
    pub amount: Decimal,
}

impl TransferRequest {
    pub fn new(from: impl Into<AccountId>, to: impl Into<AccountId>, amount: Decimal) -> Self {
        TransferRequest {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

/// Notice delivered to one party of a completed transfer
#[derive(Debug, Clone, PartialEq)]
pub enum TransferNotice {
    /// Sent to the debited account
    Sent { to: AccountId, amount: Decimal },

    /// Sent to the credited account
    Received { from: AccountId, amount: Decimal },
}

impl fmt::Display for TransferNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferNotice::Sent { to, amount } => write!(
                f,
                "Funds transferred to the account {}, amount = {}",
                to, amount
            ),
            TransferNotice::Received { from, amount } => write!(
                f,
                "Funds received from the account {}, amount = {}",
                from, amount
            ),
        }
    }
}
