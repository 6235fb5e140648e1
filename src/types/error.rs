//! Error types for the Rust Transfer Engine
//!
//! This module defines all error types that can occur while transferring funds
//! and while driving the engine from CSV input.
//!
//! # Error Categories
//!
//! - **Request Errors**: Non-positive transfer amounts
//! - **Business Errors**: Unknown accounts, insufficient funds, duplicate accounts
//! - **File I/O and CSV Errors**: Fatal or per-record driver failures
//!
//! Notification failures live in their own [`NotificationError`] type and are never
//! converted into a [`TransferError`].

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the transfer engine
///
/// Every failure kind of a transfer is a distinct variant so that callers can map
/// them to their own transport-level responses (see [`TransferError::category`]).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransferError {
    /// Transfer amount is zero or negative
    ///
    /// Rejected before any account is looked up or locked.
    #[error("Amount must be greater than 0")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Account id could not be resolved in the account store
    #[error("Account with id {account} not found")]
    AccountNotFound {
        /// The id that was not found
        account: String,
    },

    /// The sending account cannot cover the transfer
    ///
    /// Detected under both account locks; no balance is changed.
    #[error("Not enough money to perform transfer, account id {account}")]
    InsufficientFunds {
        /// Id of the sending account
        account: String,
        /// Balance observed under lock
        balance: Decimal,
        /// Requested transfer amount
        requested: Decimal,
    },

    /// Crediting the receiving account would overflow
    #[error("Arithmetic overflow crediting account {account}")]
    ArithmeticOverflow {
        /// Id of the receiving account
        account: String,
    },

    /// An account with the same id already exists in the store
    #[error("Account id {account} already exists!")]
    DuplicateAccount {
        /// The duplicated id
        account: String,
    },

    /// An account was opened with a negative balance
    #[error("Initial balance must be positive, account id {account}")]
    NegativeBalance {
        /// The account id
        account: String,
        /// The rejected opening balance
        balance: Decimal,
    },

    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// Per-record parse errors are recoverable: the record is skipped.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

/// Coarse classification of a [`TransferError`] for request layers
///
/// Mirrors how an HTTP front end answers: malformed requests are a client error,
/// well-formed requests that break a business rule are unprocessable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The request itself is invalid (HTTP 400)
    InvalidRequest,
    /// The request is well-formed but cannot be applied (HTTP 422)
    Unprocessable,
    /// The driver cannot continue (I/O, unreadable input)
    Fatal,
}

/// Errors raised while delivering a transfer notification
///
/// These are logged by the engine and never affect a transfer's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    /// The delivery backend refused or failed the notification
    #[error("Failed to notify owner of account {account}: {reason}")]
    Delivery {
        /// Account whose owner should have been notified
        account: String,
        /// Backend-provided reason
        reason: String,
    },

    /// The dispatch queue has no running worker
    #[error("Notification queue is closed")]
    QueueClosed,
}

// Conversion from io::Error to TransferError
impl From<std::io::Error> for TransferError {
    fn from(error: std::io::Error) -> Self {
        TransferError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to TransferError
impl From<csv::Error> for TransferError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        TransferError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl TransferError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        TransferError::InvalidAmount { amount }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account: &str) -> Self {
        TransferError::AccountNotFound {
            account: account.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: &str, balance: Decimal, requested: Decimal) -> Self {
        TransferError::InsufficientFunds {
            account: account.to_string(),
            balance,
            requested,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(account: &str) -> Self {
        TransferError::ArithmeticOverflow {
            account: account.to_string(),
        }
    }

    /// Create a DuplicateAccount error
    pub fn duplicate_account(account: &str) -> Self {
        TransferError::DuplicateAccount {
            account: account.to_string(),
        }
    }

    /// Create a NegativeBalance error
    pub fn negative_balance(account: &str, balance: Decimal) -> Self {
        TransferError::NegativeBalance {
            account: account.to_string(),
            balance,
        }
    }

    /// Create a ParseError error
    pub fn parse_error(line: Option<u64>, message: impl Into<String>) -> Self {
        TransferError::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Classify the error for a request layer
    pub fn category(&self) -> ErrorCategory {
        match self {
            TransferError::InvalidAmount { .. } => ErrorCategory::InvalidRequest,
            TransferError::AccountNotFound { .. }
            | TransferError::InsufficientFunds { .. }
            | TransferError::ArithmeticOverflow { .. }
            | TransferError::DuplicateAccount { .. }
            | TransferError::NegativeBalance { .. } => ErrorCategory::Unprocessable,
            TransferError::FileNotFound { .. }
            | TransferError::IoError { .. }
            | TransferError::ParseError { .. } => ErrorCategory::Fatal,
        }
    }
}
