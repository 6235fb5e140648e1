//! Rust Transfer Engine Library
//! # Overview
//!
//! This library moves funds between in-memory accounts under concurrent access,
//! guaranteeing no lost updates, no negative balances and no deadlock.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, TransferRequest, errors)
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - Transfer orchestration and lock ordering
//!   - [`core::account_store`] - Thread-safe account storage
//!   - [`core::notification`] - Post-transfer notifications
//! - [`io`] - CSV input and output
//! - [`strategy`] - Sequential and concurrent batch processing
//! - [`cli`] - CLI arguments parsing
//! - [`logging`] - Tracing subscriber setup
//!
//! # Transfer Semantics
//!
//! - Amounts must be strictly positive
//! - A transfer from an account to itself succeeds without effect
//! - Both accounts must exist; the sender is resolved first
//! - The sender's balance must cover the amount; it is checked under lock
//! - Both balances change together or not at all
//! - Both owners are notified after the locks are released
//!
//! # Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use rust_transfer_engine::{
//!     Account, AccountRepository, InMemoryAccountStore, LoggingNotifier, TransferEngine,
//! };
//! use std::sync::Arc;
//!
//! let store = Arc::new(InMemoryAccountStore::new());
//! store.create_account(Account::with_balance("A", Decimal::from(1000)).unwrap()).unwrap();
//! store.create_account(Account::new("B")).unwrap();
//!
//! let engine = TransferEngine::new(Arc::clone(&store), Arc::new(LoggingNotifier));
//! engine.transfer("A", "B", Decimal::from(500)).unwrap();
//!
//! assert_eq!(store.get_account("A").unwrap().balance(), Decimal::from(500));
//! assert_eq!(store.get_account("B").unwrap().balance(), Decimal::from(500));
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod strategy;
pub mod types;

pub use core::{
    AccountRepository, InMemoryAccountStore, LoggingNotifier, Notifier, QueuedNotifier,
    TransferEngine,
};
pub use io::write_accounts_csv;
pub use types::{
    Account, AccountId, AccountSnapshot, ErrorCategory, NotificationError, TransferError,
    TransferNotice, TransferRequest,
};
