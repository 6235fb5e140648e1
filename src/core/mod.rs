//! Core business logic module
//!
//! This module contains the core transfer components:
//! - `traits` - Seams for account storage and notification
//! - `engine` - Transfer orchestration and the lock-ordering discipline
//! - `account_store` - Thread-safe in-memory account storage
//! - `notification` - Logging and queued notifiers

pub mod account_store;
pub mod engine;
pub mod notification;
pub mod traits;

pub use account_store::InMemoryAccountStore;
pub use engine::TransferEngine;
pub use notification::{LoggingNotifier, QueuedNotifier};
pub use traits::{AccountRepository, Notifier};
