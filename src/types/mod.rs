//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account entity and snapshots
//! - `transfer`: Transfer requests and notices
//! - `error`: Error types for the transfer engine

pub mod account;
pub mod error;
pub mod transfer;

pub use account::{Account, AccountId, AccountSnapshot};
pub use error::{ErrorCategory, NotificationError, TransferError};
pub use transfer::{TransferNotice, TransferRequest};
