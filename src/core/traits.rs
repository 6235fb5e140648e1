//! Core traits for account storage and transfer notification
//!
//! These are the seams between the transfer engine and its collaborators.
//! The engine is generic over both, so stores and notifiers can be swapped
//! without touching the locking discipline.

use crate::types::{Account, AccountSnapshot, NotificationError, TransferError};
use std::sync::Arc;

/// Trait for storing and looking up accounts
///
/// Implementations must be safe for concurrent insert and lookup. They are not
/// responsible for balance mutation: that happens only under the account's own
/// lock, driven by the transfer engine.
pub trait AccountRepository: Send + Sync {
    /// Register a new account
    ///
    /// Fails with `TransferError::DuplicateAccount` if the id is already taken.
    fn create_account(&self, account: Account) -> Result<Arc<Account>, TransferError>;

    /// Look up an account by id
    fn get_account(&self, account_id: &str) -> Option<Arc<Account>>;

    /// Snapshot every account for output
    fn get_all_accounts(&self) -> Vec<AccountSnapshot>;

    /// Remove every account
    fn clear_accounts(&self);
}

/// Trait for telling account owners about completed transfers
///
/// Called by the engine after both account locks are released. The result is
/// only logged; it never changes the outcome of the transfer.
pub trait Notifier: Send + Sync {
    /// Deliver `message` to the owner of `account`
    fn notify_about_transfer(
        &self,
        account: &Arc<Account>,
        message: &str,
    ) -> Result<(), NotificationError>;
}
