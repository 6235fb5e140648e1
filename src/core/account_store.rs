//! Thread-safe in-memory account store
//!
//! This module provides the `InMemoryAccountStore` struct, which keeps accounts in a
//! `DashMap` keyed by account id.
//!
//! # Design
//!
//! The store owns every `Account` behind an `Arc`. Lookups hand out clones of that
//! `Arc`, so the transfer engine locks the very same balance that the store keeps;
//! the store itself never touches balances.
//!
//! # Thread Safety
//!
//! Creation uses DashMap's entry API, which holds the shard lock between the
//! existence check and the insert. Two concurrent creates for the same id therefore
//! resolve deterministically: one succeeds, the other gets `DuplicateAccount`.

use crate::core::traits::AccountRepository;
use crate::types::{Account, AccountId, AccountSnapshot, TransferError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Thread-safe account store
///
/// # Thread Safety
///
/// All methods are safe to call from multiple threads concurrently. Lookups of
/// different accounts do not block each other.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    /// Concurrent HashMap storing accounts by id
    accounts: DashMap<AccountId, Arc<Account>>,
}

impl InMemoryAccountStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Number of accounts currently stored
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountRepository for InMemoryAccountStore {
    fn create_account(&self, account: Account) -> Result<Arc<Account>, TransferError> {
        match self.accounts.entry(account.id().to_string()) {
            Entry::Occupied(entry) => Err(TransferError::duplicate_account(entry.key())),
            Entry::Vacant(entry) => {
                debug!(account = %entry.key(), balance = %account.balance(), "Account created");
                let account = Arc::new(account);
                entry.insert(Arc::clone(&account));
                Ok(account)
            }
        }
    }

    fn get_account(&self, account_id: &str) -> Option<Arc<Account>> {
        self.accounts
            .get(account_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Snapshot every account
    ///
    /// Each account is read under its own lock; the returned vector is in
    /// arbitrary order and is not a global point-in-time view.
    fn get_all_accounts(&self) -> Vec<AccountSnapshot> {
        self.accounts
            .iter()
            .map(|entry| entry.value().snapshot())
            .collect()
    }

    fn clear_accounts(&self) {
        self.accounts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_create_and_get_account() {
        let store = InMemoryAccountStore::new();

        store
            .create_account(Account::with_balance("Id-123", Decimal::new(1000, 0)).unwrap())
            .unwrap();

        let account = store.get_account("Id-123").unwrap();
        assert_eq!(account.id(), "Id-123");
        assert_eq!(account.balance(), Decimal::new(1000, 0));
    }

    #[test]
    fn test_get_returns_none_for_unknown_id() {
        let store = InMemoryAccountStore::new();

        assert!(store.get_account("missing").is_none());
    }

    #[test]
    fn test_create_duplicate_account_fails() {
        let store = InMemoryAccountStore::new();
        store.create_account(Account::new("Id-123")).unwrap();

        let result = store.create_account(Account::with_balance("Id-123", Decimal::TEN).unwrap());

        assert_eq!(
            result.unwrap_err(),
            TransferError::duplicate_account("Id-123")
        );
        // The first account is left untouched
        assert_eq!(store.get_account("Id-123").unwrap().balance(), Decimal::ZERO);
    }

    #[test]
    fn test_get_shares_the_stored_account() {
        let store = InMemoryAccountStore::new();
        let created = store.create_account(Account::new("Id-1")).unwrap();

        let fetched = store.get_account("Id-1").unwrap();

        assert!(Arc::ptr_eq(&created, &fetched));
    }

    #[test]
    fn test_get_all_accounts_and_clear() {
        let store = InMemoryAccountStore::new();
        store.create_account(Account::new("a")).unwrap();
        store.create_account(Account::new("b")).unwrap();
        store.create_account(Account::new("c")).unwrap();

        let mut ids: Vec<String> = store
            .get_all_accounts()
            .into_iter()
            .map(|snapshot| snapshot.id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c"]);

        store.clear_accounts();
        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_create_same_account() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::thread;

        let store = Arc::new(InMemoryAccountStore::new());
        let created = Arc::new(AtomicUsize::new(0));
        let mut handles = vec![];

        // Spawn 10 threads, all trying to create the same account
        for _ in 0..10 {
            let store_clone = Arc::clone(&store);
            let created_clone = Arc::clone(&created);
            let handle = thread::spawn(move || {
                if store_clone.create_account(Account::new("shared")).is_ok() {
                    created_clone.fetch_add(1, Ordering::SeqCst);
                }
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(created.load(Ordering::SeqCst), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_concurrent_create_different_accounts() {
        use std::thread;

        let store = Arc::new(InMemoryAccountStore::new());
        let mut handles = vec![];

        for i in 0..10 {
            let store_clone = Arc::clone(&store);
            let handle = thread::spawn(move || {
                store_clone
                    .create_account(Account::new(format!("Id-{}", i)))
                    .unwrap();
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 10);
    }
}
