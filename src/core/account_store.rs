//! Thread-safe in-memory account store
//!
//! This module provides the `InMemoryAccountStore`, which keeps account handles in
//! a `DashMap`. The map only guards the id → handle index; balances are guarded by
//! each account's own lock, so creating or looking up one account never blocks a
//! transfer that is holding another.

use crate::core::traits::AccountStore;
use crate::types::{Account, AccountHandle, AccountId, SharedAccount, TransferError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory account store backed by a concurrent map
///
/// # Thread Safety
///
/// `create`, `get` and `clear_all` may race freely with each other and with
/// transfers. `create` is atomic per id: of two concurrent creations with the
/// same id, exactly one succeeds.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: DashMap<AccountId, AccountHandle>,
}

impl InMemoryAccountStore {
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

impl AccountStore for InMemoryAccountStore {
    fn create(&self, account: Account) -> Result<AccountHandle, TransferError> {
        match self.accounts.entry(account.id().to_string()) {
            Entry::Occupied(entry) => Err(TransferError::duplicate_account_id(entry.key())),
            Entry::Vacant(entry) => {
                let handle = Arc::new(SharedAccount::new(account));
                entry.insert(Arc::clone(&handle));
                tracing::debug!(account_id = handle.id(), "account created");
                Ok(handle)
            }
        }
    }

    fn get(&self, account_id: &str) -> Option<AccountHandle> {
        self.accounts
            .get(account_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    fn update(&self, account: &Account) -> Result<(), TransferError> {
        // Records are mutated in place through their handles.
        tracing::trace!(
            account_id = account.id(),
            balance = %account.balance(),
            "account updated"
        );
        Ok(())
    }

    fn clear_all(&self) {
        self.accounts.clear();
        tracing::debug!("all accounts cleared");
    }

    fn snapshot(&self) -> Vec<Account> {
        // Clone the handles first so no map shard is held while taking account locks.
        let handles: Vec<AccountHandle> = self
            .accounts
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let mut accounts: Vec<Account> = handles.iter().map(|h| h.snapshot()).collect();
        accounts.sort_by(|a, b| a.id().cmp(b.id()));
        accounts
    }
}
