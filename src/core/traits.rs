//! Core traits for account storage and transfer notifications
//!
//! These are the two collaborator seams of the transfer engine. Both traits are
//! object safe and `Send + Sync` so the engine can share them across worker
//! threads behind an `Arc<dyn ...>`.

use crate::types::{Account, AccountHandle, TransferError};

/// Trait for storing account records
///
/// The store owns the canonical records. Lookups return live handles, so a
/// mutation made through a handle is visible to every other holder without a
/// separate write-back.
pub trait AccountStore: Send + Sync {
    /// Insert a new account and return its live handle
    ///
    /// Fails with `DuplicateAccountId` if the id is already present.
    fn create(&self, account: Account) -> Result<AccountHandle, TransferError>;

    /// Look up the live handle for an account
    fn get(&self, account_id: &str) -> Option<AccountHandle>;

    /// Persist the current state of an account
    ///
    /// Called by the engine while it still holds the account's lock.
    fn update(&self, account: &Account) -> Result<(), TransferError>;

    /// Remove every account
    fn clear_all(&self);

    /// Copies of all accounts, sorted by id
    fn snapshot(&self) -> Vec<Account>;
}

/// Trait for notifying account holders about transfers
pub trait Notifier: Send + Sync {
    /// Deliver `message` to the holder of `account`
    fn notify(&self, account: &Account, message: &str) -> Result<(), TransferError>;
}
