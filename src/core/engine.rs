//! Transfer execution engine
//!
//! This module provides the `TransferEngine`, which moves funds between two
//! accounts held in an [`AccountStore`] and reports each completed transfer
//! through a [`Notifier`].
//!
//! # Transfer Path
//!
//! ```text
//! validate request
//!     → resolve both accounts (AccountNotFound, no locks taken)
//!     → lock both records, greater id first
//!     → check funds (InsufficientFunds outcome, nothing touched)
//!     → withdraw from source, deposit to destination
//!     → store.update(from), store.update(to)
//!     → notify(from, debit), notify(to, credit)
//!     → release locks
//! ```
//!
//! # Thread Safety
//!
//! The engine is cheap to clone and safe to call from any number of threads.
//! There is no engine-wide lock: transfers over disjoint account pairs run in
//! parallel, and transfers sharing an account are serialized by that account's
//! lock. Store and notifier calls happen while both locks are held, so their
//! order for a given account matches the order of its balance changes.

use crate::core::traits::{AccountStore, Notifier};
use crate::types::{
    Account, AccountHandle, Operation, SharedAccount, TransferError, TransferOutcome,
    TransferRequest,
};
use std::sync::Arc;

/// Transfer orchestrator over an account store and a notifier
#[derive(Clone)]
pub struct TransferEngine {
    store: Arc<dyn AccountStore>,
    notifier: Arc<dyn Notifier>,
}

impl TransferEngine {
    pub fn new(store: Arc<dyn AccountStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Open a new account
    ///
    /// # Errors
    ///
    /// `DuplicateAccountId` if an account with the same id exists.
    pub fn create_account(&self, account: Account) -> Result<AccountHandle, TransferError> {
        self.store.create(account)
    }

    /// Live handle for an account, if it exists
    pub fn get_account(&self, account_id: &str) -> Option<AccountHandle> {
        self.store.get(account_id)
    }

    /// Remove every account
    pub fn clear_accounts(&self) {
        self.store.clear_all();
    }

    /// Copies of all accounts, sorted by id
    pub fn accounts(&self) -> Vec<Account> {
        self.store.snapshot()
    }

    /// Apply one batch operation
    ///
    /// A transfer skipped for insufficient funds is logged and reported as
    /// success, matching the silent contract of the transfer endpoint.
    pub fn process(&self, operation: Operation) -> Result<(), TransferError> {
        match operation {
            Operation::CreateAccount(account) => self.create_account(account).map(|_| ()),
            Operation::Transfer(request) => {
                if self.execute_transfer(&request)? == TransferOutcome::InsufficientFunds {
                    tracing::warn!(
                        from = %request.from_account_id,
                        to = %request.to_account_id,
                        amount = %request.amount,
                        "transfer skipped: insufficient funds"
                    );
                }
                Ok(())
            }
        }
    }

    /// Move `request.amount` from the source to the destination account
    ///
    /// # Returns
    ///
    /// * `Ok(TransferOutcome::Applied)` - balances changed, both records
    ///   persisted, both holders notified
    /// * `Ok(TransferOutcome::InsufficientFunds)` - the source balance did not
    ///   cover the amount; no mutation, no update, no notification
    ///
    /// # Errors
    ///
    /// Raised before any lock is taken, with no state touched:
    /// - `InvalidAccountId`, `InvalidAmount`, `SameAccount` from request validation
    /// - `AccountNotFound` for the source id, then for the destination id
    ///
    /// Raised under the locks:
    /// - `ArithmeticOverflow` if the destination balance would overflow; the
    ///   debit is undone before returning
    /// - Store or notifier failures, propagated as-is. The balances have already
    ///   changed at that point and are not rolled back.
    pub fn execute_transfer(
        &self,
        request: &TransferRequest,
    ) -> Result<TransferOutcome, TransferError> {
        let _span = tracing::debug_span!(
            "transfer",
            from = %request.from_account_id,
            to = %request.to_account_id,
            amount = %request.amount
        )
        .entered();

        request.validate()?;

        let from = self
            .store
            .get(&request.from_account_id)
            .ok_or_else(|| TransferError::account_not_found(&request.from_account_id))?;
        let to = self
            .store
            .get(&request.to_account_id)
            .ok_or_else(|| TransferError::account_not_found(&request.to_account_id))?;

        let amount = request.amount;
        let (mut from_account, mut to_account) = SharedAccount::lock_pair(&from, &to);
        tracing::trace!("account locks acquired");

        if !from_account.has_sufficient_balance(amount) {
            tracing::debug!(balance = %from_account.balance(), "insufficient funds");
            return Ok(TransferOutcome::InsufficientFunds);
        }

        from_account.withdraw(amount)?;
        if let Err(e) = to_account.deposit(amount) {
            // Undo the debit so neither balance changes
            from_account.deposit(amount)?;
            return Err(e);
        }

        self.store.update(&from_account)?;
        self.store.update(&to_account)?;

        self.notifier.notify(&from_account, &request.debit_message())?;
        self.notifier.notify(&to_account, &request.credit_message())?;

        tracing::debug!(
            from_balance = %from_account.balance(),
            to_balance = %to_account.balance(),
            "transfer applied"
        );

        Ok(TransferOutcome::Applied)
    }
}
