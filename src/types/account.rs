//! Account-related types for the Rust Transfer Engine
//!
//! This module defines the [`Account`] record and the [`SharedAccount`] handle
//! that owns the record's lock.
//!
//! # Locking
//!
//! Every account record lives behind its own `parking_lot::Mutex`. The store
//! hands out [`AccountHandle`]s (reference-counted `SharedAccount`s), so every
//! holder locks and mutates the same in-memory record rather than a copy.
//!
//! When two accounts must be held at once, [`SharedAccount::lock_pair`] acquires
//! them in a fixed global order: the lexicographically greater id first. The
//! order never depends on which side of a transfer an account is on, so two
//! transfers over the same pair (in either direction) cannot wait on each other
//! in a cycle.

use super::error::TransferError;
use parking_lot::{Mutex, MutexGuard};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Account identifier
///
/// Opaque, non-empty and immutable after creation. Ordered lexicographically.
pub type AccountId = String;

/// Shared, lockable handle to a live account record
pub type AccountHandle = Arc<SharedAccount>;

/// Account state
///
/// The balance is never negative. It can only change through [`Account::deposit`]
/// and [`Account::withdraw`], which callers must invoke while holding the
/// account's lock.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    id: AccountId,
    balance: Decimal,
}

impl Account {
    /// Create a new account with an opening balance
    ///
    /// # Errors
    ///
    /// - `InvalidAccountId` if the id is empty or only whitespace
    /// - `InvalidAmount` if the opening balance is negative
    pub fn new(id: impl Into<AccountId>, balance: Decimal) -> Result<Self, TransferError> {
        let id = id.into();

        if id.trim().is_empty() {
            return Err(TransferError::invalid_account_id(
                "account id must not be empty",
            ));
        }

        if balance < Decimal::ZERO {
            return Err(TransferError::invalid_amount(balance));
        }

        Ok(Account { id, balance })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Whether the balance covers `amount`
    pub fn has_sufficient_balance(&self, amount: Decimal) -> bool {
        self.balance >= amount
    }

    /// Credit `amount` to the account
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount` is negative
    /// - `ArithmeticOverflow` if the new balance is not representable
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), TransferError> {
        if amount < Decimal::ZERO {
            return Err(TransferError::invalid_amount(amount));
        }

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| TransferError::arithmetic_overflow("deposit", &self.id))?;

        Ok(())
    }

    /// Debit `amount` from the account
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount` is negative
    /// - `InsufficientFunds` if the balance does not cover `amount`;
    ///   the balance is left unchanged
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), TransferError> {
        if amount < Decimal::ZERO {
            return Err(TransferError::invalid_amount(amount));
        }

        if !self.has_sufficient_balance(amount) {
            return Err(TransferError::insufficient_funds(
                &self.id,
                self.balance,
                amount,
            ));
        }

        self.balance -= amount;

        Ok(())
    }
}

/// An account record guarded by its own lock
///
/// The id is kept outside the lock so that lock order can be decided without
/// taking either lock.
#[derive(Debug)]
pub struct SharedAccount {
    id: AccountId,
    record: Mutex<Account>,
}

impl SharedAccount {
    pub fn new(account: Account) -> Self {
        Self {
            id: account.id.clone(),
            record: Mutex::new(account),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Block until the account's lock is acquired
    ///
    /// The lock is released when the returned guard is dropped.
    pub fn lock(&self) -> MutexGuard<'_, Account> {
        self.record.lock()
    }

    /// Copy of the current record, taken under the lock
    pub fn snapshot(&self) -> Account {
        self.record.lock().clone()
    }

    /// Current balance, read under the lock
    pub fn balance(&self) -> Decimal {
        self.record.lock().balance
    }

    /// The two accounts in lock acquisition order: greater id first
    pub fn acquisition_order<'a>(
        from: &'a SharedAccount,
        to: &'a SharedAccount,
    ) -> (&'a SharedAccount, &'a SharedAccount) {
        if from.id > to.id {
            (from, to)
        } else {
            (to, from)
        }
    }

    /// Lock both accounts in global order and return the guards as `(from, to)`
    ///
    /// `from` and `to` must be different accounts; the locks are not reentrant.
    pub fn lock_pair<'a>(
        from: &'a SharedAccount,
        to: &'a SharedAccount,
    ) -> (MutexGuard<'a, Account>, MutexGuard<'a, Account>) {
        debug_assert_ne!(from.id, to.id, "lock_pair needs two distinct accounts");

        let (first, second) = Self::acquisition_order(from, to);
        let first_guard = first.lock();
        let second_guard = second.lock();

        if std::ptr::eq(first, from) {
            (first_guard, second_guard)
        } else {
            (second_guard, first_guard)
        }
    }
}
