//! Error types for the Rust Transfer Engine
//!
//! This module defines all error types that can occur while managing accounts
//! and executing transfers.
//!
//! # Error Categories
//!
//! - **Input Errors**: Empty account ids, negative amounts, same-account transfers
//! - **Lookup Errors**: Unknown account ids, duplicate account ids
//! - **Balance Errors**: Insufficient funds, arithmetic overflow
//! - **Collaborator Errors**: Failures raised by the account store or the notifier
//!
//! An insufficient balance during a transfer is *not* reported through this type.
//! The engine returns [`TransferOutcome::InsufficientFunds`](crate::types::TransferOutcome)
//! instead. The [`TransferError::InsufficientFunds`] variant is only produced by a
//! direct [`Account::withdraw`](crate::types::Account::withdraw) that breaks its precondition.

use super::account::AccountId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the transfer engine
///
/// Each variant includes the context needed to diagnose the failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransferError {
    /// The account id does not resolve to an existing account
    ///
    /// Raised before any lock is taken, so no state has been touched.
    #[error("Account id {account_id} does not exist")]
    AccountNotFound {
        /// The id that could not be resolved
        account_id: AccountId,
    },

    /// An account with this id already exists
    #[error("Account id {account_id} already exists")]
    DuplicateAccountId {
        /// The id that is already taken
        account_id: AccountId,
    },

    /// The account id is empty or blank
    #[error("Invalid account id: {reason}")]
    InvalidAccountId {
        /// Why the id was rejected
        reason: String,
    },

    /// The amount is negative
    #[error("Invalid amount {amount}: amount should not be negative")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Source and destination are the same account
    #[error("Cannot transfer from account {account_id} to itself")]
    SameAccount {
        /// The account named on both sides of the transfer
        account_id: AccountId,
    },

    /// A withdrawal was attempted without sufficient funds
    #[error(
        "Insufficient funds for account {account_id}: balance {balance}, requested {requested}"
    )]
    InsufficientFunds {
        /// Account id
        account_id: AccountId,
        /// Balance at the time of the withdrawal
        balance: Decimal,
        /// Requested withdrawal amount
        requested: Decimal,
    },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation} for account {account_id}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account id
        account_id: AccountId,
    },

    /// The account store failed to persist an account
    #[error("Account store error: {message}")]
    Store {
        /// Description of the store failure
        message: String,
    },

    /// The notifier failed to deliver a message
    #[error("Notification error for account {account_id}: {message}")]
    Notification {
        /// Account that should have been notified
        account_id: AccountId,
        /// Description of the delivery failure
        message: String,
    },
}

// Helper functions for creating common errors

impl TransferError {
    /// Create an AccountNotFound error
    pub fn account_not_found(account_id: &str) -> Self {
        TransferError::AccountNotFound {
            account_id: account_id.to_string(),
        }
    }

    /// Create a DuplicateAccountId error
    pub fn duplicate_account_id(account_id: &str) -> Self {
        TransferError::DuplicateAccountId {
            account_id: account_id.to_string(),
        }
    }

    /// Create an InvalidAccountId error
    pub fn invalid_account_id(reason: &str) -> Self {
        TransferError::InvalidAccountId {
            reason: reason.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        TransferError::InvalidAmount { amount }
    }

    /// Create a SameAccount error
    pub fn same_account(account_id: &str) -> Self {
        TransferError::SameAccount {
            account_id: account_id.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account_id: &str, balance: Decimal, requested: Decimal) -> Self {
        TransferError::InsufficientFunds {
            account_id: account_id.to_string(),
            balance,
            requested,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account_id: &str) -> Self {
        TransferError::ArithmeticOverflow {
            operation: operation.to_string(),
            account_id: account_id.to_string(),
        }
    }

    /// Create a Store error
    pub fn store(message: impl Into<String>) -> Self {
        TransferError::Store {
            message: message.into(),
        }
    }

    /// Create a Notification error
    pub fn notification(account_id: &str, message: impl Into<String>) -> Self {
        TransferError::Notification {
            account_id: account_id.to_string(),
            message: message.into(),
        }
    }
}
