//! Transfer-related types for the Rust Transfer Engine
//!
//! This module defines the transfer request submitted to the engine, the outcome
//! the engine reports, and the batch operations read by the CLI front end.

use super::account::{Account, AccountId};
use super::error::TransferError;
use rust_decimal::Decimal;
use serde::Deserialize;

/// A request to move `amount` from one account to another
///
/// Constructed per request and never persisted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from_account_id: AccountId,
    pub to_account_id: AccountId,
    pub amount: Decimal,
}

impl TransferRequest {
    pub fn new(
        from_account_id: impl Into<AccountId>,
        to_account_id: impl Into<AccountId>,
        amount: Decimal,
    ) -> Self {
        Self {
            from_account_id: from_account_id.into(),
            to_account_id: to_account_id.into(),
            amount,
        }
    }

    /// Validate the request shape before any account is looked up
    ///
    /// # Errors
    ///
    /// - `InvalidAccountId` if either id is empty or blank
    /// - `InvalidAmount` if the amount is negative
    /// - `SameAccount` if both ids name the same account
    pub fn validate(&self) -> Result<(), TransferError> {
        if self.from_account_id.trim().is_empty() {
            return Err(TransferError::invalid_account_id(
                "source account id must not be empty",
            ));
        }

        if self.to_account_id.trim().is_empty() {
            return Err(TransferError::invalid_account_id(
                "destination account id must not be empty",
            ));
        }

        if self.amount < Decimal::ZERO {
            return Err(TransferError::invalid_amount(self.amount));
        }

        if self.from_account_id == self.to_account_id {
            return Err(TransferError::same_account(&self.from_account_id));
        }

        Ok(())
    }

    /// Message sent to the debited account holder
    pub fn debit_message(&self) -> String {
        format!(
            "Amount {} is transferred to account {}",
            self.amount, self.to_account_id
        )
    }

    /// Message sent to the credited account holder
    pub fn credit_message(&self) -> String {
        format!(
            "Amount {} is deposited from account {}",
            self.amount, self.from_account_id
        )
    }
}

/// Result of a transfer that passed validation and lookup
///
/// An insufficient balance is a business outcome, not an error: nothing is
/// mutated, persisted, or notified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Both balances were updated, persisted, and both parties notified
    Applied,
    /// The source balance did not cover the amount; nothing happened
    InsufficientFunds,
}

/// A single operation read from the batch input
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Open a new account with an opening balance
    CreateAccount(Account),
    /// Move funds between two existing accounts
    Transfer(TransferRequest),
}

impl Operation {
    pub fn is_transfer(&self) -> bool {
        matches!(self, Operation::Transfer(_))
    }
}
