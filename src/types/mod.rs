//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account record and its lock-owning shared handle
//! - `transfer`: Transfer requests, outcomes and batch operations
//! - `error`: Error types for the transfer engine

pub mod account;
pub mod error;
pub mod transfer;

pub use account::{Account, AccountHandle, AccountId, SharedAccount};
pub use error::TransferError;
pub use transfer::{Operation, TransferOutcome, TransferRequest};
