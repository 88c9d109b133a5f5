//! Rust Transfer Engine Library
//! # Overview
//!
//! This library moves funds between in-memory accounts under concurrent load,
//! with a CSV batch front end offering a sync and an async strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, SharedAccount, TransferRequest, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - Transfer orchestration with ordered per-account locking
//!   - [`core::account_store`] - Concurrent id → account index
//!   - [`core::notifier`] - Delivery of per-account transfer messages
//!   - [`core::batch_processor`] - Concurrent application of operation batches
//! - [`io`] - Operation CSV parsing and balance output
//! - [`strategy`] - Complete file → balances pipelines
//! - [`logging`] - Diagnostic logging setup
//!
//! # Transfers
//!
//! A transfer debits the source and credits the destination atomically with
//! respect to every other transfer touching either account. Both account locks
//! are taken in a fixed global order (greater id first), so opposite-direction
//! transfers between the same pair cannot deadlock.
//!
//! A transfer the source balance cannot cover is skipped without error and
//! reported as [`TransferOutcome::InsufficientFunds`].
//!
//! # Example
//!
//! ```
//! use rust_transfer_engine::{
//!     Account, InMemoryAccountStore, LoggingNotifier, TransferEngine, TransferOutcome,
//!     TransferRequest,
//! };
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! let engine = TransferEngine::new(
//!     Arc::new(InMemoryAccountStore::new()),
//!     Arc::new(LoggingNotifier),
//! );
//! engine.create_account(Account::new("Id-1", Decimal::new(1000, 0)).unwrap()).unwrap();
//! engine.create_account(Account::new("Id-2", Decimal::new(500, 0)).unwrap()).unwrap();
//!
//! let outcome = engine
//!     .execute_transfer(&TransferRequest::new("Id-1", "Id-2", Decimal::new(300, 0)))
//!     .unwrap();
//!
//! assert_eq!(outcome, TransferOutcome::Applied);
//! assert_eq!(engine.get_account("Id-1").unwrap().balance(), Decimal::new(700, 0));
//! assert_eq!(engine.get_account("Id-2").unwrap().balance(), Decimal::new(800, 0));
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod strategy;
pub mod types;

pub use core::{
    AccountStore, BatchProcessor, CsvNotifier, InMemoryAccountStore, LoggingNotifier, Notifier,
    TransferEngine,
};
pub use io::write_accounts_csv;
pub use types::{
    Account, AccountHandle, AccountId, Operation, SharedAccount, TransferError, TransferOutcome,
    TransferRequest,
};
