//! Core business logic module
//!
//! This module contains the transfer processing components:
//! - `traits` - Collaborator seams (account store, notifier)
//! - `engine` - Transfer execution with ordered per-account locking
//! - `account_store` - Thread-safe in-memory account store
//! - `notifier` - Logging and CSV notifiers
//! - `batch_processor` - Concurrent execution of operation batches

pub mod account_store;
pub mod batch_processor;
pub mod engine;
pub mod notifier;
pub mod traits;

pub use account_store::InMemoryAccountStore;
pub use batch_processor::BatchProcessor;
pub use engine::TransferEngine;
pub use notifier::{CsvNotifier, LoggingNotifier};
pub use traits::{AccountStore, Notifier};
