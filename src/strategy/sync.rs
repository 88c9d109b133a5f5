//! Synchronous processing strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ProcessingStrategy trait. It orchestrates processing by coordinating between
//! the SyncReader (for CSV input) and TransferEngine (for business logic).
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Account creation and transfers to `TransferEngine`
//! - CSV output to `csv_format::write_accounts_csv` (format handling)
//!
//! Operations are applied strictly in input order, which makes this strategy
//! the reference result for the concurrent one.

use crate::core::{InMemoryAccountStore, Notifier, TransferEngine};
use crate::io::csv_format::write_accounts_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use rust_transfer_engine::core::LoggingNotifier;
/// use rust_transfer_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::sync::Arc;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(Arc::new(LoggingNotifier));
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("operations.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Clone)]
pub struct SyncProcessingStrategy {
    notifier: Arc<dyn Notifier>,
}

impl SyncProcessingStrategy {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Process operations from input file and write balances to output
    ///
    /// 1. Creates a TransferEngine over an empty in-memory store
    /// 2. Streams operations from the CSV file, applying each in turn
    /// 3. Writes the final balances using csv_format::write_accounts_csv
    ///
    /// Fatal errors (file not found, I/O errors) are returned immediately.
    /// Rejected operations are logged and processing continues.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let engine = TransferEngine::new(
            Arc::new(InMemoryAccountStore::new()),
            Arc::clone(&self.notifier),
        );

        let reader = SyncReader::new(input_path)?;

        for result in reader {
            match result {
                Ok(operation) => {
                    if let Err(e) = engine.process(operation) {
                        tracing::warn!("Operation rejected: {}", e);
                    }
                }
                Err(e) => tracing::warn!("CSV parsing error: {}", e),
            }
        }

        write_accounts_csv(&engine.accounts(), output)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CsvNotifier, LoggingNotifier};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn run(content: &str) -> String {
        let file = create_temp_csv(content);
        let strategy = SyncProcessingStrategy::new(Arc::new(LoggingNotifier));
        let mut output = Vec::new();

        strategy.process(file.path(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_sync_strategy_applies_transfers_in_order() {
        let output = run("type,account,to,amount\n\
                          create,Id-1,,100\n\
                          create,Id-2,,0\n\
                          transfer,Id-1,Id-2,80\n\
                          transfer,Id-1,Id-2,30\n\
                          transfer,Id-2,Id-1,10\n");

        // The second transfer is skipped: only 20 left after the first
        assert_eq!(output, "account,balance\nId-1,30\nId-2,70\n");
    }

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let strategy = SyncProcessingStrategy::new(Arc::new(LoggingNotifier));
        let mut output = Vec::new();

        let result = strategy.process(Path::new("nonexistent.csv"), &mut output);
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_sync_strategy_continues_on_rejected_operations() {
        let output = run("type,account,to,amount\n\
                          create,Id-1,,100\n\
                          create,Id-1,,999\n\
                          create,Id-2,,invalid\n\
                          transfer,Id-1,Id-9,10\n\
                          transfer,Id-1,Id-1,10\n\
                          create,Id-3,,5\n");

        assert_eq!(output, "account,balance\nId-1,100\nId-3,5\n");
    }

    #[test]
    fn test_sync_strategy_sends_notifications() {
        let file = create_temp_csv(
            "type,account,to,amount\n\
             create,Id-1,,1000\n\
             create,Id-2,,500\n\
             transfer,Id-1,Id-2,300\n",
        );
        let notifier = Arc::new(CsvNotifier::new(Vec::new()).unwrap());
        let strategy = SyncProcessingStrategy::new(Arc::clone(&notifier) as Arc<dyn Notifier>);

        strategy.process(file.path(), &mut Vec::new()).unwrap();
        drop(strategy);

        let notifier = Arc::try_unwrap(notifier).ok().unwrap();
        let notifications = String::from_utf8(notifier.into_inner().unwrap()).unwrap();
        assert_eq!(
            notifications,
            "account,message\n\
             Id-1,Amount 300 is transferred to account Id-2\n\
             Id-2,Amount 300 is deposited from account Id-1\n"
        );
    }

    #[test]
    fn test_sync_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyncProcessingStrategy>();
    }
}
