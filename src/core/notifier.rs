//! Notifier implementations
//!
//! - [`LoggingNotifier`] emits each notification as a `tracing` event
//! - [`CsvNotifier`] appends each notification as an `account,message` CSV row

use crate::core::traits::Notifier;
use crate::types::{Account, TransferError};
use parking_lot::Mutex;
use std::io::Write;

/// Notifier that reports messages through the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNotifier;

impl Notifier for LoggingNotifier {
    fn notify(&self, account: &Account, message: &str) -> Result<(), TransferError> {
        tracing::info!(account_id = account.id(), "{}", message);
        Ok(())
    }
}

/// Notifier that writes messages to a CSV sink
///
/// Rows are written under an internal lock, so concurrent transfers never
/// interleave within a row. Each row is flushed before `notify` returns.
pub struct CsvNotifier<W: Write + Send> {
    writer: Mutex<csv::Writer<W>>,
}

impl<W: Write + Send> CsvNotifier<W> {
    /// Create a notifier and write the `account,message` header
    pub fn new(output: W) -> Result<Self, TransferError> {
        let mut writer = csv::Writer::from_writer(output);
        writer
            .write_record(["account", "message"])
            .map_err(|e| TransferError::notification("-", e.to_string()))?;

        Ok(Self {
            writer: Mutex::new(writer),
        })
    }

    /// Flush and return the underlying writer
    pub fn into_inner(self) -> Result<W, TransferError> {
        self.writer
            .into_inner()
            .into_inner()
            .map_err(|e| TransferError::notification("-", e.error().to_string()))
    }
}

impl<W: Write + Send> Notifier for CsvNotifier<W> {
    fn notify(&self, account: &Account, message: &str) -> Result<(), TransferError> {
        let mut writer = self.writer.lock();
        writer
            .write_record([account.id(), message])
            .and_then(|_| writer.flush().map_err(csv::Error::from))
            .map_err(|e| TransferError::notification(account.id(), e.to_string()))
    }
}
