//! Asynchronous batch processing strategy
//!
//! This module provides a multi-threaded implementation of the
//! ProcessingStrategy trait. Operations are read in batches and each batch is
//! applied through a [`BatchProcessor`], which runs transfers concurrently.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, workers)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (run + account group partitioning)
//!     └── TransferEngine (per-account locking)
//!         └── InMemoryAccountStore (DashMap of account handles)
//! ```
//!
//! # Ordering
//!
//! Batches are applied one after another, and within a batch every run of
//! account creations finishes before the following transfers start. Transfers
//! that share an account, directly or through other transfers, are applied in
//! input order; only unrelated transfers run in parallel. The final balances
//! therefore match the sequential strategy for any input.

use crate::core::{BatchProcessor, InMemoryAccountStore, Notifier, TransferEngine};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_accounts_csv;
use crate::strategy::ProcessingStrategy;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Configuration for batch processing
///
/// Controls how many operations are read per batch and how many worker
/// threads apply transfers within each batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of operations per batch
    pub batch_size: usize,
    /// Number of worker threads applying transfers
    pub workers: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            workers: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values are replaced by the defaults with a warning.
    pub fn new(batch_size: usize, workers: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            tracing::warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size,
                default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let workers = if workers == 0 {
            tracing::warn!(
                "Invalid workers ({}), using default ({})",
                workers,
                default.workers
            );
            default.workers
        } else {
            workers
        };

        Self {
            batch_size,
            workers,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
    notifier: Arc<dyn Notifier>,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self { config, notifier }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process operations from input file and write balances to output
    ///
    /// 1. Creates a tokio multi-threaded runtime with `workers` threads
    /// 2. Reads operations in batches using AsyncReader
    /// 3. Applies each batch and waits for it before reading the next
    /// 4. Writes the final balances using csv_format::write_accounts_csv
    ///
    /// Fatal errors (file not found, I/O errors, runtime errors) are returned
    /// immediately. Rejected operations are logged and processing continues.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.workers)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let engine = TransferEngine::new(
                Arc::new(InMemoryAccountStore::new()),
                Arc::clone(&self.notifier),
            );
            let processor = BatchProcessor::new(engine.clone(), self.config.workers);

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // Wrap tokio file in a compatibility layer for csv-async
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                tracing::debug!(operations = batch.len(), "processing batch");
                for processed in processor.process_batch(batch).await {
                    if let Err(e) = processed.result {
                        tracing::warn!("Operation rejected: {}", e);
                    }
                }
            }

            write_accounts_csv(&engine.accounts(), output)?;

            Ok(())
        })
    }
}
