//! Processing strategy module for batch files
//!
//! This module defines the Strategy pattern for complete processing pipelines,
//! encompassing both CSV parsing and transfer engine processing. This allows
//! different processing implementations (synchronous, asynchronous batch) to be
//! selected at runtime.

use crate::cli::StrategyType;
use crate::core::Notifier;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete batch processing pipelines
///
/// Each strategy reads operations from a CSV file, applies them through a
/// fresh [`TransferEngine`](crate::core::TransferEngine), and writes the final
/// account balances to output.
pub trait ProcessingStrategy: Send + Sync {
    /// Process operations from input file and write balances to output
    ///
    /// # Returns
    ///
    /// * `Ok(())` if all processing completed (possibly with rejected operations)
    /// * `Err(String)` if a fatal error occurred (file not found, I/O error, etc.)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened (file not found, permission denied)
    /// - The async runtime cannot be created
    /// - Output cannot be written
    ///
    /// Individual operation errors are logged as warnings and do not stop
    /// processing. Processing continues with the next operation.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional configuration for async batch processing (ignored for sync)
/// * `notifier` - Receives a message for each side of every applied transfer
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
    notifier: Arc<dyn Notifier>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(notifier)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, notifier))
        }
    }
}
