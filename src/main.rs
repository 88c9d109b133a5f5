//! Rust Transfer Engine CLI
//!
//! Command-line interface for applying account creations and transfers from
//! CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- operations.csv > balances.csv
//! cargo run -- --strategy sync operations.csv > balances.csv
//! cargo run -- --strategy async --batch-size 2000 --workers 8 operations.csv > balances.csv
//! cargo run -- --notifications notifications.csv operations.csv > balances.csv
//! ```
//!
//! The program reads operations from the input CSV file, applies them through
//! the transfer engine using the selected processing strategy, and outputs the
//! final balances to stdout. Diagnostics go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, output not writable, etc.)

use rust_transfer_engine::cli;
use rust_transfer_engine::core::{CsvNotifier, LoggingNotifier, Notifier};
use rust_transfer_engine::logging;
use rust_transfer_engine::strategy;
use std::fs::File;
use std::io::BufWriter;
use std::process;
use std::sync::Arc;

fn main() {
    let args = cli::parse_args();

    if let Err(e) = logging::init_logging(&args.log_level) {
        eprintln!("Warning: {}", e);
    }

    let notifier: Arc<dyn Notifier> = match &args.notifications {
        Some(path) => {
            let file = File::create(path).unwrap_or_else(|e| {
                eprintln!(
                    "Error: Failed to create notification file '{}': {}",
                    path.display(),
                    e
                );
                process::exit(1);
            });
            match CsvNotifier::new(BufWriter::new(file)) {
                Ok(notifier) => Arc::new(notifier),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            }
        }
        None => Arc::new(LoggingNotifier),
    };

    let strategy = {
        let config = if args.strategy == cli::StrategyType::Async {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), config, notifier)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
