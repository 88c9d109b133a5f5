//! End-to-end integration tests
//!
//! These tests validate the complete batch pipeline using predefined CSV test
//! fixtures. Each test:
//! 1. Reads input.csv from a fixture directory
//! 2. Applies all operations through the engine
//! 3. Generates output CSV
//! 4. Compares actual output with expected.csv
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Happy path, circular and dependent transfers
//! - Rejected operations (unknown accounts, duplicates, self transfers)
//! - Skipped transfers (insufficient funds, competing overdraws)
//! - Decimal precision and malformed rows
//!
//! Each test is run with both strategies, which must produce identical output.

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_transfer_engine::cli::StrategyType;
    use rust_transfer_engine::core::{CsvNotifier, LoggingNotifier, Notifier};
    use rust_transfer_engine::strategy::{create_strategy, BatchConfig};
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    /// Run a test fixture by processing input.csv and comparing with expected.csv
    fn run_test_fixture(fixture_name: &str, strategy_type: StrategyType, config: Option<BatchConfig>) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/input.csv", fixture_dir);
        let expected_path = format!("{}/expected.csv", fixture_dir);

        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );
        assert!(
            Path::new(&expected_path).exists(),
            "Expected file not found: {}",
            expected_path
        );

        let strategy = create_strategy(strategy_type.clone(), config, Arc::new(LoggingNotifier));

        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");

        strategy
            .process(Path::new(&input_path), &mut temp_output)
            .unwrap_or_else(|e| panic!("Failed to process operations: {}", e));

        temp_output.flush().expect("Failed to flush temp file");

        let actual_output = fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e));

        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (strategy: {:?})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, strategy_type, actual_output, expected_output
        );
    }

    /// End-to-end test for all fixtures with both processing strategies
    #[rstest]
    #[case("happy_path")]
    #[case("insufficient_funds")]
    #[case("unknown_account")]
    #[case("circular_transfers")]
    #[case("dependent_transfers")]
    #[case("duplicate_accounts")]
    #[case("same_account")]
    #[case("concurrent_overdraw")]
    #[case("decimal_precision")]
    #[case("malformed_data")]
    fn test_fixtures(
        #[case] fixture: &str,
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        run_test_fixture(fixture, strategy, None);
    }

    /// Small batches split runs across batch boundaries
    #[rstest]
    #[case("circular_transfers")]
    #[case("dependent_transfers")]
    #[case("unknown_account")]
    #[case("malformed_data")]
    fn test_fixtures_with_small_batches(
        #[case] fixture: &str,
        #[values(1, 2, 3)] batch_size: usize,
    ) {
        run_test_fixture(
            fixture,
            StrategyType::Async,
            Some(BatchConfig::new(batch_size, 4)),
        );
    }

    #[rstest]
    fn test_notifications_written_per_transfer(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy_type: StrategyType,
    ) {
        let notifications = NamedTempFile::new().expect("Failed to create temp file");
        let file = File::create(notifications.path()).unwrap();
        let notifier: Arc<dyn Notifier> = Arc::new(CsvNotifier::new(file).unwrap());

        let strategy = create_strategy(strategy_type, None, notifier);
        strategy
            .process(Path::new("tests/fixtures/happy_path/input.csv"), &mut Vec::new())
            .unwrap();

        let written = fs::read_to_string(notifications.path()).unwrap();
        assert_eq!(
            written,
            "account,message\n\
             Id-1,Amount 300 is transferred to account Id-2\n\
             Id-2,Amount 300 is deposited from account Id-1\n"
        );
    }

    #[rstest]
    fn test_skipped_transfers_send_no_notifications(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy_type: StrategyType,
    ) {
        let notifications = NamedTempFile::new().expect("Failed to create temp file");
        let file = File::create(notifications.path()).unwrap();
        let notifier: Arc<dyn Notifier> = Arc::new(CsvNotifier::new(file).unwrap());

        let strategy = create_strategy(strategy_type, None, notifier);
        strategy
            .process(
                Path::new("tests/fixtures/concurrent_overdraw/input.csv"),
                &mut Vec::new(),
            )
            .unwrap();

        // Exactly one of the two competing transfers was applied
        let written = fs::read_to_string(notifications.path()).unwrap();
        assert_eq!(written.lines().count(), 3);
        assert_eq!(
            written.lines().filter(|l| l.starts_with("A,")).count(),
            1
        );
    }
}
