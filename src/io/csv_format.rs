//! CSV format handling for operation records and account output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to domain operations
//! - Account output serialization
//!
//! # Input Format
//!
//! ```text
//! type,account,to,amount
//! create,Id-1,,1000
//! create,Id-2,,500
//! transfer,Id-1,Id-2,300
//! ```
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{Account, Operation, TransferRequest};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns: type, account, to, amount.
/// `to` is only meaningful for transfers.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    #[serde(rename = "type")]
    pub op_type: String,
    pub account: String,
    pub to: Option<String>,
    pub amount: Option<String>,
}

/// Convert a CsvRecord to an Operation
///
/// This function:
/// - Parses the operation type string (case-insensitive)
/// - Parses the amount string into a Decimal
/// - Requires an amount for every operation and a destination for transfers
///
/// Account creation is validated here, since an invalid [`Account`] cannot be
/// constructed. Transfer requests are validated by the engine.
///
/// # Returns
///
/// * `Ok(Operation)` - Successfully converted record
/// * `Err(String)` - Error message describing the conversion failure
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<Operation, String> {
    let op_type = csv_record.op_type.to_lowercase();

    let amount = match csv_record.amount.as_deref().map(str::trim) {
        Some(amount_str) if !amount_str.is_empty() => Decimal::from_str(amount_str).map_err(|_| {
            format!(
                "Invalid amount '{}' for account {}",
                amount_str, csv_record.account
            )
        })?,
        _ => {
            return Err(format!(
                "{} operation for account {} requires an amount",
                op_type, csv_record.account
            ))
        }
    };

    match op_type.as_str() {
        "create" => Account::new(csv_record.account, amount)
            .map(Operation::CreateAccount)
            .map_err(|e| e.to_string()),
        "transfer" => {
            let to = csv_record
                .to
                .filter(|to| !to.trim().is_empty())
                .ok_or_else(|| {
                    format!(
                        "transfer from account {} requires a destination account",
                        csv_record.account
                    )
                })?;

            Ok(Operation::Transfer(TransferRequest::new(
                csv_record.account,
                to,
                amount,
            )))
        }
        _ => Err(format!(
            "Invalid operation type: '{}' for account {}",
            csv_record.op_type, csv_record.account
        )),
    }
}

/// Write account states to CSV format
///
/// Writes accounts in CSV format with columns: account, balance.
/// Accounts are sorted by id for deterministic output; balances keep their
/// natural decimal form.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["account", "balance"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by(|a, b| a.id().cmp(b.id()));

    for account in sorted_accounts {
        writer
            .write_record([account.id(), account.balance().to_string().as_str()])
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
