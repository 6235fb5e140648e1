//! CSV format handling for account and transfer records
//!
//! This module centralizes all CSV format concerns, providing:
//! - CSV record structures for deserialization
//! - Conversion from CSV records to domain types
//! - Account output serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{Account, AccountSnapshot, TransferError, TransferRequest};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// Opening account row: `id,balance`
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AccountCsvRecord {
    pub id: String,
    pub balance: String,
}

/// Transfer request row: `from,to,amount`
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TransferCsvRecord {
    pub from: String,
    pub to: String,
    pub amount: String,
}

fn parse_decimal(field: &str, value: &str) -> Result<Decimal, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("Missing {}", field));
    }
    Decimal::from_str(trimmed).map_err(|_| format!("Invalid {} '{}'", field, value))
}

fn parse_id(field: &str, value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("Missing {} account id", field));
    }
    Ok(trimmed.to_string())
}

/// Convert an AccountCsvRecord to an Account
///
/// # Returns
///
/// * `Ok(Account)` - Account with the parsed opening balance
/// * `Err(String)` - Empty id, malformed or negative balance
pub fn convert_account_record(csv_record: AccountCsvRecord) -> Result<Account, String> {
    let id = parse_id("opening", &csv_record.id)?;
    let balance = parse_decimal("balance", &csv_record.balance)?;

    Account::with_balance(id, balance).map_err(|e| e.to_string())
}

/// Convert a TransferCsvRecord to a TransferRequest
///
/// The amount's sign is not checked here; the engine rejects non-positive
/// amounts so that they are reported as `InvalidAmount`.
pub fn convert_transfer_record(csv_record: TransferCsvRecord) -> Result<TransferRequest, String> {
    let from = parse_id("source", &csv_record.from)?;
    let to = parse_id("destination", &csv_record.to)?;
    let amount = parse_decimal("amount", &csv_record.amount)?;

    Ok(TransferRequest::new(from, to, amount))
}

/// Write account states to CSV format
///
/// Writes accounts with columns `id,balance`, sorted by id for deterministic
/// output, balances with four decimal places.
pub fn write_accounts_csv(
    accounts: &[AccountSnapshot],
    output: &mut dyn Write,
) -> Result<(), TransferError> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer.write_record(["id", "balance"])?;

    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by(|a, b| a.id.cmp(&b.id));

    for account in sorted_accounts {
        writer.write_record(&[account.id, format!("{:.4}", account.balance)])?;
    }

    writer.flush()?;

    Ok(())
}
