//! I/O module
//!
//! Handles CSV parsing and output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, output serialization)
//! - `reader` - Streaming transfer reader and opening-account loader

pub mod csv_format;
pub mod reader;

pub use csv_format::{
    convert_account_record, convert_transfer_record, write_accounts_csv, AccountCsvRecord,
    TransferCsvRecord,
};
pub use reader::{load_accounts, TransferReader};
