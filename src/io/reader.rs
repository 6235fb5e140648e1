//! Synchronous CSV readers
//!
//! Provides the opening-account loader and a streaming iterator over transfer
//! requests. CSV format concerns are delegated to the `csv_format` module.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned when a file is opened
//! - Individual record errors carry the line number and are recoverable: the
//!   transfer reader yields them as `Err` items, the account loader logs and skips them
//!
//! # Memory Efficiency
//!
//! `TransferReader` reads one CSV record at a time; memory usage does not grow
//! with the number of transfers.

use crate::core::traits::AccountRepository;
use crate::io::csv_format::{
    convert_account_record, convert_transfer_record, AccountCsvRecord, TransferCsvRecord,
};
use crate::types::{TransferError, TransferRequest};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Open a CSV file with the reader settings shared by every input
fn open_csv(path: &Path) -> Result<csv::Reader<File>, TransferError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => TransferError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => TransferError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), e),
        },
    })?;

    Ok(ReaderBuilder::new()
        .trim(Trim::All)
        .buffer_capacity(8 * 1024)
        .from_reader(file))
}

/// Load opening accounts from a CSV file into `store`
///
/// Malformed rows and duplicate ids are logged and skipped.
///
/// # Returns
///
/// * `Ok(usize)` - Number of accounts created
/// * `Err(TransferError)` - The file could not be opened
pub fn load_accounts<S>(path: &Path, store: &S) -> Result<usize, TransferError>
where
    S: AccountRepository + ?Sized,
{
    let mut reader = open_csv(path)?;
    let mut created = 0;

    for (index, row) in reader.deserialize::<AccountCsvRecord>().enumerate() {
        // Header is line 1
        let line = index as u64 + 2;

        let account = match row {
            Ok(record) => convert_account_record(record)
                .map_err(|message| TransferError::parse_error(Some(line), message)),
            Err(e) => Err(TransferError::parse_error(Some(line), e.to_string())),
        };

        match account.and_then(|account| store.create_account(account)) {
            Ok(_) => created += 1,
            Err(e) => warn!(file = %path.display(), error = %e, "Skipping opening account"),
        }
    }

    debug!(file = %path.display(), created, "Opening accounts loaded");
    Ok(created)
}

/// Streaming reader over transfer requests
///
/// Yields `Result<TransferRequest, TransferError>` per CSV row; a malformed row
/// becomes a `ParseError` carrying its line number.
#[derive(Debug)]
pub struct TransferReader {
    reader: csv::Reader<File>,
    line_num: u64,
}

impl TransferReader {
    /// Open a transfers CSV file (`from,to,amount` header required)
    pub fn new(path: &Path) -> Result<Self, TransferError> {
        Ok(Self {
            reader: open_csv(path)?,
            line_num: 1,
        })
    }

    /// Read up to `batch_size` records
    ///
    /// Returns an empty vector at end of file.
    pub fn read_batch(&mut self, batch_size: usize) -> Vec<Result<TransferRequest, TransferError>> {
        self.by_ref().take(batch_size).collect()
    }
}

impl Iterator for TransferReader {
    type Item = Result<TransferRequest, TransferError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<TransferCsvRecord>();
        let row = deserializer.next()?;
        self.line_num += 1;

        Some(match row {
            Ok(record) => convert_transfer_record(record)
                .map_err(|message| TransferError::parse_error(Some(self.line_num), message)),
            Err(e) => Err(TransferError::parse_error(Some(self.line_num), e.to_string())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::InMemoryAccountStore;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_transfer_reader_fails_on_missing_file() {
        let result = TransferReader::new(Path::new("nonexistent.csv"));

        assert_eq!(
            result.unwrap_err(),
            TransferError::FileNotFound {
                path: "nonexistent.csv".to_string()
            }
        );
    }

    #[test]
    fn test_transfer_reader_iterates_records() {
        let file = create_temp_csv("from,to,amount\nA,B,500\nB, A ,12.5\n");

        let records: Vec<_> = TransferReader::new(file.path()).unwrap().collect();

        assert_eq!(
            records,
            vec![
                Ok(TransferRequest::new("A", "B", Decimal::from(500))),
                Ok(TransferRequest::new("B", "A", Decimal::new(125, 1))),
            ]
        );
    }

    #[test]
    fn test_transfer_reader_reports_line_numbers() {
        let file = create_temp_csv("from,to,amount\nA,B,500\nA,B,abc\nA,B\nA,B,1\n");

        let records: Vec<_> = TransferReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 4);
        assert!(records[0].is_ok());
        assert!(matches!(
            records[1],
            Err(TransferError::ParseError { line: Some(3), .. })
        ));
        assert!(matches!(
            records[2],
            Err(TransferError::ParseError { line: Some(4), .. })
        ));
        assert!(records[3].is_ok());
    }

    #[test]
    fn test_transfer_reader_reads_batches() {
        let file = create_temp_csv("from,to,amount\nA,B,1\nA,B,2\nA,B,3\n");
        let mut reader = TransferReader::new(file.path()).unwrap();

        assert_eq!(reader.read_batch(2).len(), 2);
        assert_eq!(reader.read_batch(2).len(), 1);
        assert!(reader.read_batch(2).is_empty());
    }

    #[test]
    fn test_load_accounts_skips_bad_rows() {
        let file = create_temp_csv("id,balance\nA,1000\nB,0\nC,-5\nA,10\nD,oops\n");
        let store = InMemoryAccountStore::new();

        let created = load_accounts(file.path(), &store).unwrap();

        assert_eq!(created, 2);
        assert_eq!(store.get_account("A").unwrap().balance(), Decimal::from(1000));
        assert_eq!(store.get_account("B").unwrap().balance(), Decimal::ZERO);
        assert!(store.get_account("C").is_none());
        assert!(store.get_account("D").is_none());
    }

    #[test]
    fn test_load_accounts_fails_on_missing_file() {
        let store = InMemoryAccountStore::new();

        let result = load_accounts(Path::new("missing-accounts.csv"), &store);

        assert!(matches!(result, Err(TransferError::FileNotFound { .. })));
    }
}
