//! Synchronous processing strategy
//!
//! This module provides a sequential implementation of the ProcessingStrategy
//! trait. It coordinates the opening-account loader, the `TransferReader` and the
//! `TransferEngine`, applying transfers one at a time in file order.
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - CSV parsing to `io::reader` (iterator interface)
//! - Transfer semantics to `TransferEngine`
//! - CSV output to `csv_format::write_accounts_csv`
//!
//! Notifications go to a `LoggingNotifier` inline, after each transfer's locks
//! are released.

use crate::core::{AccountRepository, InMemoryAccountStore, LoggingNotifier, TransferEngine};
use crate::io::csv_format::write_accounts_csv;
use crate::io::reader::{load_accounts, TransferReader};
use crate::strategy::{ProcessingStrategy, ProcessingSummary};
use crate::types::TransferError;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use rust_transfer_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy;
/// let mut output = io::stdout();
///
/// strategy
///     .process(Path::new("accounts.csv"), Path::new("transfers.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        accounts_path: &Path,
        transfers_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, TransferError> {
        let store = Arc::new(InMemoryAccountStore::new());
        load_accounts(accounts_path, store.as_ref())?;

        let engine = TransferEngine::new(Arc::clone(&store), Arc::new(LoggingNotifier));
        let reader = TransferReader::new(transfers_path)?;

        let mut summary = ProcessingSummary::default();
        for row in reader {
            match row {
                Ok(request) => {
                    let outcome = engine.execute(&request);
                    summary.record(&request, outcome);
                }
                Err(e) => summary.record_malformed(&e),
            }
        }

        info!(
            succeeded = summary.succeeded,
            rejected = summary.rejected,
            malformed = summary.malformed,
            "Sequential processing finished"
        );

        write_accounts_csv(&store.get_all_accounts(), output)?;

        Ok(summary)
    }
}
