//! Processing strategy module for batch transfer processing
//!
//! This module defines the Strategy pattern for the complete processing pipeline:
//! loading opening accounts, running every transfer through the `TransferEngine`,
//! and writing final balances. Strategies differ only in how transfers are
//! scheduled (sequentially or concurrently) and selected at runtime.

use crate::cli::StrategyType;
use crate::types::{TransferError, TransferRequest};
use std::io::Write;
use std::path::Path;
use tracing::warn;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Outcome counts of a processing run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
    /// Transfers that completed (including self-transfer no-ops)
    pub succeeded: usize,
    /// Well-formed transfers the engine refused
    pub rejected: usize,
    /// CSV rows that could not be turned into a transfer request
    pub malformed: usize,
}

impl ProcessingSummary {
    /// Count the outcome of one transfer, logging refusals
    pub(crate) fn record(&mut self, request: &TransferRequest, outcome: Result<(), TransferError>) {
        match outcome {
            Ok(()) => self.succeeded += 1,
            Err(e) => {
                warn!(
                    from = %request.from,
                    to = %request.to,
                    amount = %request.amount,
                    category = ?e.category(),
                    "Transfer rejected: {}",
                    e
                );
                self.rejected += 1;
            }
        }
    }

    /// Count a malformed input row
    pub(crate) fn record_malformed(&mut self, error: &TransferError) {
        warn!(error = %error, "Skipping malformed transfer record");
        self.malformed += 1;
    }
}

/// Processing strategy trait for complete transfer processing pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Process transfers and write final account balances to `output`
    ///
    /// # Arguments
    ///
    /// * `accounts_path` - CSV file of opening accounts (`id,balance`)
    /// * `transfers_path` - CSV file of transfer requests (`from,to,amount`)
    /// * `output` - Writer receiving the final account CSV
    ///
    /// # Errors
    ///
    /// Returns an error only for fatal conditions: an input file cannot be opened,
    /// output cannot be written, or the runtime cannot start. Refused transfers and
    /// malformed rows are logged, counted in the summary and skipped.
    fn process(
        &self,
        accounts_path: &Path,
        transfers_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, TransferError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional configuration for concurrent processing (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}
