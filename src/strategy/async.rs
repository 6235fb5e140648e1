//! Concurrent batch processing strategy
//!
//! This module provides a multi-threaded implementation of the ProcessingStrategy
//! trait. Transfers are read in batches and every transfer of a batch runs
//! concurrently against the shared `TransferEngine`.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, worker_threads)
//!     ├── TransferReader (batch CSV reading)
//!     ├── TransferEngine (shared across blocking tasks)
//!     │   └── InMemoryAccountStore (DashMap + per-account locks)
//!     └── QueuedNotifier (notifications drained by a background worker)
//! ```
//!
//! # Ordering
//!
//! Batches are processed one after another, so a transfer never races with one
//! from a later batch. Inside a batch, transfers sharing an account are serialized
//! by that account's lock in whatever order they reach it; transfers on disjoint
//! accounts proceed in parallel.

use crate::core::{
    AccountRepository, InMemoryAccountStore, LoggingNotifier, QueuedNotifier, TransferEngine,
};
use crate::io::csv_format::write_accounts_csv;
use crate::io::reader::{load_accounts, TransferReader};
use crate::strategy::{ProcessingStrategy, ProcessingSummary};
use crate::types::TransferError;
use futures::future::join_all;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

/// Configuration for concurrent processing
///
/// Controls how many transfers are read per batch and how many threads apply
/// them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of transfers per batch
    pub batch_size: usize,
    /// Number of threads applying transfers
    pub worker_threads: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            worker_threads: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values fall back to the defaults with a warning.
    pub fn new(batch_size: usize, worker_threads: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let worker_threads = if worker_threads == 0 {
            warn!(
                "Invalid worker_threads ({}), using default ({})",
                worker_threads, default.worker_threads
            );
            default.worker_threads
        } else {
            worker_threads
        };

        Self {
            batch_size,
            worker_threads,
        }
    }

    /// Size of the blocking pool
    ///
    /// One thread more than `worker_threads`: the notification worker holds one
    /// blocking thread for the whole run.
    pub fn blocking_threads(&self) -> usize {
        self.worker_threads.saturating_add(1)
    }
}

/// Concurrent batch processing strategy
///
/// # Thread Safety
///
/// Transfers run on tokio's blocking pool, capped at `worker_threads` threads
/// plus one for the notification worker. The engine's critical section holds
/// only std mutexes and never awaits.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(
        &self,
        accounts_path: &Path,
        transfers_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, TransferError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.worker_threads)
            .max_blocking_threads(self.config.blocking_threads())
            .build()
            .map_err(|e| TransferError::IoError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        let store = Arc::new(InMemoryAccountStore::new());
        load_accounts(accounts_path, store.as_ref())?;
        let mut reader = TransferReader::new(transfers_path)?;

        let summary = runtime.block_on(async {
            let (notifier, worker) =
                QueuedNotifier::spawn(Arc::new(LoggingNotifier), &Handle::current());
            let engine = TransferEngine::new(Arc::clone(&store), Arc::new(notifier));
            let mut summary = ProcessingSummary::default();

            loop {
                let batch = reader.read_batch(self.config.batch_size);
                if batch.is_empty() {
                    break;
                }

                let mut tasks = Vec::with_capacity(batch.len());
                for row in batch {
                    match row {
                        Ok(request) => {
                            let engine = engine.clone();
                            tasks.push(tokio::task::spawn_blocking(move || {
                                let outcome = engine.execute(&request);
                                (request, outcome)
                            }));
                        }
                        Err(e) => summary.record_malformed(&e),
                    }
                }

                // Wait for the whole batch before reading the next one
                for joined in join_all(tasks).await {
                    let (request, outcome) = joined.map_err(|e| TransferError::IoError {
                        message: format!("Transfer task failed: {}", e),
                    })?;
                    summary.record(&request, outcome);
                }
            }

            // Dropping the last engine closes the queue; the worker then drains and exits
            drop(engine);
            let delivered = worker.await.map_err(|e| TransferError::IoError {
                message: format!("Notification worker failed: {}", e),
            })?;
            debug!(delivered, "Notifications flushed");

            Ok::<_, TransferError>(summary)
        })?;

        info!(
            succeeded = summary.succeeded,
            rejected = summary.rejected,
            malformed = summary.malformed,
            worker_threads = self.config.worker_threads,
            "Concurrent processing finished"
        );

        write_accounts_csv(&store.get_all_accounts(), output)?;

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[rstest]
    #[case::typical(4, 5)]
    #[case::single_worker(1, 2)]
    #[case::saturates_at_max(usize::MAX, usize::MAX)]
    fn test_blocking_threads(#[case] worker_threads: usize, #[case] expected: usize) {
        let config = BatchConfig::new(10, worker_threads);
        assert_eq!(config.blocking_threads(), expected);
    }

    #[rstest]
    #[case::zero_batch_size(0, 4, 1000, 4)]
    #[case::zero_workers(10, 0, 10, num_cpus::get())]
    #[case::custom(10, 4, 10, 4)]
    fn test_batch_config_new(
        #[case] batch_size: usize,
        #[case] worker_threads: usize,
        #[case] expected_batch_size: usize,
        #[case] expected_workers: usize,
    ) {
        let config = BatchConfig::new(batch_size, worker_threads);

        assert_eq!(config.batch_size, expected_batch_size);
        assert_eq!(config.worker_threads, expected_workers);
    }

    #[test]
    fn test_async_strategy_conserves_total_balance() {
        let accounts = create_temp_csv("id,balance\nA,100\nB,100\nC,100\n");
        let mut transfers = String::from("from,to,amount\n");
        for _ in 0..50 {
            transfers.push_str("A,B,3\nB,C,3\nC,A,3\nB,A,3\n");
        }
        let transfers = create_temp_csv(&transfers);
        let mut output = Vec::new();

        let strategy = AsyncProcessingStrategy::new(BatchConfig::new(16, 4));
        let summary = strategy
            .process(accounts.path(), transfers.path(), &mut output)
            .unwrap();

        assert_eq!(summary.succeeded + summary.rejected, 200);
        assert_eq!(summary.malformed, 0);

        let output = String::from_utf8(output).unwrap();
        let total: rust_decimal::Decimal = output
            .lines()
            .skip(1)
            .map(|line| line.split(',').nth(1).unwrap().parse::<rust_decimal::Decimal>().unwrap())
            .sum();
        assert_eq!(total, rust_decimal::Decimal::from(300));
    }

    #[test]
    fn test_async_strategy_maintains_ordering_across_batches() {
        // B can only pay A back after the first batch credited it
        let accounts = create_temp_csv("id,balance\nA,100\nB,0\n");
        let transfers = create_temp_csv("from,to,amount\nA,B,100\nB,A,60\nB,A,40\n");
        let mut output = Vec::new();

        let strategy = AsyncProcessingStrategy::new(BatchConfig::new(1, 2));
        let summary = strategy
            .process(accounts.path(), transfers.path(), &mut output)
            .unwrap();

        assert_eq!(summary.succeeded, 3);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "id,balance\nA,100.0000\nB,0.0000\n"
        );
    }

    #[test]
    fn test_async_strategy_handles_missing_file() {
        let strategy = AsyncProcessingStrategy::new(BatchConfig::default());
        let mut output = Vec::new();

        let result = strategy.process(
            Path::new("nonexistent.csv"),
            Path::new("nonexistent.csv"),
            &mut output,
        );

        assert!(matches!(result, Err(TransferError::FileNotFound { .. })));
    }
}
