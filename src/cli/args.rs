use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Apply fund transfers between accounts concurrently
#[derive(Parser, Debug)]
#[command(name = "transfer-engine")]
#[command(about = "Apply fund transfers between in-memory accounts", long_about = None)]
pub struct CliArgs {
    /// Opening accounts CSV file path (`id,balance`)
    #[arg(value_name = "ACCOUNTS", help = "Path to the opening accounts CSV file")]
    pub accounts_file: PathBuf,

    /// Transfer requests CSV file path (`from,to,amount`)
    #[arg(value_name = "TRANSFERS", help = "Path to the transfer requests CSV file")]
    pub transfers_file: PathBuf,

    /// Processing strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for sequential or 'async' for concurrent"
    )]
    pub strategy: StrategyType,

    /// Number of transfers per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of transfers per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of threads applying transfers (async mode only)
    #[arg(
        long = "workers",
        value_name = "COUNT",
        env = "TRANSFER_ENGINE_WORKERS",
        help = "Number of threads applying transfers concurrently (default: CPU cores)"
    )]
    pub workers: Option<usize>,

    /// Default log filter when RUST_LOG is not set
    #[arg(
        long = "log-level",
        value_name = "FILTER",
        default_value = "warn",
        help = "Log filter used when RUST_LOG is unset (e.g. 'info', 'rust_transfer_engine=debug')"
    )]
    pub log_level: String,
}

/// Available processing strategies
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults; zero values are replaced by
    /// the defaults with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.workers.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.workers.unwrap_or(default.worker_threads),
            )
        } else {
            BatchConfig::default()
        }
    }
}
