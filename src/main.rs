//! Rust Transfer Engine CLI
//!
//! Command-line interface for applying fund transfers from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- accounts.csv transfers.csv > balances.csv
//! cargo run -- --strategy sync accounts.csv transfers.csv > balances.csv
//! cargo run -- --strategy async --batch-size 2000 --workers 8 accounts.csv transfers.csv
//! RUST_LOG=info cargo run -- accounts.csv transfers.csv
//! ```
//!
//! The program loads the opening accounts, applies every transfer through the
//! transfer engine using the selected strategy, and writes the final balances
//! to stdout. Logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success (individual refused transfers are logged, not fatal)
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use rust_transfer_engine::cli;
use rust_transfer_engine::logging;
use rust_transfer_engine::strategy;
use std::process;

fn main() {
    let args = cli::parse_args();

    logging::init_tracing(&args.log_level);

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), config)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.accounts_file, &args.transfers_file, &mut output) {
        tracing::error!(error = %e, "Processing failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
