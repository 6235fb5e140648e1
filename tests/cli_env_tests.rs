//! Environment overrides for CLI arguments
//!
//! Kept in a separate test binary: the variable is process-wide, and the
//! argument tests in the library assume it is unset.

use clap::Parser;
use rstest::rstest;
use rust_transfer_engine::cli::CliArgs;
use std::env;

const WORKERS_VAR: &str = "TRANSFER_ENGINE_WORKERS";

#[rstest]
#[case::from_environment(&["program", "a.csv", "t.csv"], 3)]
#[case::flag_wins_over_environment(&["program", "--workers", "8", "a.csv", "t.csv"], 8)]
fn workers_read_from_environment(#[case] args: &[&str], #[case] expected_workers: usize) {
    // Every case sets the same value, so parallel cases do not interfere
    env::set_var(WORKERS_VAR, "3");

    let parsed = CliArgs::try_parse_from(args).unwrap();
    let config = parsed.to_batch_config();

    assert_eq!(config.worker_threads, expected_workers);
    assert_eq!(config.batch_size, 1000);
}
