//! Benchmark suite for transfer throughput under contention
//!
//! Compares transfers hammering a single account pair (every transfer contends
//! for the same two locks) with transfers spread over disjoint pairs (no shared
//! locks), across thread counts.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use rust_decimal::Decimal;
use rust_transfer_engine::{
    Account, AccountRepository, InMemoryAccountStore, NotificationError, Notifier, TransferEngine,
};
use std::sync::Arc;
use std::thread;

const TRANSFERS_PER_THREAD: usize = 1_000;

fn main() {
    divan::main();
}

/// Notifier that drops everything, so only the engine is measured
struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify_about_transfer(
        &self,
        _account: &Arc<Account>,
        _message: &str,
    ) -> Result<(), NotificationError> {
        Ok(())
    }
}

fn engine_with_pairs(pairs: usize) -> TransferEngine<InMemoryAccountStore, NullNotifier> {
    let store = Arc::new(InMemoryAccountStore::new());
    for pair in 0..pairs {
        for side in ["left", "right"] {
            let account =
                Account::with_balance(format!("{}-{}", side, pair), Decimal::from(1_000_000))
                    .expect("valid opening balance");
            store.create_account(account).expect("unique account id");
        }
    }
    TransferEngine::new(store, Arc::new(NullNotifier))
}

fn run(
    engine: &TransferEngine<InMemoryAccountStore, NullNotifier>,
    threads: usize,
    shared_pair: bool,
) {
    let handles: Vec<_> = (0..threads)
        .map(|thread_index| {
            let engine = engine.clone();
            let pair = if shared_pair { 0 } else { thread_index };
            thread::spawn(move || {
                let left = format!("left-{}", pair);
                let right = format!("right-{}", pair);
                for i in 0..TRANSFERS_PER_THREAD {
                    let (from, to) = if (i + thread_index) % 2 == 0 {
                        (&left, &right)
                    } else {
                        (&right, &left)
                    };
                    engine
                        .transfer(from, to, Decimal::ONE)
                        .expect("balances cover every transfer");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("transfer thread panicked");
    }
}

/// Every thread transfers back and forth on the same pair
#[divan::bench(args = [1, 2, 4, 8])]
fn contended_pair(bencher: divan::Bencher, threads: usize) {
    let engine = engine_with_pairs(1);
    bencher.bench_local(|| run(&engine, threads, true));
}

/// Each thread owns its own pair
#[divan::bench(args = [1, 2, 4, 8])]
fn disjoint_pairs(bencher: divan::Bencher, threads: usize) {
    let engine = engine_with_pairs(threads);
    bencher.bench_local(|| run(&engine, threads, false));
}
