//! Multi-threaded CREATE2 salt search
//!
//! Each worker draws random salts and tests them against the address
//! predicate; the first hit flips a shared stop flag. Expected work for the
//! 14-bit flag mask is ~16k attempts, so a handful of threads finds a salt
//! in well under a second.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use alloy::primitives::B256;

use launchpad_core::create2::{satisfies_flags, DeployContext};
use launchpad_core::salt::random_salt;

/// Search until a salt satisfies the predicate or the stop flag is set.
pub fn mine_salt(ctx: &DeployContext, stop: &AtomicBool, attempts: &AtomicU64) -> Option<B256> {
    while !stop.load(Ordering::Relaxed) {
        let salt = random_salt();
        attempts.fetch_add(1, Ordering::Relaxed);
        if satisfies_flags(ctx, salt) {
            return Some(salt);
        }
    }
    None
}

/// Outcome of a parallel search.
pub struct MineOutcome {
    pub salt: B256,
    pub attempts: u64,
}

/// Run the search across `threads` workers and return the first hit.
pub fn mine_salt_parallel(ctx: DeployContext, threads: usize) -> MineOutcome {
    let stop = Arc::new(AtomicBool::new(false));
    let attempts = Arc::new(AtomicU64::new(0));
    let (result_tx, result_rx) = mpsc::channel();

    let mut handles = Vec::with_capacity(threads.max(1));
    for _ in 0..threads.max(1) {
        let stop = Arc::clone(&stop);
        let attempts = Arc::clone(&attempts);
        let result_tx = result_tx.clone();
        handles.push(thread::spawn(move || {
            if let Some(salt) = mine_salt(&ctx, &stop, &attempts) {
                stop.store(true, Ordering::Relaxed);
                let _ = result_tx.send(salt);
            }
        }));
    }
    drop(result_tx);

    // The stop flag is only ever set by a thread that found a salt, so the
    // channel always yields at least one result.
    let salt = result_rx
        .recv()
        .expect("a miner thread reports before all exit");
    for handle in handles {
        let _ = handle.join();
    }

    MineOutcome {
        salt,
        attempts: attempts.load(Ordering::Relaxed),
    }
}
