//! Parallel batch evaluation
//!
//! Splits a batch of independent summary jobs across worker threads while
//! keeping results in deterministic input order:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      run_batch                           │
//! ├─────────────────────────────────────────────────────────┤
//! │     ┌──────────┬──────────┬──────────┬──────────┐       │
//! │     │ Worker 1 │ Worker 2 │ Worker 3 │ Worker N │       │
//! │     └──────────┴──────────┴──────────┴──────────┘       │
//! │                           │                              │
//! │              Merge + restore input order                 │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Every job is evaluated exactly once and carries no shared mutable state,
//! so the parallel path produces byte-identical output to the sequential
//! fallback. Small batches run sequentially: thread startup costs more than
//! the work itself below `min_jobs_per_worker` jobs per worker.

use std::sync::Mutex;
use std::thread;

use crate::config::ParallelConfig;

/// Get number of CPUs (fallback to 1 if detection fails)
fn num_cpus() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Effective worker count: auto-detect when configured as 0
pub fn effective_workers(config: &ParallelConfig) -> usize {
    if config.workers == 0 {
        num_cpus()
    } else {
        config.workers
    }
}

/// Whether a batch of `jobs` jobs is worth spreading across threads
pub fn should_parallelize(config: &ParallelConfig, jobs: usize) -> bool {
    let workers = effective_workers(config);
    config.enabled && workers > 1 && jobs >= workers * config.min_jobs_per_worker
}

/// Evaluate every job, in parallel when the batch is large enough
///
/// Results come back in input order regardless of which worker produced
/// them.
pub fn run_batch<J, T, F>(jobs: &[J], config: &ParallelConfig, evaluate: F) -> Vec<T>
where
    J: Sync,
    T: Send,
    F: Fn(&J) -> T + Sync,
{
    if !should_parallelize(config, jobs.len()) {
        return jobs.iter().map(|job| evaluate(job)).collect();
    }

    let workers = effective_workers(config);
    let chunk_size = ((jobs.len() + workers - 1) / workers).max(1);
    let results: Mutex<Vec<(usize, T)>> = Mutex::new(Vec::with_capacity(jobs.len()));

    thread::scope(|scope| {
        for (chunk_index, chunk) in jobs.chunks(chunk_size).enumerate() {
            let evaluate = &evaluate;
            let results = &results;
            scope.spawn(move || {
                let offset = chunk_index * chunk_size;
                let local: Vec<(usize, T)> = chunk
                    .iter()
                    .enumerate()
                    .map(|(i, job)| (offset + i, evaluate(job)))
                    .collect();
                results.lock().unwrap().extend(local);
            });
        }
    });

    let mut collected = results.into_inner().unwrap();
    collected.sort_by_key(|(index, _)| *index);
    collected.into_iter().map(|(_, value)| value).collect()
}

// ============================================================================
// Tests
// ============================================================================
