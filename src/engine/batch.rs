//! Fan-out of independent streak computations across a scoped worker pool.
//!
//! Each job is one (user, habit) pair. Jobs share nothing, so workers take
//! contiguous chunks and results are gathered back in input order.

use chrono::NaiveDate;
use log::debug;
use std::num::NonZeroUsize;
use std::thread;

use crate::engine::streak::compute_streak;
use crate::models::{DailyRecord, HabitPolicy, HabitType, StreakResult};

#[derive(Debug, Clone)]
pub struct StreakJob {
    pub user: String,
    pub records: Vec<DailyRecord>,
    pub policy: HabitPolicy,
    pub today: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakOutcome {
    pub user: String,
    pub habit: HabitType,
    pub result: StreakResult,
}

impl StreakJob {
    pub fn run(&self) -> StreakOutcome {
        StreakOutcome {
            user: self.user.clone(),
            habit: self.policy.habit,
            result: compute_streak(&self.records, &self.policy, self.today),
        }
    }
}

/// Worker count for the current machine.
pub fn default_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Run every job, using up to `workers` threads. Output order matches `jobs`.
pub fn compute_batch(jobs: &[StreakJob], workers: usize) -> Vec<StreakOutcome> {
    if jobs.is_empty() {
        return Vec::new();
    }
    let workers = workers.clamp(1, jobs.len());
    if workers == 1 {
        return jobs.iter().map(StreakJob::run).collect();
    }

    let chunk_size = jobs.len().div_ceil(workers);
    debug!(
        "Computing {} streak jobs on {} workers ({} per chunk)",
        jobs.len(),
        workers,
        chunk_size
    );

    thread::scope(|scope| {
        let handles: Vec<_> = jobs
            .chunks(chunk_size)
            .map(|chunk| scope.spawn(move || chunk.iter().map(StreakJob::run).collect::<Vec<_>>()))
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(outcomes) => outcomes,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}
