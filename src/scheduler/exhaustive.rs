//! Exhaustive (brute-force) scheduler.
//!
//! # Algorithm
//!
//! Enumerates every ordering of the input, builds the assignment for
//! each, and keeps the one with the strictly smallest makespan. Ties go
//! to the ordering enumerated first. Orderings are produced lazily as
//! index permutations in lexicographic order, so only the current
//! candidate and the best-so-far are alive at any time.
//!
//! # Complexity
//! O(n! · n) time, O(n) auxiliary space. Only practical for roughly
//! ten tasks or fewer.

use itertools::Itertools;
use tracing::{debug, warn};

use crate::models::{Assignment, ScheduleResult, Task};

/// Above this many tasks the search is logged as expensive.
pub const PRACTICAL_TASK_LIMIT: usize = 10;

/// Lazy sequence of index orderings over `n` positions.
///
/// Cloning the sequence restarts enumeration from the current point;
/// calling [`orderings`] again restarts it from the beginning.
pub fn orderings(n: usize) -> impl Iterator<Item = Vec<usize>> + Clone {
    (0..n).permutations(n)
}

/// Finds the minimum-makespan assignment over all task orderings.
///
/// Always completes the full enumeration before returning.
///
/// # Example
///
/// ```
/// use u_makespan::models::Task;
/// use u_makespan::scheduler::exhaustive;
///
/// let tasks = vec![
///     Task::new("A", 5, "M1").unwrap(),
///     Task::new("B", 5, "M1").unwrap(),
/// ];
/// assert_eq!(exhaustive(&tasks).makespan(), 10);
/// ```
pub fn exhaustive(tasks: &[Task]) -> ScheduleResult {
    if tasks.len() > PRACTICAL_TASK_LIMIT {
        warn!(
            tasks = tasks.len(),
            limit = PRACTICAL_TASK_LIMIT,
            "exhaustive search over many tasks, expect a long run"
        );
    }

    let mut best: Option<(Assignment, u64)> = None;
    let mut evaluated: u64 = 0;

    for order in orderings(tasks.len()) {
        evaluated += 1;
        let candidate = Assignment::build(order.iter().map(|&i| &tasks[i]));
        let makespan = candidate.makespan();

        let improves = match &best {
            Some((_, best_makespan)) => makespan < *best_makespan,
            None => true,
        };
        if improves {
            best = Some((candidate, makespan));
        }
    }

    let assignment = best.map(|(a, _)| a).unwrap_or_default();
    let result = ScheduleResult::new(assignment);
    debug!(
        tasks = tasks.len(),
        evaluated,
        makespan = result.makespan(),
        "exhaustive search finished"
    );
    result
}
