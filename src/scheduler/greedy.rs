//! Greedy bucket scheduler.
//!
//! # Algorithm
//!
//! Single pass over the input: each task is appended to its machine's
//! bucket in input order. No look-ahead, no randomness.
//!
//! # Complexity
//! O(n) time and space.

use tracing::debug;

use crate::models::{Assignment, ScheduleResult, Task};

/// Schedules tasks by grouping them per machine in input order.
///
/// Deterministic: identical input yields an identical result.
///
/// # Example
///
/// ```
/// use u_makespan::models::Task;
/// use u_makespan::scheduler::greedy;
///
/// let tasks = vec![
///     Task::new("A", 10, "M1").unwrap(),
///     Task::new("B", 30, "M2").unwrap(),
///     Task::new("C", 15, "M1").unwrap(),
/// ];
/// let result = greedy(&tasks);
/// assert_eq!(result.makespan(), 30);
/// assert_eq!(result.assignment().machine("M1").unwrap().total, 25);
/// ```
pub fn greedy(tasks: &[Task]) -> ScheduleResult {
    let result = ScheduleResult::new(Assignment::build(tasks));
    debug!(
        tasks = tasks.len(),
        machines = result.assignment().machine_count(),
        makespan = result.makespan(),
        "greedy schedule built"
    );
    result
}
