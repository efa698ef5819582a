//! Scheduler error types.

use thiserror::Error;

/// Errors raised by task construction and scheduling strategies.
///
/// Empty input is deliberately absent: an empty task list yields an
/// empty assignment with makespan 0.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("invalid task '{id}': {reason}")]
    InvalidTask { id: String, reason: String },

    #[error("annealing needs at least 2 tasks to swap, got {count}")]
    InsufficientTasksForSwap { count: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type SchedulerResult<T> = Result<T, ScheduleError>;
