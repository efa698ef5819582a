//! Makespan schedulers and KPI evaluation.
//!
//! Every strategy consumes the same task sequence and returns a
//! [`ScheduleResult`](crate::models::ScheduleResult). Tasks are fixed to
//! their machines, so strategies only decide job order within machines.
//!
//! # Algorithms
//!
//! - [`greedy`]: input-order bucketing, O(n). Also seeds annealing.
//! - [`exhaustive`]: enumerates all n! orderings and keeps the first
//!   minimum-makespan one.
//! - [`anneal`]: swap-neighborhood simulated annealing with
//!   temperature-normalized acceptance.
//!
//! # KPI
//!
//! `ScheduleKpi` computes makespan, total load, utilization, and
//! imbalance for an assignment.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Kirkpatrick et al. (1983), "Optimization by Simulated Annealing"

mod annealing;
mod exhaustive;
mod greedy;
mod kpi;
mod strategy;

pub use annealing::{
    anneal, Annealer, AnnealingConfig, AnnealingRun, AnnealingStats, Neighborhood,
    DEFAULT_COOLING_RATE, DEFAULT_INITIAL_TEMPERATURE,
};
pub use exhaustive::{exhaustive, orderings, PRACTICAL_TASK_LIMIT};
pub use greedy::greedy;
pub use kpi::ScheduleKpi;
pub use strategy::Strategy;
