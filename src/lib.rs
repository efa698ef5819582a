//! Makespan scheduling for machine-bound tasks.
//!
//! Each task is pre-bound to one machine. Strategies decide the job
//! order on every machine and report the makespan, the completion time
//! of the busiest machine.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `Assignment`, `MachineLoad`,
//!   `ScheduleResult`
//! - **`scheduler`**: Greedy, exhaustive, and annealing strategies plus
//!   `ScheduleKpi`
//! - **`generator`**: Random and fixed task sources
//! - **`validation`**: Input integrity checks (duplicate or empty IDs)
//! - **`bench`**: Wall-clock and peak-memory measurement harness
//! - **`report`**: Tabular text rendering
//!
//! # Randomness
//!
//! Nothing in this crate owns a random source. Generators and annealing
//! take `&mut impl Rng`, so a seeded generator gives repeatable runs.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Kirkpatrick et al. (1983), "Optimization by Simulated Annealing"

pub mod bench;
pub mod error;
pub mod generator;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod validation;

pub use error::{ScheduleError, SchedulerResult};
