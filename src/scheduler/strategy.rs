//! Runtime-selectable scheduling strategy.
//!
//! Wraps the three schedulers behind one entry point so a harness can
//! iterate over them without knowing which needs randomness.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{anneal, exhaustive, greedy, AnnealingConfig};
use crate::error::SchedulerResult;
use crate::models::{ScheduleResult, Task};

/// A scheduling strategy.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_makespan::models::Task;
/// use u_makespan::scheduler::Strategy;
///
/// let tasks = vec![
///     Task::new("A", 10, "M1").unwrap(),
///     Task::new("B", 30, "M2").unwrap(),
/// ];
/// let mut rng = SmallRng::seed_from_u64(42);
/// for strategy in Strategy::all() {
///     let result = strategy.run(&tasks, &mut rng).unwrap();
///     assert_eq!(result.makespan(), 30);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Input-order bucketing.
    Greedy,
    /// Full permutation search.
    Exhaustive,
    /// Swap-based simulated annealing seeded by greedy.
    Annealing(AnnealingConfig),
}

impl Strategy {
    /// All strategies, annealing with its default configuration.
    pub fn all() -> [Strategy; 3] {
        [
            Strategy::Greedy,
            Strategy::Exhaustive,
            Strategy::Annealing(AnnealingConfig::default()),
        ]
    }

    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Greedy => "greedy",
            Strategy::Exhaustive => "exhaustive",
            Strategy::Annealing(_) => "annealing",
        }
    }

    /// Whether the strategy enumerates all orderings.
    pub fn is_exhaustive(&self) -> bool {
        matches!(self, Strategy::Exhaustive)
    }

    /// Runs the strategy on `tasks`.
    ///
    /// Only annealing draws from `rng` and only annealing can fail.
    pub fn run<R: Rng + ?Sized>(
        &self,
        tasks: &[Task],
        rng: &mut R,
    ) -> SchedulerResult<ScheduleResult> {
        match self {
            Strategy::Greedy => Ok(greedy(tasks)),
            Strategy::Exhaustive => Ok(exhaustive(tasks)),
            Strategy::Annealing(config) => anneal(tasks, config, rng),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
