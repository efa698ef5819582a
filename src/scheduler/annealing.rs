//! Simulated-annealing scheduler.
//!
//! # Algorithm
//!
//! 1. Start from the greedy schedule at `initial_temperature`.
//! 2. Swap two distinct random positions of a working task order and
//!    rebuild the assignment.
//! 3. Accept the candidate if its makespan is strictly lower, or with
//!    probability `temperature / initial_temperature` otherwise.
//! 4. Multiply the temperature by `cooling_rate`; stop once it is ≤ 1.
//!
//! The acceptance probability depends only on the normalized temperature,
//! not on the size of the makespan change. The iteration count is
//! therefore a pure function of the two temperature parameters.
//!
//! # Neighborhoods
//!
//! [`Neighborhood`] selects what the swap is applied to. The default,
//! [`Neighborhood::Drift`], swaps one persistent working order and never
//! undoes a swap, even for rejected candidates.
//!
//! # Reference
//! Kirkpatrick et al. (1983), "Optimization by Simulated Annealing"

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::greedy;
use crate::error::{ScheduleError, SchedulerResult};
use crate::models::{Assignment, ScheduleResult, Task};

/// Default starting temperature.
pub const DEFAULT_INITIAL_TEMPERATURE: f64 = 1000.0;
/// Default multiplicative cooling factor.
pub const DEFAULT_COOLING_RATE: f64 = 0.95;

/// Which ordering a candidate swap perturbs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Neighborhood {
    /// Swaps accumulate on one working order whether or not the
    /// candidate is accepted.
    #[default]
    Drift,
    /// Every candidate is the input order with a single swap.
    FromInput,
    /// Swaps apply to the last accepted order and are undone on rejection.
    Revert,
}

/// Annealing parameters.
///
/// # Example
///
/// ```
/// use u_makespan::scheduler::{AnnealingConfig, Neighborhood};
///
/// let config = AnnealingConfig::default();
/// assert_eq!(config.iteration_count(), 135);
///
/// let config = AnnealingConfig::new(500.0, 0.9)
///     .unwrap()
///     .with_neighborhood(Neighborhood::Revert);
/// assert_eq!(config.neighborhood, Neighborhood::Revert);
///
/// assert!(AnnealingConfig::new(1000.0, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealingConfig {
    /// Starting temperature (> 1).
    pub initial_temperature: f64,
    /// Cooling factor applied each iteration, in (0, 1).
    pub cooling_rate: f64,
    /// Swap neighborhood.
    pub neighborhood: Neighborhood,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: DEFAULT_INITIAL_TEMPERATURE,
            cooling_rate: DEFAULT_COOLING_RATE,
            neighborhood: Neighborhood::default(),
        }
    }
}

impl AnnealingConfig {
    /// Creates a validated configuration with the default neighborhood.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidConfig`] when the loop would run zero
    /// iterations or never terminate.
    pub fn new(initial_temperature: f64, cooling_rate: f64) -> SchedulerResult<Self> {
        let config = Self {
            initial_temperature,
            cooling_rate,
            neighborhood: Neighborhood::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the swap neighborhood.
    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    /// Checks that the cooling loop terminates after at least one step.
    pub fn validate(&self) -> SchedulerResult<()> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 1.0 {
            return Err(ScheduleError::InvalidConfig(format!(
                "initial_temperature must be finite and > 1, got {}",
                self.initial_temperature
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(ScheduleError::InvalidConfig(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        Ok(())
    }

    /// Number of iterations the cooling loop performs.
    ///
    /// Mirrors the loop in [`Annealer::run`] step for step, so float
    /// rounding agrees with the real run.
    pub fn iteration_count(&self) -> u64 {
        let mut temperature = self.initial_temperature;
        let mut iterations = 0;
        while temperature > 1.0 {
            iterations += 1;
            temperature *= self.cooling_rate;
        }
        iterations
    }
}

/// Counters collected during one annealing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnealingStats {
    /// Cooling steps performed.
    pub iterations: u64,
    /// Candidates that replaced the current state.
    pub accepted: u64,
    /// Accepted candidates with a strictly lower makespan.
    pub improved: u64,
}

/// Result of [`Annealer::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnealingRun {
    /// Final current state.
    pub result: ScheduleResult,
    /// Run counters.
    pub stats: AnnealingStats,
}

/// Simulated-annealing scheduler.
///
/// The returned makespan is not guaranteed to be at most the greedy
/// seed's: a worse candidate accepted late in the run is kept.
#[derive(Debug, Clone, Default)]
pub struct Annealer {
    config: AnnealingConfig,
}

impl Annealer {
    /// Creates an annealer, validating the configuration.
    pub fn new(config: AnnealingConfig) -> SchedulerResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &AnnealingConfig {
        &self.config
    }

    /// Runs the annealing loop.
    ///
    /// # Errors
    /// [`ScheduleError::InsufficientTasksForSwap`] with fewer than 2 tasks.
    pub fn run<R: Rng + ?Sized>(
        &self,
        tasks: &[Task],
        rng: &mut R,
    ) -> SchedulerResult<AnnealingRun> {
        let n = tasks.len();
        if n < 2 {
            return Err(ScheduleError::InsufficientTasksForSwap { count: n });
        }

        let AnnealingConfig {
            initial_temperature,
            cooling_rate,
            neighborhood,
        } = self.config;

        let mut current = greedy(tasks);
        let mut working: Vec<usize> = (0..n).collect();
        let mut stats = AnnealingStats::default();
        let mut temperature = initial_temperature;

        while temperature > 1.0 {
            stats.iterations += 1;

            if neighborhood == Neighborhood::FromInput {
                for (slot, idx) in working.iter_mut().enumerate() {
                    *idx = slot;
                }
            }

            let picked = index::sample(rng, n, 2);
            let (i, j) = (picked.index(0), picked.index(1));
            working.swap(i, j);

            let candidate = Assignment::build(working.iter().map(|&k| &tasks[k]));
            let candidate_makespan = candidate.makespan();
            let improves = candidate_makespan < current.makespan();

            if improves || rng.random::<f64>() < temperature / initial_temperature {
                stats.accepted += 1;
                if improves {
                    stats.improved += 1;
                }
                current = ScheduleResult::new(candidate);
            } else if neighborhood == Neighborhood::Revert {
                working.swap(i, j);
            }

            temperature *= cooling_rate;
        }

        debug!(
            tasks = n,
            iterations = stats.iterations,
            accepted = stats.accepted,
            improved = stats.improved,
            makespan = current.makespan(),
            ?neighborhood,
            "annealing finished"
        );

        Ok(AnnealingRun {
            result: current,
            stats,
        })
    }
}

/// Anneals from the greedy seed and returns the final state.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_makespan::models::Task;
/// use u_makespan::scheduler::{anneal, AnnealingConfig};
///
/// let tasks = vec![
///     Task::new("A", 5, "M1").unwrap(),
///     Task::new("B", 5, "M1").unwrap(),
/// ];
/// let mut rng = SmallRng::seed_from_u64(7);
/// let result = anneal(&tasks, &AnnealingConfig::default(), &mut rng).unwrap();
/// assert_eq!(result.makespan(), 10);
/// ```
pub fn anneal<R: Rng + ?Sized>(
    tasks: &[Task],
    config: &AnnealingConfig,
    rng: &mut R,
) -> SchedulerResult<ScheduleResult> {
    Ok(Annealer::new(*config)?.run(tasks, rng)?.result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn task(id: &str, duration: u32, machine: &str) -> Task {
        Task::new(id, duration, machine).unwrap()
    }

    fn sample_tasks() -> Vec<Task> {
        vec![
            task("A", 10, "M1"),
            task("B", 30, "M2"),
            task("C", 15, "M1"),
            task("D", 8, "M3"),
            task("E", 12, "M2"),
        ]
    }

    #[test]
    fn test_default_iteration_count() {
        let config = AnnealingConfig::default();
        let expected = ((1.0f64 / 1000.0).ln() / 0.95f64.ln()).ceil() as u64;
        assert_eq!(expected, 135);
        assert_eq!(config.iteration_count(), 135);
    }

    #[test]
    fn test_run_iterations_match_config() {
        let tasks = sample_tasks();
        let mut rng = SmallRng::seed_from_u64(42);
        for neighborhood in [Neighborhood::Drift, Neighborhood::FromInput, Neighborhood::Revert] {
            let config = AnnealingConfig::default().with_neighborhood(neighborhood);
            let run = Annealer::new(config).unwrap().run(&tasks, &mut rng).unwrap();
            assert_eq!(run.stats.iterations, 135);
        }
    }

    #[test]
    fn test_iteration_count_independent_of_tasks() {
        let config = AnnealingConfig::new(50.0, 0.5).unwrap();
        let short = vec![task("A", 1, "M1"), task("B", 2, "M2")];
        let mut rng = SmallRng::seed_from_u64(1);

        let a = Annealer::new(config).unwrap().run(&short, &mut rng).unwrap();
        let b = Annealer::new(config).unwrap().run(&sample_tasks(), &mut rng).unwrap();
        assert_eq!(a.stats.iterations, config.iteration_count());
        assert_eq!(b.stats.iterations, config.iteration_count());
        // 50 → 25 → 12.5 → 6.25 → 3.125 → 1.5625 → 0.78
        assert_eq!(config.iteration_count(), 6);
    }

    #[test]
    fn test_anneal_preserves_tasks_and_makespan() {
        let tasks = sample_tasks();
        let mut rng = SmallRng::seed_from_u64(42);
        let result = anneal(&tasks, &AnnealingConfig::default(), &mut rng).unwrap();

        // Machines are fixed per task, so every ordering has the same loads.
        assert_eq!(result.assignment().job_count(), tasks.len());
        assert_eq!(result.makespan(), greedy(&tasks).makespan());
    }

    #[test]
    fn test_anneal_deterministic_with_seed() {
        let tasks = sample_tasks();
        let config = AnnealingConfig::default();
        let a = anneal(&tasks, &config, &mut SmallRng::seed_from_u64(9)).unwrap();
        let b = anneal(&tasks, &config, &mut SmallRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_anneal_accepts_without_improvement() {
        // No candidate can improve, so every acceptance is a temperature draw.
        let tasks = sample_tasks();
        let mut rng = SmallRng::seed_from_u64(3);
        let run = Annealer::default().run(&tasks, &mut rng).unwrap();
        assert_eq!(run.stats.improved, 0);
        assert!(run.stats.accepted > 0);
        assert!(run.stats.accepted <= run.stats.iterations);
    }

    #[test]
    fn test_anneal_two_tasks_single_machine() {
        let tasks = vec![task("A", 5, "M1"), task("B", 5, "M1")];
        let mut rng = SmallRng::seed_from_u64(11);
        let result = anneal(&tasks, &AnnealingConfig::default(), &mut rng).unwrap();

        assert_eq!(result.makespan(), 10);
        let m1 = result.assignment().machine("M1").unwrap();
        let mut ids: Vec<&str> = m1.jobs.iter().map(|j| j.task_id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, ["A", "B"]);
    }

    #[test]
    fn test_anneal_insufficient_tasks() {
        let mut rng = SmallRng::seed_from_u64(42);
        let one = vec![task("A", 5, "M1")];
        let err = anneal(&one, &AnnealingConfig::default(), &mut rng).unwrap_err();
        assert_eq!(err, ScheduleError::InsufficientTasksForSwap { count: 1 });

        let err = anneal(&[], &AnnealingConfig::default(), &mut rng).unwrap_err();
        assert_eq!(err, ScheduleError::InsufficientTasksForSwap { count: 0 });
    }

    #[test]
    fn test_config_rejects_degenerate() {
        assert!(AnnealingConfig::new(1000.0, 1.0).is_err());
        assert!(AnnealingConfig::new(1000.0, 1.5).is_err());
        assert!(AnnealingConfig::new(1000.0, 0.0).is_err());
        assert!(AnnealingConfig::new(1000.0, f64::NAN).is_err());
        assert!(AnnealingConfig::new(1.0, 0.95).is_err());
        assert!(AnnealingConfig::new(-5.0, 0.95).is_err());
        assert!(AnnealingConfig::new(f64::INFINITY, 0.95).is_err());
        assert!(AnnealingConfig::new(2.0, 0.95).is_ok());
    }

    #[test]
    fn test_annealer_rejects_degenerate_config() {
        let config = AnnealingConfig {
            cooling_rate: 1.0,
            ..AnnealingConfig::default()
        };
        let err = Annealer::new(config).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidConfig(_)));

        let mut rng = SmallRng::seed_from_u64(42);
        let err = anneal(&sample_tasks(), &config, &mut rng).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidConfig(_)));
    }

    fn job_order(result: &ScheduleResult, machine: &str) -> Vec<String> {
        result
            .assignment()
            .machine(machine)
            .unwrap()
            .jobs
            .iter()
            .map(|j| j.task_id.clone())
            .collect()
    }

    /// Replays the run's random draws and applies each neighborhood's
    /// order rule by hand, returning the order of the last accepted state.
    ///
    /// Every task shares one machine, so no candidate improves and each
    /// iteration takes one pair sample and one acceptance draw.
    fn expected_order(
        tasks: &[Task],
        config: &AnnealingConfig,
        rng: &mut SmallRng,
    ) -> Vec<String> {
        let n = tasks.len();
        let mut working: Vec<usize> = (0..n).collect();
        let mut accepted = working.clone();
        let mut temperature = config.initial_temperature;

        while temperature > 1.0 {
            if config.neighborhood == Neighborhood::FromInput {
                working = (0..n).collect();
            }
            let picked = index::sample(rng, n, 2);
            let (i, j) = (picked.index(0), picked.index(1));
            working.swap(i, j);

            if rng.random::<f64>() < temperature / config.initial_temperature {
                accepted = working.clone();
            } else if config.neighborhood == Neighborhood::Revert {
                working.swap(i, j);
            }
            temperature *= config.cooling_rate;
        }

        accepted.iter().map(|&k| tasks[k].id().to_string()).collect()
    }

    #[test]
    fn test_neighborhood_job_order() {
        let tasks: Vec<Task> = ["A", "B", "C", "D", "E", "F"]
            .iter()
            .map(|id| task(id, 5, "M1"))
            .collect();

        for neighborhood in [Neighborhood::Drift, Neighborhood::FromInput, Neighborhood::Revert] {
            let config = AnnealingConfig::default().with_neighborhood(neighborhood);
            for seed in [1, 42, 2024] {
                let run = Annealer::new(config)
                    .unwrap()
                    .run(&tasks, &mut SmallRng::seed_from_u64(seed))
                    .unwrap();
                let expected =
                    expected_order(&tasks, &config, &mut SmallRng::seed_from_u64(seed));
                assert_eq!(job_order(&run.result, "M1"), expected, "{neighborhood:?} seed {seed}");
                assert!(run.stats.accepted < run.stats.iterations);
            }
        }
    }

    #[test]
    fn test_from_input_is_one_swap_from_input() {
        let tasks: Vec<Task> = ["A", "B", "C", "D", "E", "F"]
            .iter()
            .map(|id| task(id, 5, "M1"))
            .collect();
        let config = AnnealingConfig::default().with_neighborhood(Neighborhood::FromInput);
        let result = anneal(&tasks, &config, &mut SmallRng::seed_from_u64(8)).unwrap();

        let order = job_order(&result, "M1");
        let moved = order
            .iter()
            .zip(tasks.iter())
            .filter(|(id, t)| id.as_str() != t.id())
            .count();
        assert_eq!(moved, 2);
    }

    #[test]
    fn test_drift_and_revert_diverge() {
        let tasks: Vec<Task> = ["A", "B", "C", "D", "E", "F"]
            .iter()
            .map(|id| task(id, 5, "M1"))
            .collect();
        let orders = |neighborhood| -> Vec<Vec<String>> {
            let config = AnnealingConfig::default().with_neighborhood(neighborhood);
            (0..10)
                .map(|seed| {
                    let result =
                        anneal(&tasks, &config, &mut SmallRng::seed_from_u64(seed)).unwrap();
                    job_order(&result, "M1")
                })
                .collect()
        };
        assert_ne!(orders(Neighborhood::Drift), orders(Neighborhood::Revert));
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: AnnealingConfig =
            serde_json::from_str(r#"{"cooling_rate":0.9,"neighborhood":"revert"}"#).unwrap();
        assert_eq!(config.initial_temperature, DEFAULT_INITIAL_TEMPERATURE);
        assert_eq!(config.cooling_rate, 0.9);
        assert_eq!(config.neighborhood, Neighborhood::Revert);
    }
}
