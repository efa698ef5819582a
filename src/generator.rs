//! Task sources.
//!
//! Produces task sequences for scheduling runs: a random generator for
//! benchmarking and a fixed bakery production list for demonstrations.
//! Randomness is always drawn from a caller-supplied generator.

use rand::prelude::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, SchedulerResult};
use crate::models::Task;

/// Random task generator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Machine labels; each task picks one uniformly.
    pub machines: Vec<String>,
    /// Shortest duration (minutes, inclusive).
    pub min_duration: u32,
    /// Longest duration (minutes, inclusive).
    pub max_duration: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            machines: ["A", "B", "C", "D"]
                .iter()
                .map(|m| format!("Machine {m}"))
                .collect(),
            min_duration: 1,
            max_duration: 30,
        }
    }
}

impl GeneratorConfig {
    /// Replaces the machine label set.
    pub fn with_machines<I, S>(mut self, machines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.machines = machines.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the inclusive duration range.
    pub fn with_duration_range(mut self, min: u32, max: u32) -> Self {
        self.min_duration = min;
        self.max_duration = max;
        self
    }

    /// Checks that every generated task would be valid.
    pub fn validate(&self) -> SchedulerResult<()> {
        if self.machines.is_empty() {
            return Err(ScheduleError::InvalidConfig(
                "generator needs at least one machine".into(),
            ));
        }
        if self.machines.iter().any(|m| m.trim().is_empty()) {
            return Err(ScheduleError::InvalidConfig(
                "generator machine labels must be non-empty".into(),
            ));
        }
        if self.min_duration == 0 || self.min_duration > self.max_duration {
            return Err(ScheduleError::InvalidConfig(format!(
                "duration range [{}, {}] must be positive and non-empty",
                self.min_duration, self.max_duration
            )));
        }
        Ok(())
    }
}

/// Random task generator.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_makespan::generator::TaskGenerator;
///
/// let generator = TaskGenerator::default();
/// let tasks = generator.generate(5, &mut SmallRng::seed_from_u64(42));
/// assert_eq!(tasks.len(), 5);
/// assert_eq!(tasks[0].id(), "Task 1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TaskGenerator {
    config: GeneratorConfig,
}

impl TaskGenerator {
    /// Creates a generator, validating its configuration.
    pub fn new(config: GeneratorConfig) -> SchedulerResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates exactly `count` tasks named `Task 1..=count`.
    ///
    /// # Panics
    /// Only if the configuration was left invalid, which [`TaskGenerator::new`]
    /// and the default configuration rule out.
    pub fn generate<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Task> {
        let GeneratorConfig {
            machines,
            min_duration,
            max_duration,
        } = &self.config;

        (1..=count)
            .map(|i| {
                let duration = rng.random_range(*min_duration..=*max_duration);
                let machine = machines.choose(rng).expect("validated: machines non-empty");
                Task::new(format!("Task {i}"), duration, machine.as_str())
                    .expect("validated: positive duration and non-blank machine")
            })
            .collect()
    }
}

/// The eight-step bakery production run used for demonstrations.
pub fn bakery_tasks() -> Vec<Task> {
    const BAKERY: [(&str, u32, &str); 8] = [
        ("Mix Ingredients", 10, "Mixer A"),
        ("Bake Bread", 30, "Oven B"),
        ("Pack Breads", 15, "Packaging Machine C"),
        ("Quality Check", 20, "Quality Control D"),
        ("Mix Dough", 12, "Mixer A"),
        ("Bake Cookies", 25, "Oven B"),
        ("Pack Cookies", 18, "Packaging Machine C"),
        ("Quality Check Cookies", 15, "Quality Control D"),
    ];

    BAKERY
        .iter()
        .map(|&(id, duration, machine)| {
            Task::new(id, duration, machine).expect("bakery list holds valid tasks")
        })
        .collect()
}
