//! Measurement harness.
//!
//! Times strategy calls on generated or fixed task sequences and,
//! given a [`MemoryProbe`], records their peak heap growth. The harness
//! treats each strategy as an opaque call; it contains no scheduling
//! logic.
//!
//! Peak memory comes from whatever global allocator the final binary
//! installs. The `u-makespan` binary installs [`peak_alloc::PeakAlloc`].

use std::time::{Duration, Instant};

use peak_alloc::PeakAlloc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::SchedulerResult;
use crate::generator::{GeneratorConfig, TaskGenerator};
use crate::models::{ScheduleResult, Task};
use crate::scheduler::{AnnealingConfig, Strategy, PRACTICAL_TASK_LIMIT};

/// One timed strategy call.
#[derive(Debug, Clone, Serialize)]
pub struct Measurement {
    /// Strategy that ran.
    pub strategy: Strategy,
    /// Input size.
    pub task_count: usize,
    /// Wall-clock time of the call.
    pub elapsed: Duration,
    /// Makespan of the returned schedule.
    pub makespan: u64,
    /// Peak heap growth during the call (bytes), when memory was probed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_bytes: Option<usize>,
}

impl Measurement {
    /// Peak heap growth in MiB, when memory was probed.
    pub fn peak_mib(&self) -> Option<f64> {
        self.peak_bytes.map(|b| b as f64 / (1024.0 * 1024.0))
    }
}

/// Source of heap usage counters, normally a counting global allocator.
pub trait MemoryProbe {
    /// Bytes currently allocated.
    fn current_bytes(&self) -> usize;
    /// Highest allocation level since the last reset (bytes).
    fn peak_bytes(&self) -> usize;
    /// Lowers the recorded peak to the current level.
    fn reset_peak(&self);
}

impl MemoryProbe for PeakAlloc {
    fn current_bytes(&self) -> usize {
        self.current_usage()
    }

    fn peak_bytes(&self) -> usize {
        self.peak_usage()
    }

    fn reset_peak(&self) {
        self.reset_peak_usage();
    }
}

/// Task counts used by memory runs when none are configured.
pub const MEMORY_SIZES: [usize; 4] = [10, 50, 100, 200];

/// Runs `strategy` once and records its wall-clock time.
pub fn measure<R: Rng + ?Sized>(
    strategy: Strategy,
    tasks: &[Task],
    rng: &mut R,
) -> SchedulerResult<(ScheduleResult, Measurement)> {
    let start = Instant::now();
    let result = strategy.run(tasks, rng)?;
    let elapsed = start.elapsed();

    let measurement = Measurement {
        strategy,
        task_count: tasks.len(),
        elapsed,
        makespan: result.makespan(),
        peak_bytes: None,
    };
    Ok((result, measurement))
}

/// Runs `strategy` once, recording wall-clock time and peak heap growth.
///
/// Growth is measured against the allocation level just before the call,
/// so memory held by the caller is not counted.
pub fn measure_memory<R: Rng + ?Sized>(
    strategy: Strategy,
    tasks: &[Task],
    rng: &mut R,
    probe: &dyn MemoryProbe,
) -> SchedulerResult<(ScheduleResult, Measurement)> {
    let baseline = probe.current_bytes();
    probe.reset_peak();
    let (result, mut measurement) = measure(strategy, tasks, rng)?;
    measurement.peak_bytes = Some(probe.peak_bytes().saturating_sub(baseline));
    Ok((result, measurement))
}

/// Benchmark suite settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Task counts to generate, one row each.
    pub sizes: Vec<usize>,
    /// Largest size exhaustive search is run on.
    pub exhaustive_limit: usize,
    /// Annealing parameters.
    pub annealing: AnnealingConfig,
    /// Task generator parameters.
    pub generator: GeneratorConfig,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            sizes: vec![4, 6, 8],
            exhaustive_limit: PRACTICAL_TASK_LIMIT - 1,
            annealing: AnnealingConfig::default(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl SuiteConfig {
    /// Sets the task counts.
    pub fn with_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.sizes = sizes;
        self
    }

    /// Sets the exhaustive size cap.
    pub fn with_exhaustive_limit(mut self, limit: usize) -> Self {
        self.exhaustive_limit = limit;
        self
    }

    /// Sets the annealing parameters.
    pub fn with_annealing(mut self, annealing: AnnealingConfig) -> Self {
        self.annealing = annealing;
        self
    }
}

/// Outcome for one strategy at one size.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchCell {
    /// The strategy ran.
    Measured(Measurement),
    /// The strategy was not run at this size.
    Skipped { strategy: Strategy, reason: String },
}

impl BenchCell {
    /// Strategy this cell belongs to.
    pub fn strategy(&self) -> Strategy {
        match self {
            BenchCell::Measured(m) => m.strategy,
            BenchCell::Skipped { strategy, .. } => *strategy,
        }
    }
}

/// All strategy outcomes for one generated input.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteRow {
    /// Number of generated tasks.
    pub size: usize,
    /// One cell per strategy, in [`Strategy::all`] order.
    pub cells: Vec<BenchCell>,
}

/// Generates one task set per size and times every strategy on it.
///
/// With a probe, every cell also records peak heap growth. Exhaustive
/// search is skipped above `exhaustive_limit` and annealing below two
/// tasks.
pub fn run_suite<R: Rng + ?Sized>(
    config: &SuiteConfig,
    rng: &mut R,
    probe: Option<&dyn MemoryProbe>,
) -> SchedulerResult<Vec<SuiteRow>> {
    config.annealing.validate()?;
    let generator = TaskGenerator::new(config.generator.clone())?;
    let strategies = [
        Strategy::Greedy,
        Strategy::Exhaustive,
        Strategy::Annealing(config.annealing),
    ];

    let mut rows = Vec::with_capacity(config.sizes.len());
    for &size in &config.sizes {
        let tasks = generator.generate(size, rng);
        let mut cells = Vec::with_capacity(strategies.len());

        for strategy in strategies {
            if let Some(reason) = skip_reason(strategy, size, config.exhaustive_limit) {
                warn!(size, %strategy, %reason, "strategy skipped");
                cells.push(BenchCell::Skipped { strategy, reason });
                continue;
            }
            let (_, measurement) = match probe {
                Some(probe) => measure_memory(strategy, &tasks, rng, probe)?,
                None => measure(strategy, &tasks, rng)?,
            };
            info!(
                size,
                %strategy,
                elapsed_us = measurement.elapsed.as_micros() as u64,
                peak_bytes = measurement.peak_bytes,
                makespan = measurement.makespan,
                "strategy measured"
            );
            cells.push(BenchCell::Measured(measurement));
        }

        rows.push(SuiteRow { size, cells });
    }

    Ok(rows)
}

fn skip_reason(strategy: Strategy, size: usize, exhaustive_limit: usize) -> Option<String> {
    match strategy {
        Strategy::Exhaustive if size > exhaustive_limit => {
            Some(format!("{size} tasks exceeds exhaustive limit {exhaustive_limit}"))
        }
        Strategy::Annealing(_) if size < 2 => Some("annealing needs at least 2 tasks".into()),
        _ => None,
    }
}
