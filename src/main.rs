use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use peak_alloc::PeakAlloc;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::info;

use u_makespan::bench::{self, MemoryProbe, SuiteConfig, MEMORY_SIZES};
use u_makespan::generator::{bakery_tasks, TaskGenerator};
use u_makespan::models::Task;
use u_makespan::report;
use u_makespan::scheduler::{AnnealingConfig, Neighborhood, ScheduleKpi, Strategy};
use u_makespan::validation::validate_tasks;

#[global_allocator]
static PEAK_ALLOC: PeakAlloc = PeakAlloc;

#[derive(Parser)]
#[command(
    name = "u-makespan",
    about = "Makespan scheduling: greedy, exhaustive, and annealing strategies",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Seed for task generation and annealing (random if omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Schedule one task set with each selected strategy.
    ///
    /// Tasks come from a JSON file (array of {id, duration, machine}),
    /// from the random generator, or default to the bakery demo set.
    Run {
        /// JSON task file
        #[arg(short, long, conflicts_with = "generate")]
        tasks: Option<PathBuf>,
        /// Generate this many random tasks instead
        #[arg(short, long)]
        generate: Option<usize>,
        /// Strategies to run (default: all)
        #[arg(short, long, value_enum, value_delimiter = ',')]
        strategy: Vec<StrategyArg>,
        #[command(flatten)]
        annealing: AnnealingArgs,
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },
    /// Time every strategy across generated task sets of several sizes.
    ///
    /// With --memory, report peak heap growth per call instead.
    Bench {
        /// JSON suite configuration; flags below override it
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Task counts, comma separated
        #[arg(long, value_delimiter = ',')]
        sizes: Vec<usize>,
        /// Largest task count exhaustive search runs on
        #[arg(long)]
        exhaustive_limit: Option<usize>,
        /// Report peak heap growth (MiB); sizes default to 10,50,100,200
        #[arg(long)]
        memory: bool,
        #[command(flatten)]
        annealing: AnnealingArgs,
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },
}

#[derive(clap::Args, Default)]
struct AnnealingArgs {
    /// Annealing start temperature
    #[arg(long)]
    initial_temperature: Option<f64>,
    /// Annealing cooling factor in (0, 1)
    #[arg(long)]
    cooling_rate: Option<f64>,
    /// Annealing swap neighborhood
    #[arg(long, value_enum)]
    neighborhood: Option<NeighborhoodArg>,
}

impl AnnealingArgs {
    fn apply(&self, mut config: AnnealingConfig) -> anyhow::Result<AnnealingConfig> {
        if let Some(t) = self.initial_temperature {
            config.initial_temperature = t;
        }
        if let Some(c) = self.cooling_rate {
            config.cooling_rate = c;
        }
        if let Some(n) = self.neighborhood {
            config = config.with_neighborhood(n.into());
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Greedy,
    Exhaustive,
    Annealing,
}

#[derive(Clone, Copy, ValueEnum)]
enum NeighborhoodArg {
    Drift,
    FromInput,
    Revert,
}

impl From<NeighborhoodArg> for Neighborhood {
    fn from(arg: NeighborhoodArg) -> Self {
        match arg {
            NeighborhoodArg::Drift => Neighborhood::Drift,
            NeighborhoodArg::FromInput => Neighborhood::FromInput,
            NeighborhoodArg::Revert => Neighborhood::Revert,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("u_makespan=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    match cli.command {
        Commands::Run {
            tasks,
            generate,
            strategy,
            annealing,
            format,
        } => {
            let tasks = load_tasks(tasks, generate, &mut rng)?;
            let annealing = annealing.apply(AnnealingConfig::default())?;
            let strategies: Vec<Strategy> = if strategy.is_empty() {
                vec![
                    Strategy::Greedy,
                    Strategy::Exhaustive,
                    Strategy::Annealing(annealing),
                ]
            } else {
                strategy
                    .into_iter()
                    .map(|s| match s {
                        StrategyArg::Greedy => Strategy::Greedy,
                        StrategyArg::Exhaustive => Strategy::Exhaustive,
                        StrategyArg::Annealing => Strategy::Annealing(annealing),
                    })
                    .collect()
            };
            run(&tasks, &strategies, format, &mut rng)
        }
        Commands::Bench {
            config,
            sizes,
            exhaustive_limit,
            memory,
            annealing,
            format,
        } => {
            let suite =
                build_suite(config.as_deref(), sizes, exhaustive_limit, &annealing, memory)?;
            let probe: Option<&dyn MemoryProbe> = if memory { Some(&PEAK_ALLOC) } else { None };
            let rows = bench::run_suite(&suite, &mut rng, probe)?;
            match format {
                Format::Text => print!("{}", report::render_suite(&rows)),
                Format::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
            }
            Ok(())
        }
    }
}

/// Layers CLI flags over the suite file (or defaults).
///
/// Memory runs without explicit sizes use [`MEMORY_SIZES`].
fn build_suite(
    path: Option<&Path>,
    sizes: Vec<usize>,
    exhaustive_limit: Option<usize>,
    annealing: &AnnealingArgs,
    memory: bool,
) -> anyhow::Result<SuiteConfig> {
    let mut suite = match path {
        Some(path) => read_json::<SuiteConfig>(path)?,
        None if memory => SuiteConfig::default().with_sizes(MEMORY_SIZES.to_vec()),
        None => SuiteConfig::default(),
    };
    if !sizes.is_empty() {
        suite = suite.with_sizes(sizes);
    }
    if let Some(limit) = exhaustive_limit {
        suite = suite.with_exhaustive_limit(limit);
    }
    let tuned = annealing.apply(suite.annealing)?;
    Ok(suite.with_annealing(tuned))
}

fn load_tasks(
    path: Option<PathBuf>,
    generate: Option<usize>,
    rng: &mut SmallRng,
) -> anyhow::Result<Vec<Task>> {
    let tasks = match (path, generate) {
        (Some(path), _) => read_json::<Vec<Task>>(&path)?,
        (None, Some(count)) => TaskGenerator::default().generate(count, rng),
        (None, None) => bakery_tasks(),
    };

    if let Err(errors) = validate_tasks(&tasks) {
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!("invalid task input:\n  {}", details.join("\n  "));
    }
    info!(tasks = tasks.len(), "tasks loaded");
    Ok(tasks)
}

fn run(
    tasks: &[Task],
    strategies: &[Strategy],
    format: Format,
    rng: &mut SmallRng,
) -> anyhow::Result<()> {
    let mut outputs = Vec::with_capacity(strategies.len());
    for &strategy in strategies {
        let (result, measurement) = bench::measure(strategy, tasks, rng)
            .with_context(|| format!("{strategy} scheduling failed"))?;

        if format == Format::Text {
            println!("{} scheduling result:", strategy.name());
            println!("{result}");
            println!("{}", report::render_kpi(&ScheduleKpi::calculate(result.assignment())));
            println!(
                "Execution time: {}\n",
                report::format_elapsed(measurement.elapsed)
            );
        }
        outputs.push(serde_json::json!({
            "strategy": strategy,
            "result": result,
            "elapsed": measurement.elapsed,
        }));
    }

    if format == Format::Json {
        println!("{}", serde_json::to_string_pretty(&outputs)?);
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}
