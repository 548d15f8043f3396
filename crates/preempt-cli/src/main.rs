use std::path::PathBuf;

use clap::{Parser, Subcommand};
use preempt_solver::{SearchStrategy, Solver, SolverConfig};

mod commands;

#[derive(Parser)]
#[command(
    name = "preempt",
    about = "Pick the cheapest running tasks to evict so a pending task fits",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Solver configuration file (TOML). Defaults apply when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log search progress at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a single-node scenario.
    ///
    /// The scenario is a JSON object with `preemptor` and `node` resource
    /// lists and a `preemptees` array of `{ "resources": {..}, "cost": n }`.
    Solve {
        /// Path to the scenario file
        #[arg(short, long)]
        scenario: PathBuf,
        /// Override the configured search strategy (bounded, exhaustive)
        #[arg(long)]
        strategy: Option<SearchStrategy>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Solve every node of a multi-node scenario and rank them by cost.
    Rank {
        /// Path to the scenario file
        #[arg(short, long)]
        scenario: PathBuf,
        /// Override the configured search strategy (bounded, exhaustive)
        #[arg(long)]
        strategy: Option<SearchStrategy>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Print the effective solver configuration as TOML.
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("preempt_solver={level}").parse()?)
                .add_directive(format!("preempt_cli={level}").parse()?),
        )
        .init();

    let config = match &cli.config {
        Some(path) => SolverConfig::from_file(path)?,
        None => SolverConfig::default(),
    };

    match cli.command {
        Commands::Solve {
            scenario,
            strategy,
            format,
        } => {
            let solver = Solver::new(with_strategy(config, strategy));
            commands::solve::solve(&scenario, &solver, &format)
        }
        Commands::Rank {
            scenario,
            strategy,
            format,
        } => {
            let solver = Solver::new(with_strategy(config, strategy));
            commands::rank::rank(&scenario, &solver, &format)
        }
        Commands::Config => commands::config::show(&config),
    }
}

fn with_strategy(mut config: SolverConfig, strategy: Option<SearchStrategy>) -> SolverConfig {
    if let Some(strategy) = strategy {
        config.strategy = strategy;
    }
    config
}
