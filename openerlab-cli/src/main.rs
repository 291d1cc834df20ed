//! OpenerLab CLI — opener-first vs. starter-first simulation commands.
//!
//! Commands:
//! - `simulate` — run the Monte Carlo batch from a TOML config or explicit roster files
//! - `matchups` — print derived outcome probabilities for every hitter/pitcher pairing
//!
//! Log verbosity comes from `OPENERLAB_LOG` (default `openerlab=info`).

use std::path::PathBuf;
use std::sync::Once;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use openerlab_core::domain::EventCategory;
use openerlab_core::engine::{Strategy, INNINGS};
use openerlab_core::outcome::matchup_table;
use openerlab_runner::{
    load_roster, run_strategies, save_artifacts, RosterPaths, SimulationConfig, SimulationReport,
    StrategyComparison,
};

static INIT: Once = Once::new();

#[derive(Parser)]
#[command(
    name = "openerlab",
    about = "OpenerLab CLI — Monte Carlo comparison of opener and starter pitching plans"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate games under one or both pitching strategies.
    Simulate {
        /// Path to a TOML config file. Flags below override its values.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pitcher CSV (order 1 = opener, 2 = starter, 3 = bullpen).
        #[arg(long)]
        pitchers: Option<PathBuf>,

        /// Hitter CSV (order = batting slot 1-9).
        #[arg(long)]
        hitters: Option<PathBuf>,

        /// Games per strategy.
        #[arg(long)]
        sample_size: Option<usize>,

        /// Master seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Which strategies to run.
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Run trials on a single thread.
        #[arg(long, default_value_t = false)]
        sequential: bool,

        /// Output directory for artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Print the summary without writing artifacts.
        #[arg(long, default_value_t = false)]
        no_artifacts: bool,
    },
    /// Print the hitter × pitcher matchup table.
    Matchups {
        /// Path to a TOML config file supplying the roster paths.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pitcher CSV.
        #[arg(long)]
        pitchers: Option<PathBuf>,

        /// Hitter CSV.
        #[arg(long)]
        hitters: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Opener,
    Starter,
    Both,
}

impl StrategyArg {
    fn strategies(self) -> Vec<Strategy> {
        match self {
            StrategyArg::Opener => vec![Strategy::OpenerFirst],
            StrategyArg::Starter => vec![Strategy::StarterFirst],
            StrategyArg::Both => Strategy::ALL.to_vec(),
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            config,
            pitchers,
            hitters,
            sample_size,
            seed,
            strategy,
            sequential,
            output_dir,
            no_artifacts,
        } => {
            let mut config = base_config(config, pitchers, hitters)?;
            if let Some(n) = sample_size {
                config.simulation.sample_size = n;
            }
            if let Some(seed) = seed {
                config.simulation.seed = seed;
            }
            if let Some(choice) = strategy {
                config.simulation.strategies = choice.strategies();
            }
            if sequential {
                config.simulation.parallel = false;
            }
            config.validate()?;
            run_simulate(config, output_dir, no_artifacts)
        }
        Commands::Matchups {
            config,
            pitchers,
            hitters,
        } => run_matchups(base_config(config, pitchers, hitters)?),
    }
}

/// Install the fmt subscriber once. Logs go to stderr so stdout stays a report.
fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("OPENERLAB_LOG")
            .unwrap_or_else(|_| EnvFilter::new("openerlab=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}

/// Config file (if any) with roster flags layered on top.
fn base_config(
    config_path: Option<PathBuf>,
    pitchers: Option<PathBuf>,
    hitters: Option<PathBuf>,
) -> Result<SimulationConfig> {
    let mut config = match config_path {
        Some(path) => SimulationConfig::from_file(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    match (pitchers, hitters) {
        (Some(pitchers), Some(hitters)) => {
            config.roster = Some(RosterPaths { pitchers, hitters });
        }
        (pitchers, hitters) => {
            let Some(roster) = config.roster.as_mut() else {
                bail!("both --pitchers and --hitters are required when no config supplies a roster");
            };
            if let Some(pitchers) = pitchers {
                roster.pitchers = pitchers;
            }
            if let Some(hitters) = hitters {
                roster.hitters = hitters;
            }
        }
    }
    Ok(config)
}

fn run_simulate(config: SimulationConfig, output_dir: PathBuf, no_artifacts: bool) -> Result<()> {
    let roster = load_roster(config.roster_paths()?)?;
    let comparison = run_strategies(
        &roster.staff,
        &roster.lineup,
        &config.simulation.strategies,
        &config.batch(),
    )?;

    print_summary(&config, &comparison);

    if !no_artifacts {
        let report = SimulationReport::new(config, comparison);
        let run_dir = save_artifacts(&report, &output_dir)?;
        println!("Artifacts saved to: {}", run_dir.display());
    }
    Ok(())
}

fn run_matchups(config: SimulationConfig) -> Result<()> {
    let roster = load_roster(config.roster_paths()?)?;
    let table = matchup_table(&roster.staff, &roster.lineup);

    print!("{:<4} {:<18} {:<8}", "Slot", "Hitter", "Role");
    for event in EventCategory::ALL {
        print!(" {:>7}", event.code());
    }
    println!(" {:>8}", "xRuns");
    println!("{}", "-".repeat(32 + 8 * EventCategory::ALL.len() + 9));

    for matchup in &table {
        print!(
            "{:<4} {:<18} {:<8}",
            matchup.slot.number(),
            truncate(&matchup.hitter, 18),
            matchup.role.to_string()
        );
        for (_, p) in matchup.probabilities.iter() {
            print!(" {p:>7.4}");
        }
        println!(" {:>8.4}", matchup.expected_runs);
    }
    Ok(())
}

fn truncate(name: &str, width: usize) -> String {
    name.chars().take(width).collect()
}

fn print_summary(config: &SimulationConfig, comparison: &StrategyComparison) {
    println!();
    println!("=== Simulation Result ===");
    println!("Games/strategy: {}", config.simulation.sample_size);
    println!("Seed:           {}", config.simulation.seed);
    println!();

    for result in &comparison.results {
        println!("--- {} ---", result.strategy);
        println!("Expected runs:  {:.4}", result.expected_runs);
        println!("Mean PA/game:   {:.2}", result.mean_plate_appearances);

        let innings = result.runs.inning_totals();
        let cells: Vec<String> = innings.iter().map(|v| format!("{v:>7.4}")).collect();
        let header: Vec<String> = (1..=INNINGS).map(|i| format!("{i:>7}")).collect();
        println!("Inning:        {}", header.join(""));
        println!("Runs:          {}", cells.join(""));
        println!();
    }

    if let Some(diff) = comparison.opener_minus_starter {
        println!("Opener - starter: {diff:+.4} runs/game");
        println!();
    }
}
