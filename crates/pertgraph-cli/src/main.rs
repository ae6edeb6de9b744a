use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use pertgraph_core::{FloatPolicy, ProjectSource, Settings, TimeUnit};
use pertgraph_engine::{anchor, Scheduler};
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, Registry};

use pertgraph_cli::loader::LoadedProject;
use pertgraph_cli::output::{self, OutputFormat};

#[derive(Parser)]
#[command(name = "pertgraph")]
#[command(about = "PertGraph CLI - critical path scheduling for task graphs", long_about = None)]
#[command(version)]
struct Cli {
    /// Output format (json, pretty, table)
    #[arg(short, long, global = true, default_value = "pretty")]
    output: OutputFormat,

    /// Configuration file (TOML)
    #[arg(long, global = true, env = "PERTGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a project file parses and is schedulable
    Validate {
        /// Project file (.json or .toml)
        project: PathBuf,
    },

    /// Compute earliest/latest dates, floats and the critical path
    Schedule {
        /// Project file (.json or .toml)
        project: PathBuf,

        /// Override the configured float policy (normalized, legacy)
        #[arg(long)]
        policy: Option<FloatPolicy>,

        /// Anchor the schedule at this UTC instant (RFC 3339) and print
        /// calendar dates instead of ticks
        #[arg(long)]
        start: Option<DateTime<Utc>>,

        /// Time unit one tick maps to when anchoring (minutes, hours, days)
        #[arg(long)]
        unit: Option<TimeUnit>,
    },

    /// Print just the ordered critical path and the project horizon
    CriticalPath {
        /// Project file (.json or .toml)
        project: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings =
        Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Err(e) = run(&cli, &settings) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
    Ok(())
}

fn run(cli: &Cli, settings: &Settings) -> Result<()> {
    match &cli.command {
        Commands::Validate { project } => {
            let loaded = LoadedProject::from_path(project)?;
            let graph = loaded.to_graph()?;
            output::render_validation(cli.output, loaded.project_name(), &graph)
        }
        Commands::Schedule {
            project,
            policy,
            start,
            unit,
        } => {
            let loaded = LoadedProject::from_path(project)?;
            let graph = loaded.to_graph()?;

            let policy = policy.unwrap_or(settings.schedule.float_policy);
            let schedule = Scheduler::new(policy).schedule(&graph);

            match start.or(settings.schedule.project_start) {
                Some(project_start) => {
                    let unit = unit.unwrap_or(settings.schedule.time_unit);
                    let calendar = anchor(&schedule, project_start, unit);
                    output::render_calendar(cli.output, loaded.project_name(), &calendar)
                }
                None => output::render_schedule(cli.output, loaded.project_name(), &schedule),
            }
        }
        Commands::CriticalPath { project } => {
            let loaded = LoadedProject::from_path(project)?;
            let graph = loaded.to_graph()?;
            let schedule = Scheduler::new(settings.schedule.float_policy).schedule(&graph);
            output::render_critical_path(cli.output, &schedule)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = Registry::default()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer());
    tracing::subscriber::set_global_default(subscriber).ok();
}
