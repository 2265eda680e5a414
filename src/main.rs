mod commands;
mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use winnerforce_core::Snapshot;
use winnerforce_core::config::WinnerforceConfig;

#[derive(Parser)]
#[command(name = "winnerforce")]
#[command(about = "Query calendar events, goal links and team assignments from a Winnerforce snapshot")]
struct Cli {
    /// Backend snapshot to read (JSON with posts, campaigns and goals)
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Events on a single day
    Day {
        /// Any ISO date or date-time, "today" or "tomorrow"
        date: String,
    },
    /// Events grouped by day
    Events {
        /// First day to show (defaults to today)
        #[arg(long)]
        from: Option<String>,

        /// Last day to show (defaults to a week from today)
        #[arg(long)]
        to: Option<String>,
    },
    /// A goal with the campaigns and posts linked to it
    Goal { id: String },
    /// Resolve an id to its display label
    Resolve { kind: RecordKind, id: String },
    /// Manage ambassador team assignments
    Team {
        #[command(subcommand)]
        action: TeamAction,
    },
    /// Show the effective configuration
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RecordKind {
    Goal,
    Campaign,
}

#[derive(Subcommand)]
pub enum TeamAction {
    Assign { team: String, ambassador: String },
    Unassign { team: String, ambassador: String },
    List { team: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = WinnerforceConfig::load()?;
    let normalizer = config.normalizer();

    match cli.command {
        Commands::Day { date } => {
            let snapshot = load_snapshot(&config, cli.snapshot.as_deref())?;
            commands::day::run(&snapshot, &normalizer, &date, cli.json)
        }
        Commands::Events { from, to } => {
            let snapshot = load_snapshot(&config, cli.snapshot.as_deref())?;
            commands::events::run(&snapshot, &normalizer, from.as_deref(), to.as_deref(), cli.json)
        }
        Commands::Goal { id } => {
            let snapshot = load_snapshot(&config, cli.snapshot.as_deref())?;
            commands::goal::run(&snapshot, &id, cli.json)
        }
        Commands::Resolve { kind, id } => {
            let snapshot = load_snapshot(&config, cli.snapshot.as_deref())?;
            commands::resolve::run(&snapshot, kind, &id, cli.json)
        }
        Commands::Team { action } => commands::team::run(&config.store_path(), action, cli.json),
        Commands::Config => commands::config::run(&config, cli.json),
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("WINNERFORCE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn load_snapshot(config: &WinnerforceConfig, path_override: Option<&Path>) -> Result<Snapshot> {
    let path = path_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.snapshot_path());

    tracing::debug!(path = %path.display(), "loading snapshot");

    Snapshot::load(&path).with_context(|| {
        format!(
            "No usable snapshot at {}.\n\n\
            Export one from the backend and pass it with:\n  \
            winnerforce --snapshot <file> <command>",
            path.display()
        )
    })
}
