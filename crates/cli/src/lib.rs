//! # Porter CLI
//!
//! Command-line interface for Schema Porter.
//!
//! ## Commands
//!
//! - `produce` - Generate drop/make scripts and their run files
//! - `validate` - Check settings and connections without writing anything
//! - `tasks` - List the tasks a run would execute
//! - `init` - Write a default settings file
//!
//! Connections are read from snapshot files (see
//! [`porter_engine::SnapshotConnection`]).

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use porter_engine::{Orchestrator, Principals, SnapshotConnection, default_tasks, resolve_tasks};
use porter_plan::{ConnectionRole, ConnectionSet, RunSettings, TaskSpec, load_settings, save_settings};
use std::path::{Path, PathBuf};

// Re-export dependencies for use in main.rs
pub use porter_core;
pub use porter_engine;
pub use porter_plan;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Arguments
// ============================================================================

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "schema-porter")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate scripts and aggregate run files
    Produce(RunArgs),

    /// Validate settings and connections without producing anything
    Validate(RunArgs),

    /// List the tasks of a run
    Tasks {
        /// Settings file (TOML, or JSON by extension)
        #[arg(short, long, env = "PORTER_SETTINGS")]
        settings: Option<PathBuf>,
    },

    /// Write a default settings file
    Init {
        /// Settings file to create
        #[arg(default_value = "porter.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Settings file (TOML, or JSON by extension)
    #[arg(short, long, env = "PORTER_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Snapshot file serving the source connection
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Snapshot file serving the destination connection
    #[arg(long)]
    pub destination: Option<PathBuf>,

    /// Leave header comments out of scripts and run files
    #[arg(long)]
    pub no_comment: bool,

    /// End every script with a commit marker
    #[arg(long)]
    pub commit: bool,
}

/// Parse the process arguments
pub fn parse() -> Cli {
    Cli::parse()
}

// ============================================================================
// Execution
// ============================================================================

/// Run a parsed command line
pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Produce(args) => produce_command(&args),
        Commands::Validate(args) => validate_command(&args),
        Commands::Tasks { settings } => tasks_command(settings.as_deref()),
        Commands::Init { path, force } => init_command(&path, force),
    }
}

fn produce_command(args: &RunArgs) -> Result<()> {
    let engine = build_orchestrator(args)?;
    let report = engine.produce().context("script generation failed")?;

    println!("{}", report);
    Ok(())
}

fn validate_command(args: &RunArgs) -> Result<()> {
    let engine = build_orchestrator(args)?;

    println!(
        "{} {} entries valid",
        "✓".green().bold(),
        engine.entries().len()
    );
    for target in engine.script_config().targets() {
        println!(
            "  {:<8} {} → {}",
            target.operation.to_string().cyan(),
            target.folder.display(),
            target.aggregate_file.display()
        );
    }
    Ok(())
}

fn tasks_command(settings: Option<&Path>) -> Result<()> {
    let settings = read_settings(settings)?;
    let tasks = task_list(&settings);

    println!(
        "{}",
        format!("{:<16} {:<8} {:<12} {}", "LABEL", "OP", "ROLE", "TRANSFORM").bold()
    );
    for task in &tasks {
        println!(
            "{:<16} {:<8} {:<12} {}",
            task.label, task.operation, task.role, task.transform
        );
    }
    if settings.uses_default_tasks() {
        println!("{}", "(default catalog)".dimmed());
    }
    Ok(())
}

fn init_command(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let settings = RunSettings {
        tasks: default_tasks(),
        ..RunSettings::default()
    };
    save_settings(&settings, path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!("{} wrote {}", "✓".green().bold(), path.display());
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn read_settings(path: Option<&Path>) -> Result<RunSettings> {
    match path {
        Some(path) => {
            let settings = load_settings(path)?;
            tracing::debug!(path = %path.display(), tasks = settings.tasks.len(), "settings loaded");
            Ok(settings)
        }
        None => Ok(RunSettings::default()),
    }
}

/// Tasks of a run: the settings' own list, or the default catalog
fn task_list(settings: &RunSettings) -> Vec<TaskSpec> {
    if settings.uses_default_tasks() {
        default_tasks()
    } else {
        settings.tasks.clone()
    }
}

fn connect(args: &RunArgs) -> Result<ConnectionSet> {
    let mut connections = ConnectionSet::new();
    for (role, path) in [
        (ConnectionRole::Source, &args.source),
        (ConnectionRole::Destination, &args.destination),
    ] {
        if let Some(path) = path {
            let connection = SnapshotConnection::load(path)?;
            tracing::debug!(
                %role,
                principal = %porter_core::Connection::principal(&connection),
                queries = connection.query_count(),
                "snapshot loaded",
            );
            connections.bind(role, Box::new(connection));
        }
    }
    Ok(connections)
}

/// Settings, connections and flags combined into a validated engine
pub fn build_orchestrator(args: &RunArgs) -> Result<Orchestrator> {
    let settings = read_settings(args.settings.as_deref())?;
    let connections = connect(args)?;

    let mut debug = settings.debug;
    if args.no_comment {
        debug.comment = false;
    }
    if args.commit {
        debug.commit = true;
    }

    let principals = Principals::from_connections(&connections);
    let entries = resolve_tasks(&task_list(&settings), &principals);

    let engine = Orchestrator::configure(settings.targets, connections, debug, entries)
        .context("invalid run configuration")?;
    Ok(engine)
}

// ============================================================================
// Tests
// ============================================================================
