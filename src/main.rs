//! Schema Porter
//!
//! Drop/make SQL script generator driven by catalog metadata.
//!
//! This is the main entry point for the command-line tool.

use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = porter_cli::parse();

    // Initialize logging; --quiet wins over RUST_LOG
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    porter_cli::execute(cli)
}
