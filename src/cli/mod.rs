use crate::errors::AppResult;
use clap::{Parser, Subcommand};
use tracing_subscriber;

pub mod commands;

/// Shortlink Visit Analytics
#[derive(Parser)]
#[command(name = "shortlink-analytics")]
#[command(about = "Shortlink visit import and analytics")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Import link metadata or visit logs from CSV exports
    Import(commands::import::ImportCommand),
    /// Run analysis on the visit store
    Analyse(commands::analysis::AnalyseCommand),
    /// Show store statistics
    Stats(commands::analysis::StatsCommand),
}

pub fn run() -> AppResult<()> {
    // Log filtering follows RUST_LOG, with "error" as the quiet default
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import(command) => command.run(),
        Commands::Analyse(command) => command.run(),
        Commands::Stats(command) => command.run(),
    }
}
