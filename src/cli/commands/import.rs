use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::processor::{CsvImporter, ImporterConfig};
use crate::types::ImportStats;
use clap::{Args, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

/// Import commands for the two CSV export flavours
#[derive(Args)]
#[command(author, version, about, long_about = None)]
pub struct ImportCommand {
    #[command(subcommand)]
    pub source: ImportCommands,
}

impl ImportCommand {
    pub fn run(&self) -> AppResult<()> {
        run_import(&self.source)
    }
}

/// Import source types
#[derive(Subcommand)]
pub enum ImportCommands {
    /// Import a link metadata export (short_code,url,created_at,archived_at,title)
    Links {
        /// Path to the links CSV file
        csv_path: PathBuf,

        /// Visit store to write (overrides config.toml and env vars)
        #[arg(long)]
        database_path: Option<PathBuf>,

        /// Rows per insert transaction (overrides config.toml)
        #[arg(long)]
        batch_size: Option<usize>,

        /// Records between progress updates (overrides config.toml)
        #[arg(long)]
        progress_interval: Option<usize>,
    },

    /// Import a visit log export (short_code,visited_at,country)
    Visits {
        /// Path to the visits CSV file
        csv_path: PathBuf,

        /// Visit store to write (overrides config.toml and env vars)
        #[arg(long)]
        database_path: Option<PathBuf>,

        /// Rows per insert transaction (overrides config.toml)
        #[arg(long)]
        batch_size: Option<usize>,

        /// Records between progress updates (overrides config.toml)
        #[arg(long)]
        progress_interval: Option<usize>,
    },
}

/// Merge CLI overrides with the loaded configuration
fn resolve_importer_config(
    csv_path: &PathBuf,
    database_path: &Option<PathBuf>,
    batch_size: &Option<usize>,
    progress_interval: &Option<usize>,
    app_config: &AppConfig,
) -> AppResult<ImporterConfig> {
    let config = ImporterConfig {
        csv_path: csv_path.clone(),
        database_path: database_path
            .clone()
            .unwrap_or(app_config.database.default_path.clone()),
        batch_size: batch_size.unwrap_or(app_config.import.batch_size),
        progress_interval: progress_interval.unwrap_or(app_config.import.progress_interval),
    };

    // The CSV must exist before anything touches the store
    if !config.csv_path.exists() {
        return Err(AppError::Config(format!(
            "CSV file does not exist: {}",
            config.csv_path.display()
        )));
    }

    info!("Configuration:");
    info!("  CSV file: {}", config.csv_path.display());
    info!("  Database: {}", config.database_path.display());
    info!("  Batch size: {}", config.batch_size);
    info!("  Progress interval: {}", config.progress_interval);

    Ok(config)
}

fn print_import_summary(stats: &ImportStats, with_country_figures: bool) {
    println!(
        "
=== IMPORT COMPLETE ==="
    );
    println!("Records read: {}", stats.total_records);
    println!("Records imported: {}", stats.imported_records);
    println!("Malformed records: {}", stats.malformed_records);
    println!("Error rate: {:.2}%", stats.error_rate());
    if with_country_figures {
        println!("Without country: {}", stats.records_without_country);
        println!("Country coverage: {:.1}%", stats.country_coverage_rate());
    }
    println!(
        "Processing time: {:.1}s",
        stats.timing.elapsed().as_secs_f64()
    );
    println!(
        "Processing rate: {:.2} records/sec",
        stats.processing_rate()
    );
    println!("Batches processed: {}", stats.batches_processed);
}

pub fn run_import(source: &ImportCommands) -> AppResult<()> {
    info!("=== Shortlink Analytics - Import ===");

    // Settings come from config.toml plus environment overrides
    let app_config = match AppConfig::load() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            warn!("Failed to load configuration: {}", e);
            info!("Check config.toml syntax or SHORTLINK_* environment overrides");
            return Err(AppError::Config(format!("Configuration error: {}", e)));
        }
    };

    let (config, importer, stats, with_country_figures) = match source {
        ImportCommands::Links {
            csv_path,
            database_path,
            batch_size,
            progress_interval,
        } => {
            let config = resolve_importer_config(
                csv_path,
                database_path,
                batch_size,
                progress_interval,
                &app_config,
            )?;
            let mut importer = CsvImporter::new(config.clone())?;
            let stats = importer.import_links()?;
            (config, importer, stats, false)
        }
        ImportCommands::Visits {
            csv_path,
            database_path,
            batch_size,
            progress_interval,
        } => {
            let config = resolve_importer_config(
                csv_path,
                database_path,
                batch_size,
                progress_interval,
                &app_config,
            )?;
            let mut importer = CsvImporter::new(config.clone())?;
            let stats = importer.import_visits()?;
            (config, importer, stats, true)
        }
    };

    print_import_summary(&stats, with_country_figures);

    // Post-import store summary
    let db_stats = importer.get_database_stats()?;
    println!(
        "
=== DATABASE SUMMARY ==="
    );
    println!("Links stored: {}", db_stats.total_links);
    println!("Visits stored: {}", db_stats.total_visits);
    println!("Links with visits: {}", db_stats.links_with_visits);
    if let (Some(earliest), Some(latest)) = (db_stats.earliest_visit, db_stats.latest_visit) {
        println!(
            "Visit range: {} - {}",
            earliest.format("%Y-%m-%d"),
            latest.format("%Y-%m-%d")
        );
    }

    println!(
        "
Database written to: {}",
        config.database_path.display()
    );

    Ok(())
}
