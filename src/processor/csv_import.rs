//! CSV import pipeline loading shortlink exports into the SQLite store.
//!
//! Two entry points, one per export flavour:
//! - `import_links`: link metadata (`short_code,url,created_at,archived_at,title`)
//! - `import_visits`: visit logs (`short_code,visited_at,country`)
//!
//! Both share the same failure policy: a row the CSV reader cannot parse at
//! all aborts the run, while a row that parses but fails validation (bad
//! timestamp, blank short code) is logged, counted and skipped.

use crate::database::{Database, DatabaseStats};
use crate::errors::{AppError, AppResult};
use crate::processor::progress::{ProgressReporter, ProgressTracker};
use crate::types::{ImportStats, LinkCsvRow, VisitCsvRow};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use tracing::{info, warn};

/// Runtime configuration for one import run.
#[derive(Debug, Clone)]
pub struct ImporterConfig {
    pub csv_path: PathBuf,
    pub database_path: PathBuf,
    pub batch_size: usize,
    pub progress_interval: usize,
}

/// CSV importer for shortlink exports.
pub struct CsvImporter {
    config: ImporterConfig,
    database: Database,
}

impl CsvImporter {
    /// Create a new importer, opening (or creating) the target database.
    pub fn new(config: ImporterConfig) -> AppResult<Self> {
        if config.batch_size == 0 {
            return Err(AppError::Config(
                "batch_size must be greater than zero".to_string(),
            ));
        }
        if config.progress_interval == 0 {
            return Err(AppError::Config(
                "progress_interval must be greater than zero".to_string(),
            ));
        }

        let database = Database::new(&config.database_path.to_string_lossy())?;

        info!("CSV importer initialised");
        info!("Source CSV: {}", config.csv_path.display());
        info!("Database: {}", config.database_path.display());
        info!("Batch size: {}", config.batch_size);

        Ok(Self { config, database })
    }

    /// Count data rows ahead of the import so progress can show a percentage.
    /// Comment lines and the header do not count towards the total.
    fn count_csv_lines(&self) -> AppResult<u64> {
        info!("Counting CSV rows for progress estimates...");

        let file = File::open(&self.config.csv_path).map_err(AppError::Io)?;
        let reader = BufReader::with_capacity(8 * 1024 * 1024, file); // 8MB buffer

        let mut count = 0u64;
        let mut found_header = false;

        for line_result in reader.lines() {
            let line = line_result.map_err(AppError::Io)?;
            let trimmed = line.trim();

            // Hash lines are comments
            if trimmed.starts_with('#') {
                continue;
            }

            // First remaining line is the header
            if !found_header {
                found_header = true;
                continue;
            }

            count += 1;
        }

        info!("CSV holds {} data rows", count);
        Ok(count)
    }

    fn open_csv_reader(&self) -> AppResult<csv::Reader<BufReader<File>>> {
        let file = File::open(&self.config.csv_path).map_err(AppError::Io)?;
        let buf_reader = BufReader::new(file);
        Ok(ReaderBuilder::new()
            .comment(Some(b'#')) // Hash lines are comments
            .has_headers(true) // Header follows any leading comments
            .from_reader(buf_reader))
    }

    /// Import a link metadata export.
    pub fn import_links(&mut self) -> AppResult<ImportStats> {
        info!("Starting link import");

        let total_estimate = self.count_csv_lines()? as usize;
        let mut csv_reader = self.open_csv_reader()?;

        let mut stats = ImportStats::new();
        let mut batch = Vec::with_capacity(self.config.batch_size);
        let mut progress = ProgressTracker::new();

        for (record_num, result) in csv_reader.deserialize::<LinkCsvRow>().enumerate() {
            let row = result.map_err(AppError::Csv)?;
            stats.total_records += 1;

            match row.to_link_details() {
                Ok(link) => {
                    batch.push(link);
                    stats.imported_records += 1;
                }
                Err(e) => {
                    warn!("Failed to parse link at record {}: {}", record_num + 1, e);
                    stats.malformed_records += 1;
                    continue;
                }
            }

            if batch.len() >= self.config.batch_size {
                self.database.insert_links_batch(&batch)?;
                batch.clear();
                stats.batches_processed += 1;
            }

            if stats.total_records.is_multiple_of(self.config.progress_interval)
                && progress.should_report()
            {
                ProgressReporter::report_import_progress(
                    &stats,
                    Some(total_estimate),
                    progress.elapsed_seconds(),
                )?;
            }
        }

        if !batch.is_empty() {
            self.database.insert_links_batch(&batch)?;
            stats.batches_processed += 1;
        }

        stats.timing.finish();
        ProgressReporter::finish_progress_line();
        ProgressReporter::report_completion("Link import", &stats);

        Ok(stats)
    }

    /// Import a visit log export.
    pub fn import_visits(&mut self) -> AppResult<ImportStats> {
        info!("Starting visit import");

        let total_estimate = self.count_csv_lines()? as usize;
        let mut csv_reader = self.open_csv_reader()?;

        let mut stats = ImportStats::new();
        let mut batch = Vec::with_capacity(self.config.batch_size);
        let mut progress = ProgressTracker::new();

        for (record_num, result) in csv_reader.deserialize::<VisitCsvRow>().enumerate() {
            let row = result.map_err(AppError::Csv)?;
            stats.total_records += 1;

            match row.to_visit() {
                Ok(visit) => {
                    if visit.country_code.is_none() {
                        stats.records_without_country += 1;
                    }
                    batch.push(visit);
                    stats.imported_records += 1;
                }
                Err(e) => {
                    warn!("Failed to parse visit at record {}: {}", record_num + 1, e);
                    stats.malformed_records += 1;
                    continue;
                }
            }

            if batch.len() >= self.config.batch_size {
                self.database.insert_visits_batch(&batch)?;
                batch.clear();
                stats.batches_processed += 1;
            }

            if stats.total_records.is_multiple_of(self.config.progress_interval)
                && progress.should_report()
            {
                ProgressReporter::report_import_progress(
                    &stats,
                    Some(total_estimate),
                    progress.elapsed_seconds(),
                )?;
            }
        }

        if !batch.is_empty() {
            self.database.insert_visits_batch(&batch)?;
            stats.batches_processed += 1;
        }

        stats.timing.finish();
        ProgressReporter::finish_progress_line();
        ProgressReporter::report_completion("Visit import", &stats);
        info!("Country coverage: {:.1}%", stats.country_coverage_rate());

        Ok(stats)
    }

    /// Statistics snapshot from the underlying store
    pub fn get_database_stats(&self) -> AppResult<DatabaseStats> {
        self.database.get_database_stats()
    }
}
