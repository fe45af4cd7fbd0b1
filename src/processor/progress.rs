//! Progress reporting for long-running import runs.

use crate::errors::{AppError, AppResult};
use crate::types::ImportStats;
use crate::utils::format::format_hit_count;
use std::time::Instant;
use tracing::info;

/// Timer-driven progress gate for import loops.
///
/// `should_report()` fires at most once per interval, so calling it per
/// record keeps the hot loop cheap while the progress line stays fresh.
pub struct ProgressTracker {
    start_time: Instant,
    last_report: Instant,
    report_interval_ms: u128,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_report: now,
            report_interval_ms: 500, // Report every 500ms
        }
    }
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_report(&mut self) -> bool {
        let now = Instant::now();
        if now.duration_since(self.last_report).as_millis() > self.report_interval_ms {
            self.last_report = now;
            true
        } else {
            false
        }
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }
}

/// In-place progress output for import runs.
pub struct ProgressReporter;

impl ProgressReporter {
    /// Render one progress update from the running import counters.
    pub fn format_import_progress(
        stats: &ImportStats,
        total_estimate: Option<usize>,
        elapsed_secs: f64,
    ) -> String {
        let rate = if elapsed_secs > 0.0 {
            stats.total_records as f64 / elapsed_secs
        } else {
            0.0
        };

        let progress_pct = match total_estimate {
            Some(total) if total > 0 => {
                format!(" ({:.1}%)", (stats.total_records as f64 / total as f64) * 100.0)
            }
            _ => String::new(),
        };

        // Compact counts keep the in-place line a stable width on big imports
        format!(
            "Records: {}{} | Rate: {:.1}/sec | Elapsed: {:.1}s | Malformed: {}",
            format_hit_count(stats.total_records as u64),
            progress_pct,
            rate,
            elapsed_secs,
            stats.malformed_records
        )
    }

    pub fn report_import_progress(
        stats: &ImportStats,
        total_estimate: Option<usize>,
        elapsed_secs: f64,
    ) -> AppResult<()> {
        let message = Self::format_import_progress(stats, total_estimate, elapsed_secs);
        Self::print_progress_line(&message)
    }

    pub fn print_progress_line(message: &str) -> AppResult<()> {
        print!("\r{}", message);
        use std::io::Write;
        std::io::stdout().flush().map_err(AppError::Io)?;
        Ok(())
    }

    pub fn finish_progress_line() {
        // The in-place \r line needs a closing newline
        println!();
    }

    /// Final info-level summary once an import run completes.
    pub fn report_completion(operation: &str, stats: &ImportStats) {
        info!("=== {} Completed ===", operation);
        info!("  {}", stats.summary());
        info!("  Batches processed: {}", stats.batches_processed);
        info!(
            "  Time elapsed: {:.2}s",
            stats.timing.elapsed().as_secs_f64()
        );
    }
}
