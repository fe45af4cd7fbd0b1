//! Import statistics collected while loading CSV exports into the store.

use std::time::{Duration, Instant};

/// Wall-clock timing for a processing run.
///
/// `elapsed()` reports live elapsed time until `finish()` freezes it, so
/// progress reporting and the final summary share one source of truth.
#[derive(Debug, Clone)]
pub struct TimingInfo {
    pub start_time: Instant,
    pub processing_duration: Duration,
}

impl Default for TimingInfo {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            processing_duration: Duration::default(),
        }
    }
}

impl TimingInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(&mut self) {
        self.processing_duration = self.start_time.elapsed();
    }

    pub fn elapsed(&self) -> Duration {
        if self.processing_duration.is_zero() {
            self.start_time.elapsed()
        } else {
            self.processing_duration
        }
    }
}

/// Counters for a single CSV import run (links or visits).
#[derive(Debug, Clone)]
pub struct ImportStats {
    pub total_records: usize,
    pub imported_records: usize,
    pub malformed_records: usize,
    /// Visit rows that carried no usable country code. Always zero for
    /// link imports.
    pub records_without_country: usize,
    pub batches_processed: usize,
    pub timing: TimingInfo,
}

impl Default for ImportStats {
    fn default() -> Self {
        Self {
            total_records: 0,
            imported_records: 0,
            malformed_records: 0,
            records_without_country: 0,
            batches_processed: 0,
            timing: TimingInfo::new(),
        }
    }
}

impl ImportStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error_rate(&self) -> f64 {
        if self.total_records > 0 {
            (self.malformed_records as f64 / self.total_records as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn country_coverage_rate(&self) -> f64 {
        if self.imported_records > 0 {
            let with_country = self.imported_records - self.records_without_country;
            (with_country as f64 / self.imported_records as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn processing_rate(&self) -> f64 {
        let elapsed = self.timing.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.total_records as f64 / elapsed
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} records read, {} imported, {} malformed ({:.1}%), {:.1} records/sec",
            self.total_records,
            self.imported_records,
            self.malformed_records,
            self.error_rate(),
            self.processing_rate()
        )
    }
}
