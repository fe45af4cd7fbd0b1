//! Store-wide statistics for the stats command and full report.

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::utils::time::parse_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Headline numbers describing the whole store.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DatabaseStats {
    pub total_links: usize,
    pub total_visits: usize,
    pub links_with_visits: usize,
    pub visits_with_country: usize,
    pub visits_without_country: usize,
    pub earliest_visit: Option<DateTime<Utc>>,
    pub latest_visit: Option<DateTime<Utc>>,
}

impl DatabaseStats {
    pub fn country_coverage_percentage(&self) -> f64 {
        if self.total_visits > 0 {
            (self.visits_with_country as f64 / self.total_visits as f64) * 100.0
        } else {
            0.0
        }
    }
}

impl Database {
    pub fn get_database_stats(&self) -> AppResult<DatabaseStats> {
        let total_links: usize = self
            .connection()
            .query_row("SELECT COUNT(*) FROM links", [], |row| row.get(0))
            .map_err(AppError::Database)?;

        let total_visits: usize = self
            .connection()
            .query_row("SELECT COUNT(*) FROM visits", [], |row| row.get(0))
            .map_err(AppError::Database)?;

        let links_with_visits: usize = self
            .connection()
            .query_row(
                "SELECT COUNT(DISTINCT short_code) FROM visits",
                [],
                |row| row.get(0),
            )
            .map_err(AppError::Database)?;

        let visits_with_country: usize = self
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM visits WHERE country_code IS NOT NULL",
                [],
                |row| row.get(0),
            )
            .map_err(AppError::Database)?;

        let earliest_raw: Option<String> = self
            .connection()
            .query_row(
                "SELECT MIN(visited_at) FROM visits",
                [],
                |row| -> rusqlite::Result<Option<String>> { row.get(0) },
            )
            .map_err(AppError::Database)?;

        let latest_raw: Option<String> = self
            .connection()
            .query_row(
                "SELECT MAX(visited_at) FROM visits",
                [],
                |row| -> rusqlite::Result<Option<String>> { row.get(0) },
            )
            .map_err(AppError::Database)?;

        let earliest_visit = earliest_raw.as_deref().map(parse_timestamp).transpose()?;
        let latest_visit = latest_raw.as_deref().map(parse_timestamp).transpose()?;

        Ok(DatabaseStats {
            total_links,
            total_visits,
            links_with_visits,
            visits_with_country,
            visits_without_country: total_visits - visits_with_country,
            earliest_visit,
            latest_visit,
        })
    }
}
