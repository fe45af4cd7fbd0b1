//! Link and visit operations on the shortlink store.
//!
//! Two write paths (batched, transactional inserts for each table) and the
//! read queries the analysers run. All timestamps cross the SQL boundary as
//! RFC 3339 TEXT via the helpers module.

use crate::database::helpers::{
    link_details_from_row, optional_timestamp_column, visit_record_from_row,
};
use crate::database::Database;
use crate::errors::AppResult;
use crate::types::{LinkDetails, Visit, VisitRecord};
use chrono::{DateTime, Utc};
use rusqlite::params;
use tracing::debug;

/// Per-shortlink visit totals used by the top-links summary.
#[derive(Debug, Clone)]
pub struct VisitTotals {
    pub short_code: String,
    pub total_visits: u64,
    pub recent_visits: u64,
    pub last_visit: Option<DateTime<Utc>>,
}

impl Database {
    /// Insert a batch of link metadata rows atomically.
    ///
    /// Uses INSERT OR REPLACE so a re-imported export refreshes metadata in
    /// place instead of failing on the primary key.
    pub fn insert_links_batch(&mut self, batch: &[LinkDetails]) -> AppResult<()> {
        self.execute_transaction(|tx| {
            let mut stmt = tx.prepare_cached(
                r#"INSERT OR REPLACE INTO links
                   (short_code, url, created_at, archived_at, title)
                   VALUES (?1, ?2, ?3, ?4, ?5)"#,
            )?;

            for link in batch {
                stmt.execute(params![
                    link.short_code,
                    link.url,
                    link.created_at.to_rfc3339(),
                    link.archived_at.map(|ts| ts.to_rfc3339()),
                    link.title,
                ])?;
            }

            debug!("Inserted batch of {} links", batch.len());
            Ok(())
        })
    }

    /// Insert a batch of visit rows atomically.
    ///
    /// Plain INSERT: the visit log is append-only and repeat visits at the
    /// same instant are legitimate, so there is nothing to dedupe on.
    pub fn insert_visits_batch(&mut self, batch: &[Visit]) -> AppResult<()> {
        self.execute_transaction(|tx| {
            let mut stmt = tx.prepare_cached(
                r#"INSERT INTO visits (short_code, visited_at, country_code)
                   VALUES (?1, ?2, ?3)"#,
            )?;

            for visit in batch {
                stmt.execute(params![
                    visit.short_code,
                    visit.occurred_at.to_rfc3339(),
                    visit.country_code,
                ])?;
            }

            debug!("Inserted batch of {} visits", batch.len());
            Ok(())
        })
    }

    /// Look up link metadata for a shortlink code.
    pub fn get_link(&self, short_code: &str) -> AppResult<Option<LinkDetails>> {
        let mut stmt = self.connection().prepare(
            r#"SELECT short_code, url, created_at, archived_at, title
               FROM links
               WHERE short_code = ?1"#,
        )?;

        let mut rows = stmt.query_map(params![short_code], link_details_from_row)?;
        match rows.next() {
            Some(result) => Ok(Some(result?)),
            None => Ok(None),
        }
    }

    /// Load the full visit history for a shortlink, oldest first.
    ///
    /// Ties on `visited_at` fall back to insertion order so repeated runs
    /// see the same sequence.
    pub fn get_visits_for_code(&self, short_code: &str) -> AppResult<Vec<VisitRecord>> {
        let mut stmt = self.connection().prepare(
            r#"SELECT visited_at, country_code
               FROM visits
               WHERE short_code = ?1
               ORDER BY visited_at, id"#,
        )?;

        let rows = stmt.query_map(params![short_code], visit_record_from_row)?;

        let mut visits = Vec::new();
        for visit in rows {
            visits.push(visit?);
        }

        Ok(visits)
    }

    /// Per-shortlink visit totals, busiest first.
    ///
    /// `recent_since` bounds the recent-activity column; ties on the total
    /// break alphabetically so the ranking is stable across runs.
    pub fn get_visit_totals(
        &self,
        limit: usize,
        recent_since: DateTime<Utc>,
    ) -> AppResult<Vec<VisitTotals>> {
        let mut stmt = self.connection().prepare(
            r#"SELECT short_code,
                      COUNT(*) AS total_visits,
                      SUM(CASE WHEN visited_at >= ?1 THEN 1 ELSE 0 END) AS recent_visits,
                      MAX(visited_at) AS last_visit
               FROM visits
               GROUP BY short_code
               ORDER BY total_visits DESC, short_code ASC
               LIMIT ?2"#,
        )?;

        let rows = stmt.query_map(params![recent_since.to_rfc3339(), limit], |row| {
            Ok(VisitTotals {
                short_code: row.get(0)?,
                total_visits: row.get::<_, i64>(1)? as u64,
                recent_visits: row.get::<_, i64>(2)? as u64,
                last_visit: optional_timestamp_column(row, 3)?,
            })
        })?;

        let mut totals = Vec::new();
        for row in rows {
            totals.push(row?);
        }

        Ok(totals)
    }

    /// Number of distinct shortlinks with at least one recorded visit.
    pub fn count_links_with_visits(&self) -> AppResult<usize> {
        let count: usize = self.connection().query_row(
            "SELECT COUNT(DISTINCT short_code) FROM visits",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
