//! Centralised analysis module for the shortlink visit store
//!
//! This module provides a type-safe analysis system over the imported
//! link and visit data, replacing ad-hoc SQL against the store with
//! structured reports.
//!
//! ## Overview
//!
//! The analysis module is organised around the `AnalysisEngine` which
//! provides the main API for all analysis operations:
//!
//! - **Visit Activity** - Time-bucketed histogram with adaptive widths
//! - **Country Breakdown** - Ranked geographic distribution
//! - **Link Report** - Metadata, activity and countries for one link
//! - **Top Links** - Visit ranking across the whole store
//! - **Report Generation** - Formatted output for console, JSON and Plotly
//!
//! ## Usage
//!
//! ```rust
//! use shortlink_analytics::analysis::AnalysisEngine;
//! use shortlink_analytics::errors::AppResult;
//!
//! fn report(code: &str) -> AppResult<()> {
//!     let engine = AnalysisEngine::new("./shortlinks.db")?;
//!     let now = chrono::Utc::now();
//!
//!     // Run individual analyses
//!     let activity = engine.analyse_activity(code, now)?;
//!     let countries = engine.analyse_countries(code)?;
//!     let ranking = engine.analyse_top_links(10, now)?;
//!
//!     // Or everything at once
//!     let full_report = engine.generate_full_report(now)?;
//!     Ok(())
//! }
//! ```

pub mod country_breakdown;
pub mod reports;
pub mod visit_activity;

// Re-exports shaping the public analysis surface
pub use country_breakdown::CountryBreakdownAnalyser;
pub use reports::{OutputFormat, ReportFormatter};
pub use visit_activity::VisitActivityAnalyser;

pub use crate::types::analysis_results::{
    CountryBreakdownReport, FullReport, HistogramOutcome, LinkReport, LinkSummary,
    TopLinksReport, VisitActivityReport,
};

use crate::config::AppConfig;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::utils::time::describe_archive_delay;
use chrono::{DateTime, Duration, Utc};

/// Days counted as "recent" in the top-links ranking
const RECENT_WINDOW_DAYS: i64 = 30;

/// Links covered in depth by the full report
const FULL_REPORT_LINK_LIMIT: usize = 10;

/// Main analysis engine providing access to all report types
///
/// This is the primary interface for analysis operations. Reference
/// instants are always caller-supplied so results are reproducible.
pub struct AnalysisEngine {
    database: Database,
    config: AppConfig,
}

impl AnalysisEngine {
    /// Create a new analysis engine over the store at `database_path`
    ///
    /// Chart tuning comes from the layered application config; when no
    /// config file or environment overrides exist the built-in defaults
    /// apply.
    pub fn new(database_path: &str) -> AppResult<Self> {
        let database = Database::new(database_path)?;
        let config = AppConfig::get_defaults().map_err(|e| AppError::Config(e.to_string()))?;
        Ok(Self { database, config })
    }

    /// Analyse visit activity for one shortlink
    ///
    /// Produces the time-bucketed histogram outcome, with `now` anchoring
    /// the bucket unit choice.
    ///
    /// # Returns
    /// * `AppResult<VisitActivityReport>` - Histogram outcome and visit range
    pub fn analyse_activity(
        &self,
        short_code: &str,
        now: DateTime<Utc>,
    ) -> AppResult<VisitActivityReport> {
        VisitActivityAnalyser::analyse(&self.database, short_code, now, &self.config.chart)
    }

    /// Analyse the country distribution for one shortlink
    ///
    /// # Returns
    /// * `AppResult<CountryBreakdownReport>` - Ranked countries and coverage
    pub fn analyse_countries(&self, short_code: &str) -> AppResult<CountryBreakdownReport> {
        CountryBreakdownAnalyser::analyse(
            &self.database,
            short_code,
            self.config.chart.top_countries,
        )
    }

    /// Generate the combined report for one shortlink
    ///
    /// Joins stored link metadata (when present) with the activity and
    /// country analyses. The archive-delay note appears when the link's
    /// snapshot landed further from its creation than the configured
    /// warning threshold.
    ///
    /// # Returns
    /// * `AppResult<LinkReport>` - Metadata, activity and countries
    pub fn analyse_link(&self, short_code: &str, now: DateTime<Utc>) -> AppResult<LinkReport> {
        let link = self.database.get_link(short_code)?;
        let archive_delay = link.as_ref().and_then(|details| {
            details.archived_at.and_then(|archived| {
                describe_archive_delay(
                    details.created_at,
                    archived,
                    self.config.chart.archive_delay_warning_seconds,
                )
            })
        });

        Ok(LinkReport {
            short_code: short_code.to_string(),
            link,
            archive_delay,
            activity: self.analyse_activity(short_code, now)?,
            countries: self.analyse_countries(short_code)?,
        })
    }

    /// Rank links by total recorded visits
    ///
    /// The recent-visits column counts the trailing thirty days before
    /// `now`.
    ///
    /// # Returns
    /// * `AppResult<TopLinksReport>` - Ranking truncated to `limit` rows
    pub fn analyse_top_links(
        &self,
        limit: usize,
        now: DateTime<Utc>,
    ) -> AppResult<TopLinksReport> {
        let recent_since = now - Duration::days(RECENT_WINDOW_DAYS);
        let totals = self.database.get_visit_totals(limit, recent_since)?;

        let mut links = Vec::with_capacity(totals.len());
        for row in totals {
            let url = self.database.get_link(&row.short_code)?.map(|l| l.url);
            links.push(LinkSummary {
                short_code: row.short_code,
                url,
                total_visits: row.total_visits,
                recent_visits: row.recent_visits,
                last_visit: row.last_visit,
            });
        }

        Ok(TopLinksReport {
            links_with_visits: self.database.count_links_with_visits()?,
            links,
        })
    }

    /// Generate a comprehensive report covering the whole store
    ///
    /// Combines store statistics, the visit ranking and a full per-link
    /// report for each ranked link.
    ///
    /// # Returns
    /// * `AppResult<FullReport>` - Complete analysis of all data
    pub fn generate_full_report(&self, now: DateTime<Utc>) -> AppResult<FullReport> {
        let statistics = self.database.get_database_stats()?;
        let top_links = self.analyse_top_links(FULL_REPORT_LINK_LIMIT, now)?;

        let mut link_reports = Vec::with_capacity(top_links.links.len());
        for summary in &top_links.links {
            link_reports.push(self.analyse_link(&summary.short_code, now)?);
        }

        Ok(FullReport {
            generated_at: now.to_rfc3339(),
            statistics,
            top_links,
            link_reports,
        })
    }

    /// Direct store access for callers with their own queries
    pub fn database(&self) -> &Database {
        &self.database
    }
}
