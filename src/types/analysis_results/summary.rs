//! Store-wide summary report types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::DatabaseStats;
use crate::types::analysis_results::LinkReport;

/// Ranking of links by total recorded visits
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TopLinksReport {
    /// Links in the store that have at least one visit
    pub links_with_visits: usize,

    /// Ranked summaries, highest visit count first, truncated to the
    /// requested limit
    pub links: Vec<LinkSummary>,
}

/// One row of the top-links ranking
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct LinkSummary {
    /// Link identifier
    pub short_code: String,

    /// Stored destination URL; None when only visits were imported
    pub url: Option<String>,

    /// All recorded visits for this link
    pub total_visits: u64,

    /// Visits inside the recent window (default last 30 days)
    pub recent_visits: u64,

    /// Latest recorded visit
    pub last_visit: Option<DateTime<Utc>>,
}

/// Complete store report: statistics, ranking and per-link sections
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct FullReport {
    /// Generation timestamp (RFC 3339)
    pub generated_at: String,

    /// Store-wide row counts and date range
    pub statistics: DatabaseStats,

    /// Visit ranking across all links
    pub top_links: TopLinksReport,

    /// Combined report for each ranked link
    pub link_reports: Vec<LinkReport>,
}
