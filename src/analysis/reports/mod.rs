//! Rendering of analysis results.
//!
//! Every analysis goes through the [`ReportFormatter`] facade, which turns
//! a result into console text, pretty JSON or a Plotly chart document.

pub mod country_breakdown;
pub mod link_report;
pub mod summary;
pub mod utils;
pub mod visit_activity;

use crate::database::DatabaseStats;
use crate::errors::AppResult;
use crate::types::analysis_results::{
    CountryBreakdownReport, FullReport, LinkReport, TopLinksReport, VisitActivityReport,
};

/// How a rendered report should be expressed
#[derive(Debug, Clone, Default)]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
    Plotly,
}

/// Single entry point for turning analysis results into output
pub struct ReportFormatter;

impl ReportFormatter {
    // Utilities
    pub fn format_number(n: usize) -> String {
        utils::format_number(n)
    }

    // Per-link
    pub fn format_visit_activity(
        r: &VisitActivityReport,
        f: &OutputFormat,
    ) -> AppResult<String> {
        visit_activity::format_visit_activity(r, f)
    }
    pub fn format_country_breakdown(
        r: &CountryBreakdownReport,
        f: &OutputFormat,
    ) -> AppResult<String> {
        country_breakdown::format_country_breakdown(r, f)
    }
    pub fn format_link_report(r: &LinkReport, f: &OutputFormat) -> AppResult<String> {
        link_report::format_link_report(r, f)
    }

    // Store-wide
    pub fn format_top_links(r: &TopLinksReport, f: &OutputFormat) -> AppResult<String> {
        summary::format_top_links(r, f)
    }
    pub fn format_database_stats(r: &DatabaseStats, f: &OutputFormat) -> AppResult<String> {
        summary::format_database_stats(r, f)
    }
    pub fn format_full_report(r: &FullReport, f: &OutputFormat) -> AppResult<String> {
        summary::format_full_report(r, f)
    }
}
