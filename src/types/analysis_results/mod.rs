//! Typed payloads produced by the analysers
//!
//! This module defines the structured results returned by the analysis
//! operations, replacing raw SQL output with type-safe reports.

mod country_breakdown;
mod link_report;
mod summary;
mod visit_activity;

pub use country_breakdown::{CountryBreakdownReport, CountryCount};
pub use link_report::LinkReport;
pub use summary::{FullReport, LinkSummary, TopLinksReport};
pub use visit_activity::{HistogramOutcome, VisitActivityReport, VisitBucket, VisitHistogram};
