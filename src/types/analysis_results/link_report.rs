//! Combined per-link report types

use serde::{Deserialize, Serialize};

use crate::types::analysis_results::{CountryBreakdownReport, VisitActivityReport};
use crate::types::common::LinkDetails;

/// Combined analysis for one link: metadata, activity histogram and
/// country breakdown in a single structure
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct LinkReport {
    /// Link identifier
    pub short_code: String,

    /// Stored link metadata; None when only visits were imported
    pub link: Option<LinkDetails>,

    /// Human note when the archive snapshot landed far from the link's
    /// creation instant (e.g. "archived 3 days after creation")
    pub archive_delay: Option<String>,

    /// Visit activity histogram outcome
    pub activity: VisitActivityReport,

    /// Country breakdown
    pub countries: CountryBreakdownReport,
}
