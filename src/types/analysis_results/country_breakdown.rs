//! Country breakdown analysis types

use serde::{Deserialize, Serialize};

/// Top-N country breakdown for one link's visits
///
/// Visits without a country code are excluded from the tally (they are
/// counted separately, not folded into an "unknown" entry).
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryBreakdownReport {
    /// Link identifier the visits belong to
    pub short_code: String,

    /// All recorded visits, with or without a country
    pub total_visits: u64,

    /// Visits that carried a country code
    pub visits_with_country: u64,

    /// Visits with no usable country code
    pub visits_without_country: u64,

    /// Distinct country codes seen in the input
    pub unique_countries: usize,

    /// Highest-count countries, descending, ties in first-seen order,
    /// truncated to the configured top-N
    pub top_countries: Vec<CountryCount>,
}

/// Visit count for a single country
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCount {
    /// Uppercase ISO 3166-1 alpha-2 code
    pub country_code: String,

    /// Visits attributed to this country
    pub count: u64,
}

impl CountryBreakdownReport {
    /// Share of visits that carried a country code, as a percentage
    pub fn coverage_percentage(&self) -> f64 {
        if self.total_visits == 0 {
            return 0.0;
        }
        (self.visits_with_country as f64 / self.total_visits as f64) * 100.0
    }
}
