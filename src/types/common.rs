//! Common types shared across the import and analysis pipeline
//!
//! This module contains the fundamental types used throughout the shortlink
//! visit analysis pipeline: raw CSV rows, validated link and visit records,
//! and the adaptive bucket unit used by the activity histogram.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::utils::time::parse_timestamp;

/// Raw link row from links.csv - matches the exact CSV structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkCsvRow {
    pub short_code: String,
    pub url: String,
    pub created_at: String,  // RFC 3339 or "YYYY-MM-DD HH:MM:SS" (UTC)
    pub archived_at: String, // Empty when the snapshot never completed
    pub title: String,       // Empty when the page had no usable title
}

impl LinkCsvRow {
    /// Convert to a validated LinkDetails, normalising empty optionals to None
    pub fn to_link_details(&self) -> Result<LinkDetails, AppError> {
        let short_code = self.short_code.trim();
        if short_code.is_empty() {
            return Err(AppError::InvalidData("link row has empty short_code".to_string()));
        }
        let url = self.url.trim();
        if url.is_empty() {
            return Err(AppError::InvalidData(format!(
                "link '{}' has empty url",
                short_code
            )));
        }

        let created_at = parse_timestamp(&self.created_at)?;
        let archived_at = match self.archived_at.trim() {
            "" => None,
            raw => Some(parse_timestamp(raw)?),
        };
        let title = match self.title.trim() {
            "" => None,
            raw => Some(raw.to_string()),
        };

        Ok(LinkDetails {
            short_code: short_code.to_string(),
            url: url.to_string(),
            created_at,
            archived_at,
            title,
        })
    }
}

/// Raw visit row from visits.csv - matches the exact CSV structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitCsvRow {
    pub short_code: String,
    pub visited_at: String, // RFC 3339 or "YYYY-MM-DD HH:MM:SS" (UTC)
    pub country: String,    // Empty when the geo lookup produced nothing
}

impl VisitCsvRow {
    /// Check if this row carries a usable country code
    pub fn has_country(&self) -> bool {
        !self.country.trim().is_empty()
    }

    /// Convert to a validated Visit, normalising the country code
    pub fn to_visit(&self) -> Result<Visit, AppError> {
        let short_code = self.short_code.trim();
        if short_code.is_empty() {
            return Err(AppError::InvalidData("visit row has empty short_code".to_string()));
        }

        let occurred_at = parse_timestamp(&self.visited_at)?;
        // Geo lookups emit lowercase and padded codes in older exports
        let country_code = match self.country.trim() {
            "" => None,
            raw => Some(raw.to_uppercase()),
        };

        Ok(Visit {
            short_code: short_code.to_string(),
            occurred_at,
            country_code,
        })
    }
}

/// Archived link metadata for database storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkDetails {
    pub short_code: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>, // None until the snapshot lands
    pub title: Option<String>,
}

/// Validated visit event for database storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
    pub short_code: String,
    pub occurred_at: DateTime<Utc>,
    pub country_code: Option<String>, // Uppercase ISO 3166-1 alpha-2 when present
}

impl Visit {
    /// Strip the short code, leaving the aggregation view of this visit
    pub fn to_record(&self) -> VisitRecord {
        VisitRecord {
            occurred_at: self.occurred_at,
            country_code: self.country_code.clone(),
        }
    }
}

/// One observed access event for a single link - the aggregator's input unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub occurred_at: DateTime<Utc>,
    pub country_code: Option<String>,
}

impl VisitRecord {
    pub fn new(occurred_at: DateTime<Utc>, country_code: Option<&str>) -> Self {
        Self {
            occurred_at,
            country_code: country_code.map(|c| c.to_string()),
        }
    }
}

/// Histogram bucket duration, chosen once per aggregation from the age of the
/// oldest visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketUnit {
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

/// Age cutoffs (whole days) for the unit selection ladder, first match wins
const HOUR_MAX_AGE_DAYS: i64 = 3;
const DAY_MAX_AGE_DAYS: i64 = 14;
const WEEK_MAX_AGE_DAYS: i64 = 180;
const MONTH_MAX_AGE_DAYS: i64 = 365;
const QUARTER_MAX_AGE_DAYS: i64 = 1095;

impl BucketUnit {
    /// Select the bucket unit for a link whose oldest visit is `age_days` old
    ///
    /// Monotonic step function: older links get coarser buckets so the chart
    /// stays at a stable bar count across wildly different link ages.
    pub fn for_age_days(age_days: i64) -> Self {
        if age_days <= HOUR_MAX_AGE_DAYS {
            BucketUnit::Hour
        } else if age_days <= DAY_MAX_AGE_DAYS {
            BucketUnit::Day
        } else if age_days <= WEEK_MAX_AGE_DAYS {
            BucketUnit::Week
        } else if age_days <= MONTH_MAX_AGE_DAYS {
            BucketUnit::Month
        } else if age_days <= QUARTER_MAX_AGE_DAYS {
            BucketUnit::Quarter
        } else {
            BucketUnit::Year
        }
    }

    /// Raw width of one bucket before any merge
    pub fn width(&self) -> Duration {
        match self {
            BucketUnit::Hour => Duration::hours(1),
            BucketUnit::Day => Duration::days(1),
            BucketUnit::Week => Duration::days(7),
            BucketUnit::Month => Duration::days(30),
            BucketUnit::Quarter => Duration::days(90),
            BucketUnit::Year => Duration::days(365),
        }
    }

    /// Lowercase unit label used in report output
    pub fn label(&self) -> &'static str {
        match self {
            BucketUnit::Hour => "hour",
            BucketUnit::Day => "day",
            BucketUnit::Week => "week",
            BucketUnit::Month => "month",
            BucketUnit::Quarter => "quarter",
            BucketUnit::Year => "year",
        }
    }
}
