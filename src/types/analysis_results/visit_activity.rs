//! Visit activity histogram types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::common::BucketUnit;

/// Adaptively bucketed visit histogram for one link
///
/// Bucket width is chosen from the age of the oldest visit (hour through
/// year), then adjacent buckets are merged down until at most
/// `ChartConfig::max_buckets` remain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitHistogram {
    /// Bucket duration unit chosen for this invocation
    pub unit: BucketUnit,

    /// Start of bucket 0: the earliest visit truncated to its hour (hour
    /// unit) or its calendar day (all other units)
    pub origin: DateTime<Utc>,

    /// Adjacent raw buckets collapsed into each displayed bucket (1 = none)
    pub merge_factor: usize,

    /// Effective seconds per displayed bucket after the merge
    pub bucket_seconds: i64,

    /// Dense bucket array from the origin; gaps carry zero counts
    pub buckets: Vec<VisitBucket>,
}

impl VisitHistogram {
    /// Number of displayed buckets
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Sum of all bucket counts
    pub fn total_count(&self) -> u64 {
        self.buckets.iter().map(|b| b.count).sum()
    }
}

/// One time slice of the histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitBucket {
    /// 0-based position, counted from the bucket holding the earliest visit
    pub index: usize,

    /// Inclusive start instant of this slice
    pub start: DateTime<Utc>,

    /// Visits whose timestamp falls in this slice
    pub count: u64,
}

impl Default for VisitHistogram {
    fn default() -> Self {
        Self {
            unit: BucketUnit::Hour,
            origin: DateTime::<Utc>::UNIX_EPOCH,
            merge_factor: 1,
            bucket_seconds: 3600,
            buckets: Vec::new(),
        }
    }
}

/// Histogram outcome for one aggregation run
///
/// Degenerate inputs produce explicit variants instead of empty or
/// one-bar charts, so callers can render a placeholder or a plain count
/// summary deliberately.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HistogramOutcome {
    /// Enough buckets to draw a meaningful chart
    Histogram(VisitHistogram),

    /// Visits exist but collapse below the minimum bucket count
    InsufficientData { bucket_count: usize },

    /// No visits recorded at all
    #[default]
    NoData,
}

impl HistogramOutcome {
    /// True when a chartable histogram is present
    pub fn is_chartable(&self) -> bool {
        matches!(self, HistogramOutcome::Histogram(_))
    }

    /// Borrow the histogram when one was produced
    pub fn histogram(&self) -> Option<&VisitHistogram> {
        match self {
            HistogramOutcome::Histogram(h) => Some(h),
            _ => None,
        }
    }
}

/// Visit activity analysis for one link
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitActivityReport {
    /// Link identifier the visits belong to
    pub short_code: String,

    /// All recorded visits, charted or not
    pub total_visits: u64,

    /// Earliest recorded visit
    pub first_visit: Option<DateTime<Utc>>,

    /// Latest recorded visit
    pub last_visit: Option<DateTime<Utc>>,

    /// Histogram or the explicit degenerate outcome
    pub outcome: HistogramOutcome,
}
