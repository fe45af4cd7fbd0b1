//! Visit activity aggregation with adaptive bucket widths.
//!
//! Builds the time-bucketed visit histogram behind the activity chart.
//!
//! ## Behaviour
//!
//! - **Adaptive unit ladder**: Bucket width steps from hours to years based
//!   on the age of the oldest visit, keeping the rendered bar count roughly
//!   stable across resources of wildly different ages
//! - **Dense bucket array**: Quiet periods appear as zero-count buckets, so
//!   the chart shows gaps instead of compressing them away
//! - **Merge-down cap**: Adjacent buckets are merged until at most
//!   `ChartConfig::max_buckets` remain
//! - **Caller-supplied clock**: The reference instant is an argument, never
//!   read from a system clock, so aggregation is a pure function
//!
//! ## Renderings
//!
//! - **Console**: Per-bucket table with a text bar
//! - **JSON**: Raw structured report
//! - **Plotly**: Bar chart with linear/log toggle

use crate::config::ChartConfig;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::types::analysis_results::{
    HistogramOutcome, VisitActivityReport, VisitBucket, VisitHistogram,
};
use crate::types::visualisation::{PlotlyAnnotation, PlotlyChart, PlotlyLayout, PlotlyTrace};
use crate::types::{BucketUnit, VisitRecord};
use crate::utils::time::{truncate_to_day, truncate_to_hour};
use chrono::{DateTime, Duration, Utc};

/// Visit activity analyser
pub struct VisitActivityAnalyser;

impl VisitActivityAnalyser {
    /// Analyse visit activity for one shortlink.
    ///
    /// Loads the full visit history from the store and aggregates it
    /// against the caller-supplied reference instant. An unknown short
    /// code simply produces a no-data report.
    pub fn analyse(
        db: &Database,
        short_code: &str,
        now: DateTime<Utc>,
        config: &ChartConfig,
    ) -> AppResult<VisitActivityReport> {
        let visits = db.get_visits_for_code(short_code)?;

        // Rows come back oldest first, so the ends give the visit range
        let first_visit = visits.first().map(|v| v.occurred_at);
        let last_visit = visits.last().map(|v| v.occurred_at);
        let outcome = Self::aggregate(&visits, now, config)?;

        Ok(VisitActivityReport {
            short_code: short_code.to_string(),
            total_visits: visits.len() as u64,
            first_visit,
            last_visit,
            outcome,
        })
    }

    /// Aggregate an in-memory visit list into a histogram outcome.
    ///
    /// Pure function of its inputs: the visit list needs no particular
    /// order, and `now` anchors the age calculation. Fails fast when `now`
    /// precedes every visit, which can only be a caller bug; visits that
    /// post-date `now` (clock skew in the collector) are tolerated.
    pub fn aggregate(
        visits: &[VisitRecord],
        now: DateTime<Utc>,
        config: &ChartConfig,
    ) -> AppResult<HistogramOutcome> {
        let earliest = match visits.iter().map(|v| v.occurred_at).min() {
            Some(instant) => instant,
            None => return Ok(HistogramOutcome::NoData),
        };

        if now < earliest {
            return Err(AppError::InvalidData(format!(
                "Reference instant {} precedes the earliest visit {}",
                now.to_rfc3339(),
                earliest.to_rfc3339()
            )));
        }

        let age_days = (now - earliest).num_days();
        let unit = BucketUnit::for_age_days(age_days);

        // Hour buckets anchor to the start of the earliest visit's hour;
        // every wider unit anchors to the start of its UTC day.
        let origin = match unit {
            BucketUnit::Hour => truncate_to_hour(earliest),
            _ => truncate_to_day(earliest),
        };
        let width_seconds = unit.width().num_seconds();

        // origin <= earliest <= every visit, so offsets are non-negative
        // and integer division is a true floor
        let mut max_index = 0usize;
        let mut indices = Vec::with_capacity(visits.len());
        for visit in visits {
            let offset_seconds = (visit.occurred_at - origin).num_seconds();
            let index = (offset_seconds / width_seconds) as usize;
            max_index = max_index.max(index);
            indices.push(index);
        }

        let mut counts = vec![0u64; max_index + 1];
        for index in indices {
            counts[index] += 1;
        }

        let merge_factor = if counts.len() > config.max_buckets {
            counts.len().div_ceil(config.max_buckets)
        } else {
            1
        };
        let counts = merge_buckets(&counts, merge_factor);

        // The meaningful-chart check runs on the merged result
        if counts.len() < config.min_buckets {
            return Ok(HistogramOutcome::InsufficientData {
                bucket_count: counts.len(),
            });
        }

        let bucket_seconds = width_seconds * merge_factor as i64;
        let buckets = counts
            .iter()
            .enumerate()
            .map(|(index, &count)| VisitBucket {
                index,
                start: origin + Duration::seconds(bucket_seconds * index as i64),
                count,
            })
            .collect();

        Ok(HistogramOutcome::Histogram(VisitHistogram {
            unit,
            origin,
            merge_factor,
            bucket_seconds,
            buckets,
        }))
    }
}

/// Collapse adjacent buckets so at most `ceil(len / merge_factor)` remain.
///
/// Original index `i` lands in merged index `i / merge_factor`, so counts
/// are conserved. A factor of 1 is the identity.
fn merge_buckets(counts: &[u64], merge_factor: usize) -> Vec<u64> {
    if merge_factor <= 1 {
        return counts.to_vec();
    }

    let mut merged = vec![0u64; counts.len().div_ceil(merge_factor)];
    for (index, &count) in counts.iter().enumerate() {
        merged[index / merge_factor] += count;
    }
    merged
}

impl VisitActivityReport {
    /// Build the interactive bar chart for this report
    ///
    /// No-data and insufficient-data outcomes produce an empty trace list
    /// so callers can detect the suppressed chart.
    pub fn to_plotly_chart(&self) -> PlotlyChart {
        let mut layout = PlotlyLayout::basic(
            &format!("Visit Activity: {}", self.short_code),
            "Bucket start (UTC)",
            "Visits",
        )
        .with_log_toggle()
        .with_tickangle(-45);
        layout.xaxis.axis_type = Some("date".to_string());
        layout.bargap = Some(0.05);

        let histogram = match self.outcome.histogram() {
            Some(histogram) => histogram,
            None => {
                return PlotlyChart {
                    data: vec![],
                    layout,
                }
            }
        };

        let x: Vec<String> = histogram
            .buckets
            .iter()
            .map(|bucket| bucket.start.format("%Y-%m-%d %H:%M").to_string())
            .collect();
        let y: Vec<f64> = histogram
            .buckets
            .iter()
            .map(|bucket| bucket.count as f64)
            .collect();

        let trace = PlotlyTrace::bar(x, y, "Visits", "#3498DB")
            .with_hovertemplate("%{x}<br>Visits: %{y}<extra></extra>");

        let stats_text = format!(
            "Total visits: {}<br>Bucket unit: {}<br>Buckets: {}",
            self.total_visits,
            histogram.unit.label(),
            histogram.bucket_count()
        );
        layout = layout.with_annotations(vec![PlotlyAnnotation::stats_box(&stats_text, 0.02, 0.98)]);

        PlotlyChart {
            data: vec![trace],
            layout,
        }
    }
}
