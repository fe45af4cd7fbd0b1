//! Visit activity report formatter
//!
//! Provides formatting for the time-bucketed visit histogram.

use super::utils::{export_json, format_number, format_optional_instant};
use super::OutputFormat;
use crate::errors::AppResult;
use crate::types::analysis_results::{HistogramOutcome, VisitActivityReport};
use crate::types::visualisation::PlotlyChart;

/// Widest console histogram bar, in characters
const BAR_WIDTH: usize = 30;

/// Format visit activity report
///
/// Displays the bucketed activity histogram for one shortlink:
/// - Visit totals and first/last instants
/// - Per-bucket table with a text bar, zero rows included
/// - Suppression notice when too few buckets survive aggregation
pub fn format_visit_activity(
    report: &VisitActivityReport,
    format: &OutputFormat,
) -> AppResult<String> {
    match format {
        OutputFormat::Json => export_json(report),
        OutputFormat::Plotly => {
            let chart: PlotlyChart = report.to_plotly_chart();
            export_json(&chart)
        }
        OutputFormat::Console => {
            let mut output = String::new();

            // Header
            output.push_str(&format!("\n📊 Visit Activity: {}\n", report.short_code));
            output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

            // No visits at all
            if matches!(report.outcome, HistogramOutcome::NoData) {
                output.push_str("No visits recorded.\n");
                return Ok(output);
            }

            // Summary
            output.push_str(&format!(
                "Total Visits: {}\n",
                format_number(report.total_visits as usize)
            ));
            output.push_str(&format!(
                "First Visit: {}\n",
                format_optional_instant(&report.first_visit)
            ));
            output.push_str(&format!(
                "Last Visit: {}\n",
                format_optional_instant(&report.last_visit)
            ));

            let histogram = match &report.outcome {
                HistogramOutcome::Histogram(histogram) => histogram,
                HistogramOutcome::InsufficientData { bucket_count } => {
                    output.push_str(&format!(
                        "\nOnly {} time bucket{} after aggregation; chart suppressed.\n",
                        bucket_count,
                        if *bucket_count == 1 { "" } else { "s" }
                    ));
                    return Ok(output);
                }
                HistogramOutcome::NoData => unreachable!("handled above"),
            };

            output.push_str(&format!("Bucket Unit: {}\n", histogram.unit.label()));
            if histogram.merge_factor > 1 {
                output.push_str(&format!(
                    "Bucket Span: {} {}s per bar (merged)\n",
                    histogram.merge_factor,
                    histogram.unit.label()
                ));
            }
            output.push('\n');

            // Per-bucket table
            let max_count = histogram
                .buckets
                .iter()
                .map(|bucket| bucket.count)
                .max()
                .unwrap_or(0)
                .max(1);
            output.push_str(&format!(
                "  {:<20} {:>10}  {}\n",
                "Bucket Start (UTC)", "Visits", "Histogram"
            ));
            output.push_str(&format!("  {:-<20} {:->10}  {:-<30}\n", "", "", ""));

            for bucket in &histogram.buckets {
                let bar_length = ((bucket.count as f64 / max_count as f64) * BAR_WIDTH as f64)
                    .round() as usize;
                let bar_length = if bucket.count > 0 {
                    bar_length.max(1)
                } else {
                    0
                };
                output.push_str(&format!(
                    "  {:<20} {:>10}  {}\n",
                    bucket.start.format("%Y-%m-%d %H:%M"),
                    format_number(bucket.count as usize),
                    "█".repeat(bar_length)
                ));
            }
            output.push('\n');

            // Footer pointers to the machine formats
            output.push_str("Note: Bucket boundaries are UTC-aligned; quiet periods show as zero rows.\n");
            output.push_str("      For raw bucket data, use --format json\n");
            output.push_str("      For an interactive chart, use --format plotly\n");

            Ok(output)
        }
    }
}
