//! Country breakdown report formatter
//!
//! Provides formatting for the ranked geographic distribution.

use super::utils::{export_json, format_number};
use super::OutputFormat;
use crate::errors::AppResult;
use crate::types::analysis_results::CountryBreakdownReport;
use crate::types::visualisation::PlotlyChart;

/// Format country breakdown report
///
/// Displays the ranked country distribution for one shortlink:
/// - Coverage of the geo lookup across all visits
/// - Top countries with counts and share of located visits
pub fn format_country_breakdown(
    report: &CountryBreakdownReport,
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
            output.push_str(&format!("\n📊 Country Breakdown: {}\n", report.short_code));
            output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

            // Nothing recorded for this link
            if report.total_visits == 0 {
                output.push_str("No visits recorded.\n");
                return Ok(output);
            }

            // Summary
            output.push_str(&format!(
                "Total Visits: {}\n",
                format_number(report.total_visits as usize)
            ));
            output.push_str(&format!(
                "With Country: {} ({:.1}%)\n",
                format_number(report.visits_with_country as usize),
                report.coverage_percentage()
            ));
            output.push_str(&format!(
                "Unique Countries: {}\n\n",
                report.unique_countries
            ));

            if report.top_countries.is_empty() {
                output.push_str("No visits carried a country code.\n");
                return Ok(output);
            }

            // Ranked table
            output.push_str("Top Countries:\n");
            output.push_str(&format!(
                "  {:<8} {:>10} {:>8}\n",
                "Country", "Visits", "Share"
            ));
            output.push_str(&format!("  {:-<8} {:->10} {:->8}\n", "", "", ""));

            for entry in &report.top_countries {
                let share = entry.count as f64 / report.visits_with_country as f64 * 100.0;
                output.push_str(&format!(
                    "  {:<8} {:>10} {:>7.1}%\n",
                    entry.country_code,
                    format_number(entry.count as usize),
                    share
                ));
            }
            output.push('\n');

            // Cross-references to the other formats
            output.push_str("Note: Share is of visits with a known country.\n");
            output.push_str("      For the full breakdown, use --format json\n");
            output.push_str("      For a donut chart, use --format plotly\n");

            Ok(output)
        }
    }
}
