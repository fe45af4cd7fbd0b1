//! Combined per-link report formatter
//!
//! Provides formatting for the joined metadata, activity and country view.

use super::utils::{export_json, format_optional_instant};
use super::{country_breakdown, visit_activity, OutputFormat};
use crate::errors::AppResult;
use crate::types::analysis_results::LinkReport;
use crate::utils::format::{clean_url_for_display, truncate_display, DEFAULT_TRUNCATE_CHARS};

/// Format combined link report
///
/// Console output stacks the metadata block, the activity histogram and
/// the country table. The Plotly format carries the activity chart; use
/// the countries operation for the donut.
pub fn format_link_report(report: &LinkReport, format: &OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Json => export_json(report),
        OutputFormat::Plotly => export_json(&report.activity.to_plotly_chart()),
        OutputFormat::Console => {
            let mut output = String::new();

            // Header
            output.push_str(&format!("\n📊 Link Report: {}\n", report.short_code));
            output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

            match &report.link {
                Some(details) => {
                    output.push_str(&format!(
                        "URL: {}\n",
                        clean_url_for_display(&details.url)
                    ));
                    if let Some(title) = &details.title {
                        output.push_str(&format!(
                            "Title: {}\n",
                            truncate_display(title, DEFAULT_TRUNCATE_CHARS)
                        ));
                    }
                    output.push_str(&format!(
                        "Created: {}\n",
                        format_optional_instant(&Some(details.created_at))
                    ));
                    output.push_str(&format!(
                        "Archived: {}\n",
                        format_optional_instant(&details.archived_at)
                    ));
                }
                None => {
                    output.push_str("No stored metadata for this link (visits only).\n");
                }
            }
            if let Some(note) = &report.archive_delay {
                output.push_str(&format!("Warning: {}\n", note));
            }

            // Stacked sections reuse the per-analysis formatters
            output.push_str(&visit_activity::format_visit_activity(
                &report.activity,
                &OutputFormat::Console,
            )?);
            output.push_str(&country_breakdown::format_country_breakdown(
                &report.countries,
                &OutputFormat::Console,
            )?);

            Ok(output)
        }
    }
}
