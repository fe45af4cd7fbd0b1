//! Store-wide summary report formatters
//!
//! Provides formatting for store statistics, the top-links ranking and
//! the comprehensive full report.

use super::utils::{export_json, format_number, format_optional_instant};
use super::{country_breakdown, link_report, visit_activity, OutputFormat};
use crate::database::DatabaseStats;
use crate::errors::AppResult;
use crate::types::analysis_results::{FullReport, TopLinksReport};
use crate::types::visualisation::{PlotlyChart, PlotlyLayout, PlotlyTrace};
use crate::utils::format::{clean_url_for_display, truncate_display};

/// Widest URL shown in the ranking table
const URL_DISPLAY_CHARS: usize = 40;

/// Format the top-links ranking
///
/// Displays the visit ranking across the whole store:
/// - Totals, trailing-30-day counts and last-visit instants
/// - Destination URLs where link metadata was imported
pub fn format_top_links(report: &TopLinksReport, format: &OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Json => export_json(report),
        OutputFormat::Plotly => {
            let chart = build_top_links_chart(report);
            export_json(&chart)
        }
        OutputFormat::Console => {
            let mut output = String::new();

            // Header
            output.push_str("\n📊 Top Links by Visits\n");
            output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

            // Empty store
            if report.links.is_empty() {
                output.push_str("No visits recorded.\n");
                return Ok(output);
            }

            output.push_str(&format!(
                "Links With Visits: {}\n\n",
                format_number(report.links_with_visits)
            ));

            output.push_str(&format!(
                "  {:<5} {:<12} {:>10} {:>10}  {:<20} {}\n",
                "Rank", "Code", "Visits", "Recent", "Last Visit", "URL"
            ));
            output.push_str(&format!(
                "  {:-<5} {:-<12} {:->10} {:->10}  {:-<20} {:-<40}\n",
                "", "", "", "", "", ""
            ));

            for (position, link) in report.links.iter().enumerate() {
                let url = link
                    .url
                    .as_deref()
                    .map(|u| truncate_display(clean_url_for_display(u), URL_DISPLAY_CHARS))
                    .unwrap_or_else(|| "-".to_string());
                output.push_str(&format!(
                    "  {:<5} {:<12} {:>10} {:>10}  {:<20} {}\n",
                    position + 1,
                    link.short_code,
                    format_number(link.total_visits as usize),
                    format_number(link.recent_visits as usize),
                    format_optional_instant(&link.last_visit),
                    url
                ));
            }
            output.push('\n');

            // Point at the richer formats
            output.push_str("Note: Recent counts the trailing 30 days before the reference instant.\n");
            output.push_str("      For full ranking data, use --format json\n");
            output.push_str("      For a bar chart, use --format plotly\n");

            Ok(output)
        }
    }
}

/// Format store statistics
///
/// The Plotly format has nothing extra to offer for plain counters and
/// falls back to the JSON payload.
pub fn format_database_stats(stats: &DatabaseStats, format: &OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Json | OutputFormat::Plotly => export_json(stats),
        OutputFormat::Console => {
            let mut output = String::new();

            // Header
            output.push_str("\n📊 Store Statistics\n");
            output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

            // Handle empty store
            if stats.total_links == 0 && stats.total_visits == 0 {
                output.push_str("Store is empty.\n");
                return Ok(output);
            }

            output.push_str(&format!(
                "Total Links: {}\n",
                format_number(stats.total_links)
            ));
            output.push_str(&format!(
                "Total Visits: {}\n",
                format_number(stats.total_visits)
            ));
            output.push_str(&format!(
                "Links With Visits: {}\n",
                format_number(stats.links_with_visits)
            ));
            output.push_str(&format!(
                "Visits With Country: {} ({:.1}%)\n",
                format_number(stats.visits_with_country),
                stats.country_coverage_percentage()
            ));
            output.push_str(&format!(
                "Earliest Visit: {}\n",
                format_optional_instant(&stats.earliest_visit)
            ));
            output.push_str(&format!(
                "Latest Visit: {}\n",
                format_optional_instant(&stats.latest_visit)
            ));

            Ok(output)
        }
    }
}

/// Format the comprehensive full report
///
/// Console output stacks the statistics, the ranking and a combined
/// report for each ranked link. The Plotly format emits one chart per
/// ranked link analysis as a JSON array.
pub fn format_full_report(report: &FullReport, format: &OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Json => export_json(report),
        OutputFormat::Plotly => {
            let mut charts: Vec<PlotlyChart> = vec![build_top_links_chart(&report.top_links)];
            for link in &report.link_reports {
                charts.push(link.activity.to_plotly_chart());
                charts.push(link.countries.to_plotly_chart());
            }
            export_json(&charts)
        }
        OutputFormat::Console => {
            let mut output = String::new();

            output.push_str("\n📊 Full Store Report\n");
            output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
            output.push_str(&format!("Generated: {}\n", report.generated_at));

            output.push_str(&format_database_stats(
                &report.statistics,
                &OutputFormat::Console,
            )?);
            output.push_str(&format_top_links(&report.top_links, &OutputFormat::Console)?);

            for link in &report.link_reports {
                output.push_str(&link_report::format_link_report(
                    link,
                    &OutputFormat::Console,
                )?);
            }

            Ok(output)
        }
    }
}

/// Bar chart of total visits for the ranked links
fn build_top_links_chart(report: &TopLinksReport) -> PlotlyChart {
    let layout = PlotlyLayout::basic("Top Links by Visits", "Short code", "Visits")
        .with_log_toggle();

    if report.links.is_empty() {
        return PlotlyChart {
            data: vec![],
            layout,
        };
    }

    let x: Vec<String> = report
        .links
        .iter()
        .map(|link| link.short_code.clone())
        .collect();
    let y: Vec<f64> = report
        .links
        .iter()
        .map(|link| link.total_visits as f64)
        .collect();

    let trace = PlotlyTrace::bar(x, y, "Visits", "#2ECC71")
        .with_hovertemplate("%{x}<br>Visits: %{y}<extra></extra>");

    PlotlyChart {
        data: vec![trace],
        layout,
    }
}
