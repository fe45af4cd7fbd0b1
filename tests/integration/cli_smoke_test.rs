//! CLI Smoke Test
//!
//! This integration test verifies that all CLI analysis commands work
//! correctly against a seeded store. It creates a populated test database
//! and runs each analysis through every output format to ensure they
//! produce valid output without errors.

use chrono::{DateTime, Utc};
use shortlink_analytics::analysis::{AnalysisEngine, HistogramOutcome, OutputFormat, ReportFormatter};
use shortlink_analytics::database::Database;

use crate::common::create_unique_test_db_path;
use crate::common::fixtures::{archived_link, link, ts, visit};

/// Reference instant shared by every smoke test
fn reference_now() -> DateTime<Utc> {
    ts("2024-03-12T00:00:00+00:00")
}

/// Create a fully populated store for CLI smoke testing
///
/// promo: archived link with ten daily visits (two-thirds geo-located).
/// docs: bare link with one visit. ghost: visits without stored metadata.
fn create_populated_test_db() -> String {
    let db_path = create_unique_test_db_path("cli_smoke");
    let mut db = Database::new(&db_path).unwrap();

    db.insert_links_batch(&[
        archived_link(
            "promo",
            "https://example.org/campaign",
            "2024-02-01T00:00:00+00:00",
            "2024-02-02T06:00:00+00:00",
            "Campaign Landing Page",
        ),
        link("docs", "https://example.org/docs", "2024-02-10T00:00:00+00:00"),
    ])
    .unwrap();

    let mut visits = Vec::new();
    for day in 1..=10 {
        let country = match day % 3 {
            0 => Some("US"),
            1 => Some("GB"),
            _ => None,
        };
        visits.push(visit(
            "promo",
            &format!("2024-03-{:02}T12:00:00+00:00", day),
            country,
        ));
    }
    visits.push(visit("docs", "2024-03-05T09:00:00+00:00", Some("DE")));
    visits.push(visit("ghost", "2024-03-06T09:00:00+00:00", Some("FR")));
    db.insert_visits_batch(&visits).unwrap();

    db_path
}

#[test]
fn test_cli_activity_analysis() {
    let db_path = create_populated_test_db();

    let engine = AnalysisEngine::new(&db_path).unwrap();
    let analysis = engine.analyse_activity("promo", reference_now());
    assert!(analysis.is_ok(), "Activity analysis should not crash");
    let analysis = analysis.unwrap();
    assert!(
        analysis.outcome.is_chartable(),
        "Ten daily visits should produce a histogram"
    );

    let console_output = ReportFormatter::format_visit_activity(&analysis, &OutputFormat::Console);
    assert!(console_output.is_ok(), "Console formatting should not crash");

    let json_output = ReportFormatter::format_visit_activity(&analysis, &OutputFormat::Json);
    assert!(json_output.is_ok(), "JSON formatting should not crash");
    let json_output = json_output.unwrap();
    assert!(
        json_output.contains("\"status\""),
        "JSON output should carry the outcome tag"
    );
    assert!(json_output.contains("histogram"), "JSON output should be valid");
}

#[test]
fn test_cli_countries_analysis() {
    let db_path = create_populated_test_db();

    let engine = AnalysisEngine::new(&db_path).unwrap();
    let analysis = engine.analyse_countries("promo");
    assert!(analysis.is_ok(), "Country analysis should not crash");
    let analysis = analysis.unwrap();

    let console_output =
        ReportFormatter::format_country_breakdown(&analysis, &OutputFormat::Console);
    assert!(console_output.is_ok(), "Console formatting should not crash");

    let json_output = ReportFormatter::format_country_breakdown(&analysis, &OutputFormat::Json);
    assert!(json_output.is_ok(), "JSON formatting should not crash");
    let json_output = json_output.unwrap();
    assert!(
        json_output.contains("top_countries"),
        "JSON output should be valid"
    );
}

#[test]
fn test_cli_link_report() {
    let db_path = create_populated_test_db();

    let engine = AnalysisEngine::new(&db_path).unwrap();
    let report = engine.analyse_link("promo", reference_now()).unwrap();
    assert!(report.link.is_some(), "Stored metadata should be joined");
    assert!(
        report.archive_delay.is_some(),
        "Snapshot landed more than a day after creation"
    );

    let console_output = ReportFormatter::format_link_report(&report, &OutputFormat::Console);
    assert!(console_output.is_ok(), "Console formatting should not crash");
    let console_output = console_output.unwrap();
    assert!(console_output.contains("Campaign Landing Page"));

    let json_output = ReportFormatter::format_link_report(&report, &OutputFormat::Json);
    assert!(json_output.is_ok(), "JSON formatting should not crash");
    let json_output = json_output.unwrap();
    assert!(
        json_output.contains("archive_delay"),
        "JSON output should be valid"
    );
}

#[test]
fn test_cli_link_report_visits_only() {
    let db_path = create_populated_test_db();

    let engine = AnalysisEngine::new(&db_path).unwrap();
    let report = engine.analyse_link("ghost", reference_now()).unwrap();
    assert!(report.link.is_none(), "ghost has no stored metadata");
    assert_eq!(report.activity.total_visits, 1);

    let console_output =
        ReportFormatter::format_link_report(&report, &OutputFormat::Console).unwrap();
    assert!(
        console_output.contains("visits only"),
        "Console output should flag the missing metadata"
    );
}

#[test]
fn test_cli_top_links() {
    let db_path = create_populated_test_db();

    let engine = AnalysisEngine::new(&db_path).unwrap();
    let report = engine.analyse_top_links(10, reference_now()).unwrap();
    assert_eq!(report.links_with_visits, 3);
    assert_eq!(report.links[0].short_code, "promo");

    let console_output = ReportFormatter::format_top_links(&report, &OutputFormat::Console);
    assert!(console_output.is_ok(), "Console formatting should not crash");

    let json_output = ReportFormatter::format_top_links(&report, &OutputFormat::Json);
    assert!(json_output.is_ok(), "JSON formatting should not crash");
    let json_output = json_output.unwrap();
    assert!(
        json_output.contains("links_with_visits"),
        "JSON output should be valid"
    );
}

#[test]
fn test_cli_stats_report() {
    let db_path = create_populated_test_db();

    let engine = AnalysisEngine::new(&db_path).unwrap();
    let stats = engine.database().get_database_stats().unwrap();
    assert_eq!(stats.total_links, 2);
    assert_eq!(stats.total_visits, 12);
    assert_eq!(stats.links_with_visits, 3);

    let console_output = ReportFormatter::format_database_stats(&stats, &OutputFormat::Console);
    assert!(console_output.is_ok(), "Console formatting should not crash");

    let json_output = ReportFormatter::format_database_stats(&stats, &OutputFormat::Json);
    assert!(json_output.is_ok(), "JSON formatting should not crash");
    let json_output = json_output.unwrap();
    assert!(
        json_output.contains("total_links"),
        "JSON output should be valid"
    );
}

#[test]
fn test_cli_full_report() {
    let db_path = create_populated_test_db();

    let engine = AnalysisEngine::new(&db_path).unwrap();
    let report = engine.generate_full_report(reference_now());
    assert!(report.is_ok(), "Full report generation should not crash");
    let report = report.unwrap();

    let console_output = ReportFormatter::format_full_report(&report, &OutputFormat::Console);
    assert!(console_output.is_ok(), "Console formatting should not crash");

    let json_output = ReportFormatter::format_full_report(&report, &OutputFormat::Json);
    assert!(json_output.is_ok(), "JSON formatting should not crash");
    let json_output = json_output.unwrap();
    assert!(
        json_output.contains("generated_at"),
        "JSON output should be valid"
    );

    let plotly_output = ReportFormatter::format_full_report(&report, &OutputFormat::Plotly);
    assert!(plotly_output.is_ok(), "Plotly formatting should not crash");
}

#[test]
fn test_cli_plotly_output() {
    let db_path = create_populated_test_db();

    let engine = AnalysisEngine::new(&db_path).unwrap();

    let activity = engine.analyse_activity("promo", reference_now()).unwrap();
    let chart = ReportFormatter::format_visit_activity(&activity, &OutputFormat::Plotly).unwrap();
    assert!(chart.contains("\"data\""), "Plotly payload should carry traces");
    assert!(chart.contains("\"layout\""), "Plotly payload should carry a layout");

    let countries = engine.analyse_countries("promo").unwrap();
    let donut =
        ReportFormatter::format_country_breakdown(&countries, &OutputFormat::Plotly).unwrap();
    assert!(donut.contains("pie"), "Country chart renders as a pie");
}

#[test]
fn test_cli_unknown_code_yields_no_data() {
    let db_path = create_populated_test_db();

    let engine = AnalysisEngine::new(&db_path).unwrap();
    let activity = engine.analyse_activity("missing", reference_now()).unwrap();
    assert_eq!(activity.outcome, HistogramOutcome::NoData);
    assert_eq!(activity.total_visits, 0);

    let countries = engine.analyse_countries("missing").unwrap();
    assert_eq!(countries.total_visits, 0);
    assert!(countries.top_countries.is_empty());
}

#[test]
fn test_cli_error_handling_nonexistent_db() {
    // CLI commands should surface missing stores instead of creating
    // them somewhere unwritable
    let result = AnalysisEngine::new("/nonexistent/path/to/store.db");
    assert!(
        result.is_err(),
        "Should fail gracefully for nonexistent database"
    );
}

#[test]
fn test_cli_error_handling_empty_db() {
    // Every analysis should succeed against a brand-new empty store
    let db_path = create_unique_test_db_path("cli_empty");
    let _db = Database::new(&db_path).unwrap();

    let engine = AnalysisEngine::new(&db_path).unwrap();
    let now = reference_now();

    assert!(
        engine.analyse_activity("anything", now).is_ok(),
        "Activity analysis should handle empty store"
    );
    assert!(
        engine.analyse_countries("anything").is_ok(),
        "Country analysis should handle empty store"
    );
    assert!(
        engine.analyse_top_links(10, now).is_ok(),
        "Top links should handle empty store"
    );

    let report = engine.generate_full_report(now).unwrap();
    assert_eq!(report.statistics.total_visits, 0);
    assert!(report.link_reports.is_empty());
}
