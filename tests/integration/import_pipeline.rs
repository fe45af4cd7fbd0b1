//! Import Pipeline Integration Tests
//!
//! Feeds production-shaped CSV exports through the importer and verifies
//! the resulting store supports the whole analysis surface: import
//! statistics, store statistics, histograms, country rankings and the
//! combined reports.

use anyhow::Result;
use shortlink_analytics::analysis::{AnalysisEngine, OutputFormat, ReportFormatter};
use shortlink_analytics::processor::{CsvImporter, ImporterConfig};
use shortlink_analytics::types::{BucketUnit, ImportStats};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::fixtures::ts;

/// Write the link metadata export used by every pipeline test
fn write_links_csv(temp_dir: &TempDir) -> Result<PathBuf> {
    let csv_path = temp_dir.path().join("links.csv");
    let mut file = File::create(&csv_path)?;

    writeln!(file, "short_code,url,created_at,archived_at,title")?;
    writeln!(
        file,
        "promo,https://example.org/campaign/summer,2024-02-01T00:00:00+00:00,2024-02-03T12:00:00+00:00,Summer Campaign"
    )?;
    writeln!(
        file,
        "docs,https://example.org/docs,2024-02-10T00:00:00+00:00,,"
    )?;

    Ok(csv_path)
}

/// Write the visit log export used by every pipeline test
///
/// promo gets nine daily visits (2024-03-01 through 2024-03-09 at noon)
/// with countries cycling us, gb, de, missing; docs gets three visits in
/// one morning. One row carries an unparseable timestamp.
fn write_visits_csv(temp_dir: &TempDir) -> Result<PathBuf> {
    let csv_path = temp_dir.path().join("visits.csv");
    let mut file = File::create(&csv_path)?;

    writeln!(file, "# Shortlink visit export")?;
    writeln!(file, "short_code,visited_at,country")?;

    let countries = ["us", "gb", "de", ""];
    for i in 0..9 {
        writeln!(
            file,
            "promo,2024-03-{:02}T12:00:00+00:00,{}",
            i + 1,
            countries[i % 4]
        )?;
    }
    writeln!(file, "promo,not-a-timestamp,us")?;

    for minute in [5, 20, 40] {
        writeln!(file, "docs,2024-03-05T10:{:02}:00+00:00,us", minute)?;
    }

    Ok(csv_path)
}

/// Run both imports against a fresh store, returning the database path
/// and the per-run statistics
fn seed_store(temp_dir: &TempDir) -> Result<(String, ImportStats, ImportStats)> {
    let db_path = temp_dir.path().join("pipeline.db");
    let db_path_str = db_path.to_string_lossy().to_string();

    let mut link_importer = CsvImporter::new(ImporterConfig {
        csv_path: write_links_csv(temp_dir)?,
        database_path: db_path.clone(),
        batch_size: 100,
        progress_interval: 1000,
    })?;
    let link_stats = link_importer.import_links()?;
    drop(link_importer);

    let mut visit_importer = CsvImporter::new(ImporterConfig {
        csv_path: write_visits_csv(temp_dir)?,
        database_path: db_path,
        batch_size: 100,
        progress_interval: 1000,
    })?;
    let visit_stats = visit_importer.import_visits()?;

    Ok((db_path_str, link_stats, visit_stats))
}

#[test]
fn test_pipeline_import_statistics() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let (db_path, link_stats, visit_stats) = seed_store(&temp_dir)?;

    assert_eq!(link_stats.total_records, 2);
    assert_eq!(link_stats.imported_records, 2);
    assert_eq!(link_stats.malformed_records, 0);

    assert_eq!(visit_stats.total_records, 13);
    assert_eq!(visit_stats.imported_records, 12);
    assert_eq!(
        visit_stats.malformed_records, 1,
        "The unparseable timestamp is skipped, not fatal"
    );
    assert_eq!(visit_stats.records_without_country, 2);

    let engine = AnalysisEngine::new(&db_path)?;
    let stats = engine.database().get_database_stats()?;
    assert_eq!(stats.total_links, 2);
    assert_eq!(stats.total_visits, 12);
    assert_eq!(stats.links_with_visits, 2);
    assert_eq!(stats.visits_with_country, 10);
    assert_eq!(stats.visits_without_country, 2);
    assert_eq!(stats.earliest_visit, Some(ts("2024-03-01T12:00:00+00:00")));
    assert_eq!(stats.latest_visit, Some(ts("2024-03-09T12:00:00+00:00")));

    Ok(())
}

#[test]
fn test_pipeline_activity_histogram() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let (db_path, _, _) = seed_store(&temp_dir)?;

    let engine = AnalysisEngine::new(&db_path)?;
    let now = ts("2024-03-10T00:00:00+00:00");

    let report = engine.analyse_activity("promo", now)?;
    assert_eq!(report.total_visits, 9);
    assert_eq!(report.first_visit, Some(ts("2024-03-01T12:00:00+00:00")));
    assert_eq!(report.last_visit, Some(ts("2024-03-09T12:00:00+00:00")));

    let histogram = report
        .outcome
        .histogram()
        .expect("Nine daily visits should chart");
    assert_eq!(histogram.unit, BucketUnit::Day, "Eight-day-old link buckets by day");
    assert_eq!(histogram.origin, ts("2024-03-01T00:00:00+00:00"));
    assert_eq!(histogram.merge_factor, 1);
    assert_eq!(histogram.bucket_count(), 9);
    assert_eq!(histogram.total_count(), 9);
    assert!(
        histogram.buckets.iter().all(|b| b.count == 1),
        "One visit per calendar day"
    );

    // Three visits inside one morning collapse to a single bucket
    let docs = engine.analyse_activity("docs", now)?;
    assert_eq!(docs.total_visits, 3);
    assert!(
        !docs.outcome.is_chartable(),
        "A single bucket is below the chart minimum"
    );

    Ok(())
}

#[test]
fn test_pipeline_country_ranking() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let (db_path, _, _) = seed_store(&temp_dir)?;

    let engine = AnalysisEngine::new(&db_path)?;
    let report = engine.analyse_countries("promo")?;

    assert_eq!(report.total_visits, 9);
    assert_eq!(report.visits_with_country, 7);
    assert_eq!(report.visits_without_country, 2);
    assert_eq!(report.unique_countries, 3);

    let ranked: Vec<(&str, u64)> = report
        .top_countries
        .iter()
        .map(|c| (c.country_code.as_str(), c.count))
        .collect();
    assert_eq!(
        ranked,
        vec![("US", 3), ("GB", 2), ("DE", 2)],
        "Count descending, ties in first-seen order, codes uppercased"
    );

    Ok(())
}

#[test]
fn test_pipeline_link_report_joins_metadata() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let (db_path, _, _) = seed_store(&temp_dir)?;

    let engine = AnalysisEngine::new(&db_path)?;
    let now = ts("2024-03-10T00:00:00+00:00");

    let report = engine.analyse_link("promo", now)?;
    let link = report.link.as_ref().expect("Metadata should be joined");
    assert_eq!(link.title.as_deref(), Some("Summer Campaign"));

    let delay = report
        .archive_delay
        .as_ref()
        .expect("Snapshot lagged creation by more than the warning threshold");
    assert!(delay.contains("after creation"), "got: {}", delay);

    assert_eq!(report.activity.total_visits, 9);
    assert_eq!(report.countries.unique_countries, 3);

    Ok(())
}

#[test]
fn test_pipeline_top_links_ranking() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let (db_path, _, _) = seed_store(&temp_dir)?;

    let engine = AnalysisEngine::new(&db_path)?;
    let now = ts("2024-03-10T00:00:00+00:00");

    let report = engine.analyse_top_links(10, now)?;
    assert_eq!(report.links_with_visits, 2);
    assert_eq!(report.links.len(), 2);

    let first = &report.links[0];
    assert_eq!(first.short_code, "promo");
    assert_eq!(first.total_visits, 9);
    assert_eq!(
        first.recent_visits, 9,
        "All visits fall inside the trailing 30 days"
    );
    assert_eq!(
        first.url.as_deref(),
        Some("https://example.org/campaign/summer")
    );

    assert_eq!(report.links[1].short_code, "docs");
    assert_eq!(report.links[1].total_visits, 3);

    Ok(())
}

#[test]
fn test_pipeline_full_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let (db_path, _, _) = seed_store(&temp_dir)?;

    let engine = AnalysisEngine::new(&db_path)?;
    let now = ts("2024-03-10T00:00:00+00:00");

    let report = engine.generate_full_report(now)?;
    assert_eq!(report.generated_at, now.to_rfc3339());
    assert_eq!(report.statistics.total_visits, 12);
    assert_eq!(report.link_reports.len(), 2);

    let console = ReportFormatter::format_full_report(&report, &OutputFormat::Console)?;
    assert!(console.contains("Full Store Report"));
    assert!(console.contains("promo"));

    Ok(())
}
