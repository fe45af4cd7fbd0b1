use shortlink_analytics::database::Database;
use shortlink_analytics::processor::{CsvImporter, ImporterConfig};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Generate a visits CSV with a known number of records
/// If `with_comments` is true, adds comment header lines like production exports
fn generate_visits_csv(record_count: usize, temp_dir: &TempDir, with_comments: bool) -> PathBuf {
    let csv_path = temp_dir.path().join("visits.csv");
    let mut file = File::create(&csv_path).expect("Failed to create test CSV");

    // Write comment headers if requested (matching production export format)
    if with_comments {
        writeln!(file, "# Shortlink visit export").expect("Failed to write comment");
        writeln!(file, "# Generated: 2024-06-01T00:00:00Z").expect("Failed to write comment");
        writeln!(file, "# Fields: short_code,visited_at,country").expect("Failed to write comment");
    }

    writeln!(file, "short_code,visited_at,country").expect("Failed to write header");

    // Write test records (every 5th row has no country code)
    for i in 0..record_count {
        let country = if i % 5 == 0 { "" } else { "gb" };
        writeln!(
            file,
            "code{:03},2024-03-{:02}T{:02}:30:00+00:00,{}",
            i % 7,
            1 + (i % 28),
            i % 24,
            country
        )
        .expect("Failed to write record");
    }

    csv_path
}

fn importer_config(csv_path: PathBuf, temp_dir: &TempDir) -> ImporterConfig {
    ImporterConfig {
        csv_path,
        database_path: temp_dir.path().join("test.db"),
        batch_size: 10,
        progress_interval: 10,
    }
}

#[test]
fn test_visit_import_small_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = generate_visits_csv(100, &temp_dir, false);

    let mut importer =
        CsvImporter::new(importer_config(csv_path, &temp_dir)).expect("Failed to create importer");
    let stats = importer.import_visits().expect("Failed to import visits");

    assert_eq!(stats.total_records, 100, "Should read all records");
    assert_eq!(stats.imported_records, 100, "Should import all records");
    assert_eq!(stats.malformed_records, 0, "No rows should be malformed");
    assert_eq!(
        stats.records_without_country, 20,
        "Every 5th row carries no country code"
    );
    assert_eq!(
        stats.batches_processed, 10,
        "100 records at batch size 10 is 10 batches"
    );
    assert!(
        (stats.country_coverage_rate() - 80.0).abs() < f64::EPSILON,
        "Coverage should be 80%"
    );
}

#[test]
fn test_visit_import_with_comment_headers() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = generate_visits_csv(100, &temp_dir, true);

    let mut importer =
        CsvImporter::new(importer_config(csv_path, &temp_dir)).expect("Failed to create importer");
    let stats = importer.import_visits().expect("Failed to import visits");

    assert_eq!(
        stats.total_records, 100,
        "Comment lines should not count as records"
    );
    assert_eq!(stats.imported_records, 100, "Should import all records");
}

#[test]
fn test_visit_import_empty_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = temp_dir.path().join("empty.csv");
    let mut file = File::create(&csv_path).expect("Failed to create test CSV");
    writeln!(file, "short_code,visited_at,country").expect("Failed to write header");

    let mut importer =
        CsvImporter::new(importer_config(csv_path, &temp_dir)).expect("Failed to create importer");
    let stats = importer.import_visits().expect("Failed to import visits");

    assert_eq!(stats.total_records, 0, "Should handle empty CSV correctly");
    assert_eq!(stats.batches_processed, 0, "No batches for an empty file");
}

#[test]
fn test_visit_import_counts_malformed_rows() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = temp_dir.path().join("visits.csv");
    let mut file = File::create(&csv_path).expect("Failed to create test CSV");

    writeln!(file, "short_code,visited_at,country").expect("Failed to write header");
    writeln!(file, "promo,2024-03-01T10:00:00+00:00,US").expect("Failed to write record");
    // Unparseable timestamp
    writeln!(file, "promo,not-a-timestamp,US").expect("Failed to write record");
    // Blank short code
    writeln!(file, ",2024-03-02T10:00:00+00:00,GB").expect("Failed to write record");
    // Missing geo lookup
    writeln!(file, "promo,2024-03-03T08:15:00+00:00,").expect("Failed to write record");
    // Legacy SQL timestamp format, lowercase country
    writeln!(file, "promo,2024-03-04 09:00:00,de").expect("Failed to write record");

    let db_path = temp_dir.path().join("test.db");
    let mut importer = CsvImporter::new(ImporterConfig {
        csv_path,
        database_path: db_path.clone(),
        batch_size: 10,
        progress_interval: 10,
    })
    .expect("Failed to create importer");
    let stats = importer.import_visits().expect("Failed to import visits");

    assert_eq!(stats.total_records, 5, "Should read all rows");
    assert_eq!(stats.imported_records, 3, "Two rows fail validation");
    assert_eq!(stats.malformed_records, 2, "Bad timestamp and blank code");
    assert_eq!(stats.records_without_country, 1, "One row had no country");
    assert!((stats.error_rate() - 40.0).abs() < f64::EPSILON);

    // Reopen the store and verify what landed
    drop(importer);
    let db = Database::new(&db_path.to_string_lossy()).expect("Failed to reopen database");
    let visits = db
        .get_visits_for_code("promo")
        .expect("Failed to read visits");
    assert_eq!(visits.len(), 3, "Only validated rows should be stored");
    assert_eq!(
        visits[0].country_code.as_deref(),
        Some("US"),
        "Visits come back oldest first"
    );
    assert_eq!(visits[1].country_code, None);
    assert_eq!(
        visits[2].country_code.as_deref(),
        Some("DE"),
        "Country codes are normalised to uppercase"
    );
}

#[test]
fn test_visit_import_aborts_on_unreadable_row() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = temp_dir.path().join("visits.csv");
    let mut file = File::create(&csv_path).expect("Failed to create test CSV");

    writeln!(file, "short_code,visited_at,country").expect("Failed to write header");
    writeln!(file, "promo,2024-03-01T10:00:00+00:00,US").expect("Failed to write record");
    // Structurally broken row: field missing entirely
    writeln!(file, "promo,2024-03-02T10:00:00+00:00").expect("Failed to write record");

    let mut importer =
        CsvImporter::new(importer_config(csv_path, &temp_dir)).expect("Failed to create importer");
    let result = importer.import_visits();

    assert!(
        result.is_err(),
        "A row the CSV reader cannot parse should abort the run"
    );
}

#[test]
fn test_visit_import_batch_counting() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = generate_visits_csv(25, &temp_dir, false);

    let mut importer =
        CsvImporter::new(importer_config(csv_path, &temp_dir)).expect("Failed to create importer");
    let stats = importer.import_visits().expect("Failed to import visits");

    assert_eq!(stats.total_records, 25);
    assert_eq!(
        stats.batches_processed, 3,
        "Two full batches plus the final partial batch"
    );
}

#[test]
fn test_link_import_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = temp_dir.path().join("links.csv");
    let mut file = File::create(&csv_path).expect("Failed to create test CSV");

    writeln!(file, "short_code,url,created_at,archived_at,title").expect("Failed to write header");
    writeln!(
        file,
        "promo,https://example.org/campaign,2024-02-01T00:00:00+00:00,2024-02-03T12:00:00+00:00,Summer Campaign"
    )
    .expect("Failed to write record");
    // Snapshot never completed and the page had no title
    writeln!(
        file,
        "docs,https://example.org/docs,2024-02-10T08:30:00+00:00,,"
    )
    .expect("Failed to write record");

    let db_path = temp_dir.path().join("test.db");
    let mut importer = CsvImporter::new(ImporterConfig {
        csv_path,
        database_path: db_path.clone(),
        batch_size: 10,
        progress_interval: 10,
    })
    .expect("Failed to create importer");
    let stats = importer.import_links().expect("Failed to import links");

    assert_eq!(stats.total_records, 2);
    assert_eq!(stats.imported_records, 2);
    assert_eq!(stats.malformed_records, 0);
    assert_eq!(
        stats.records_without_country, 0,
        "Link imports never touch the country counter"
    );

    drop(importer);
    let db = Database::new(&db_path.to_string_lossy()).expect("Failed to reopen database");

    let promo = db
        .get_link("promo")
        .expect("Failed to read link")
        .expect("promo should be stored");
    assert_eq!(promo.url, "https://example.org/campaign");
    assert_eq!(promo.title.as_deref(), Some("Summer Campaign"));
    assert!(promo.archived_at.is_some(), "Snapshot timestamp survives");

    let docs = db
        .get_link("docs")
        .expect("Failed to read link")
        .expect("docs should be stored");
    assert!(docs.archived_at.is_none(), "Empty column becomes None");
    assert!(docs.title.is_none(), "Empty column becomes None");
}

#[test]
fn test_link_import_counts_malformed_rows() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = temp_dir.path().join("links.csv");
    let mut file = File::create(&csv_path).expect("Failed to create test CSV");

    writeln!(file, "short_code,url,created_at,archived_at,title").expect("Failed to write header");
    writeln!(
        file,
        "promo,https://example.org/campaign,2024-02-01T00:00:00+00:00,,"
    )
    .expect("Failed to write record");
    // Blank URL
    writeln!(file, "broken,,2024-02-01T00:00:00+00:00,,").expect("Failed to write record");
    // Unparseable creation timestamp
    writeln!(file, "worse,https://example.org/x,never,,").expect("Failed to write record");

    let mut importer =
        CsvImporter::new(importer_config(csv_path, &temp_dir)).expect("Failed to create importer");
    let stats = importer.import_links().expect("Failed to import links");

    assert_eq!(stats.total_records, 3);
    assert_eq!(stats.imported_records, 1);
    assert_eq!(stats.malformed_records, 2);
}

#[test]
fn test_importer_rejects_zero_batch_size() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = generate_visits_csv(1, &temp_dir, false);

    let result = CsvImporter::new(ImporterConfig {
        csv_path,
        database_path: temp_dir.path().join("test.db"),
        batch_size: 0,
        progress_interval: 10,
    });
    assert!(result.is_err(), "Zero batch size should be rejected");
}

#[test]
fn test_importer_rejects_zero_progress_interval() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let csv_path = generate_visits_csv(1, &temp_dir, false);

    let result = CsvImporter::new(ImporterConfig {
        csv_path,
        database_path: temp_dir.path().join("test.db"),
        batch_size: 10,
        progress_interval: 0,
    });
    assert!(result.is_err(), "Zero progress interval should be rejected");
}
