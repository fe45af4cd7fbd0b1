//! SQLite schema for the shortlink visit store.
//!
//! Two tables, deliberately simple:
//! 1. **links**: One row per archived shortlink (metadata from the link export)
//! 2. **visits**: Append-only visit log, one row per recorded visit
//!
//! All timestamps are stored as RFC 3339 TEXT in UTC. The uniform `+00:00`
//! suffix keeps lexicographic ordering consistent with chronological
//! ordering, so MIN/MAX and range predicates work directly on the column.

use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::debug;

/// Initialise the store schema, creating tables and indexes if absent.
///
/// Safe to call on an existing database: every statement is
/// `IF NOT EXISTS`, so re-opening a populated store is a no-op.
pub fn setup_schema(connection: &Connection) -> AppResult<()> {
    debug!("Setting up database schema");

    connection.execute_batch(
        r#"
        -- ═══════════════════════════════════════════════════════════════
        -- SHORTLINK VISIT STORE - SCHEMA VERSION 1
        -- ═══════════════════════════════════════════════════════════════

        PRAGMA user_version = 1;
        PRAGMA foreign_keys = ON;

        -- ═══════════════════════════════════════════════════════════════
        -- LINKS: archived shortlink metadata
        -- ═══════════════════════════════════════════════════════════════
        CREATE TABLE IF NOT EXISTS links (
            short_code TEXT PRIMARY KEY,
            url TEXT NOT NULL,
            created_at TEXT NOT NULL,        -- RFC 3339 UTC
            archived_at TEXT,                -- RFC 3339 UTC, NULL until a snapshot exists
            title TEXT,                      -- NULL when the page had no usable title
            imported_at INTEGER DEFAULT (strftime('%s', 'now'))
        );

        -- ═══════════════════════════════════════════════════════════════
        -- VISITS: append-only visit log
        --
        -- NOTE: No FK to links(short_code). Visit logs routinely arrive
        -- before (or without) the matching link export, and analysis
        -- handles the missing-metadata case, so orphan visits are valid.
        -- ═══════════════════════════════════════════════════════════════
        CREATE TABLE IF NOT EXISTS visits (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            short_code TEXT NOT NULL,
            visited_at TEXT NOT NULL,        -- RFC 3339 UTC
            country_code TEXT                -- ISO 3166-1 alpha-2, NULL when geo lookup failed
        );

        -- Covering index for the per-shortlink scans the analysers run
        CREATE INDEX IF NOT EXISTS idx_visits_short_code
            ON visits(short_code, visited_at);

        -- Store-wide time range queries (statistics, recent-activity windows)
        CREATE INDEX IF NOT EXISTS idx_visits_visited_at
            ON visits(visited_at);

        -- Partial index: country tallies skip the NULL rows entirely
        CREATE INDEX IF NOT EXISTS idx_visits_country
            ON visits(country_code)
            WHERE country_code IS NOT NULL;
        "#,
    )?;

    debug!("Schema setup complete");
    Ok(())
}
