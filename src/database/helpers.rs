//! Shared row-mapping helpers for the database module.
//!
//! Timestamps live in SQLite as RFC 3339 TEXT, so every read path funnels
//! through the converters here to keep parse-failure handling in one place.

use crate::types::{LinkDetails, VisitRecord};
use chrono::{DateTime, Utc};
use rusqlite::Row;

/// Read an RFC 3339 TEXT column as a UTC timestamp.
///
/// Parse failures surface as `FromSqlConversionFailure` so they propagate
/// through `query_row`/`query_map` like any other column type mismatch.
pub fn timestamp_column(row: &Row, index: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(index)?;
    parse_stored_timestamp(&raw, index)
}

/// Read a nullable RFC 3339 TEXT column as an optional UTC timestamp.
pub fn optional_timestamp_column(
    row: &Row,
    index: usize,
) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(index)?;
    match raw {
        Some(value) => parse_stored_timestamp(&value, index).map(Some),
        None => Ok(None),
    }
}

fn parse_stored_timestamp(raw: &str, index: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                index,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

/// Construct a VisitRecord from a database row.
///
/// Standard row mapping for visits table queries.
/// Column order it expects:
/// 0. visited_at (TEXT, RFC 3339)
/// 1. country_code (TEXT, optional)
pub fn visit_record_from_row(row: &Row) -> rusqlite::Result<VisitRecord> {
    Ok(VisitRecord {
        occurred_at: timestamp_column(row, 0)?,
        country_code: row.get(1)?,
    })
}

/// Construct a LinkDetails from a database row.
///
/// Standard row mapping for links table queries.
/// Column order it expects:
/// 0. short_code (TEXT)
/// 1. url (TEXT)
/// 2. created_at (TEXT, RFC 3339)
/// 3. archived_at (TEXT, RFC 3339, optional)
/// 4. title (TEXT, optional)
pub fn link_details_from_row(row: &Row) -> rusqlite::Result<LinkDetails> {
    Ok(LinkDetails {
        short_code: row.get(0)?,
        url: row.get(1)?,
        created_at: timestamp_column(row, 2)?,
        archived_at: optional_timestamp_column(row, 3)?,
        title: row.get(4)?,
    })
}
