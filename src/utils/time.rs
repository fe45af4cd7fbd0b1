//! Time helpers shared across import and analysis
//!
//! Covers timestamp parsing for the CSV formats we accept, bucket-origin
//! truncation for the activity histogram, and the human time-difference
//! phrasing used by archive-delay annotations.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::errors::{AppError, AppResult};

/// Seconds per hour
pub const SECONDS_PER_HOUR: i64 = 3_600;

/// Seconds per day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Seconds per week
pub const SECONDS_PER_WEEK: i64 = 604_800;

/// Approximate seconds per month (365.25 days / 12)
pub const SECONDS_PER_MONTH: i64 = 2_628_000;

/// Seconds per non-leap year
pub const SECONDS_PER_YEAR: i64 = 31_536_000;

/// Fallback timestamp format used by SQL-style exports
const SQL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a timestamp from either RFC 3339 or "YYYY-MM-DD HH:MM:SS" (UTC)
///
/// # Examples
///
/// ```
/// use shortlink_analytics::utils::time::parse_timestamp;
///
/// let rfc = parse_timestamp("2024-03-01T10:15:00Z").unwrap();
/// let sql = parse_timestamp("2024-03-01 10:15:00").unwrap();
/// assert_eq!(rfc, sql);
/// assert!(parse_timestamp("yesterday").is_err());
/// ```
pub fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, SQL_DATETIME_FORMAT) {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    Err(AppError::InvalidData(format!(
        "Unrecognised timestamp format: '{}'",
        trimmed
    )))
}

/// Truncate an instant down to the start of its hour
pub fn truncate_to_hour(instant: DateTime<Utc>) -> DateTime<Utc> {
    let secs = instant.timestamp();
    let floored = secs - secs.rem_euclid(SECONDS_PER_HOUR);
    DateTime::<Utc>::from_timestamp(floored, 0).unwrap_or(instant)
}

/// Truncate an instant down to the start of its UTC calendar day
pub fn truncate_to_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    let secs = instant.timestamp();
    let floored = secs - secs.rem_euclid(SECONDS_PER_DAY);
    DateTime::<Utc>::from_timestamp(floored, 0).unwrap_or(instant)
}

fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Format a time difference with sensible units based on magnitude
///
/// The unit ladder widens as the difference grows; beyond fourteen months
/// everything is just "over a year".
///
/// # Examples
///
/// ```
/// use shortlink_analytics::utils::time::format_time_difference;
///
/// assert_eq!(format_time_difference(1), "1 second");
/// assert_eq!(format_time_difference(90), "90 seconds");
/// assert_eq!(format_time_difference(3_600), "60 minutes");
/// assert_eq!(format_time_difference(172_800), "2 days");
/// ```
pub fn format_time_difference(total_seconds: i64) -> String {
    if total_seconds < 120 {
        // Less than 2 minutes
        format!("{} second{}", total_seconds, plural(total_seconds))
    } else if total_seconds < 2 * SECONDS_PER_HOUR {
        let minutes = total_seconds / 60;
        format!("{} minute{}", minutes, plural(minutes))
    } else if total_seconds < SECONDS_PER_DAY {
        let hours = total_seconds / SECONDS_PER_HOUR;
        format!("{} hour{}", hours, plural(hours))
    } else if total_seconds < SECONDS_PER_WEEK {
        let days = total_seconds / SECONDS_PER_DAY;
        format!("{} day{}", days, plural(days))
    } else if total_seconds < 5 * SECONDS_PER_WEEK {
        let weeks = total_seconds / SECONDS_PER_WEEK;
        format!("{} week{}", weeks, plural(weeks))
    } else if total_seconds < SECONDS_PER_YEAR {
        let months = total_seconds / SECONDS_PER_MONTH;
        format!("{} month{}", months, plural(months))
    } else if total_seconds < 36_720_000 {
        // Less than 14 months
        "one year".to_string()
    } else {
        "over a year".to_string()
    }
}

/// Describe how far an archive snapshot landed from the link's creation
///
/// Returns None while the absolute difference stays within the threshold.
/// Past it, the note states whether the snapshot predates or postdates the
/// link, e.g. "archived 3 days after creation".
pub fn describe_archive_delay(
    created_at: DateTime<Utc>,
    archived_at: DateTime<Utc>,
    threshold_seconds: i64,
) -> Option<String> {
    let diff_seconds = (created_at - archived_at).num_seconds();
    if diff_seconds.abs() <= threshold_seconds {
        return None;
    }

    let phrase = format_time_difference(diff_seconds.abs());
    if diff_seconds > 0 {
        // Snapshot is older than the link itself
        Some(format!("archived {} before creation", phrase))
    } else {
        Some(format!("archived {} after creation", phrase))
    }
}
