//! Formatting helpers shared by the report formatters.

use crate::errors::AppResult;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Insert thousand separators for console display.
///
/// ```
/// # use shortlink_analytics::analysis::reports::utils::format_number;
/// assert_eq!(format_number(9876543), "9,876,543");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format an optional instant for console tables, "-" when absent
pub fn format_optional_instant(instant: &Option<DateTime<Utc>>) -> String {
    match instant {
        Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "-".to_string(),
    }
}

/// Serialise a report payload as pretty-printed JSON
pub fn export_json<T: Serialize>(data: &T) -> AppResult<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| crate::errors::AppError::Config(format!("JSON export failed: {}", e)))
}
