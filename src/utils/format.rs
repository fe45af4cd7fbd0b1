//! Display formatting helpers
//!
//! Compact hit counts, URL cleaning and title truncation used by the
//! report formatters.

/// Default width limit for truncated display text
pub const DEFAULT_TRUNCATE_CHARS: usize = 50;

/// Word-boundary cuts are only taken past this fraction of the limit
const WORD_BOUNDARY_FRACTION: f64 = 0.7;

/// Format a hit count with k/m/b/t abbreviations, max 4 characters
///
/// Single-digit magnitudes keep one decimal ("1.2k"), larger ones drop it
/// ("42k").
///
/// # Examples
///
/// ```
/// use shortlink_analytics::utils::format::format_hit_count;
///
/// assert_eq!(format_hit_count(999), "999");
/// assert_eq!(format_hit_count(1_234), "1.2k");
/// assert_eq!(format_hit_count(42_000), "42k");
/// assert_eq!(format_hit_count(2_500_000), "2.5m");
/// ```
pub fn format_hit_count(count: u64) -> String {
    if count < 1_000 {
        format!("{}", count)
    } else if count < 10_000 {
        format!("{:.1}k", count as f64 / 1_000.0)
    } else if count < 1_000_000 {
        format!("{}k", count / 1_000)
    } else if count < 10_000_000 {
        format!("{:.1}m", count as f64 / 1_000_000.0)
    } else if count < 1_000_000_000 {
        format!("{}m", count / 1_000_000)
    } else if count < 10_000_000_000 {
        format!("{:.1}b", count as f64 / 1_000_000_000.0)
    } else if count < 1_000_000_000_000 {
        format!("{}b", count / 1_000_000_000)
    } else if count < 10_000_000_000_000 {
        format!("{:.1}t", count as f64 / 1_000_000_000_000.0)
    } else {
        format!("{}t", count / 1_000_000_000_000)
    }
}

/// Remove protocol and www prefixes for cleaner display
///
/// # Examples
///
/// ```
/// use shortlink_analytics::utils::format::clean_url_for_display;
///
/// assert_eq!(clean_url_for_display("https://www.example.com/a"), "example.com/a");
/// assert_eq!(clean_url_for_display("http://example.com"), "example.com");
/// assert_eq!(clean_url_for_display("ftp://host"), "ftp://host");
/// ```
pub fn clean_url_for_display(url: &str) -> &str {
    let stripped = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    stripped.strip_prefix("www.").unwrap_or(stripped)
}

/// Truncate display text intelligently with ellipses
///
/// Decodes the URL-escape artefacts that leak into stored titles and text
/// fragments (%20, %22, %27) before measuring. Cuts at the last word
/// boundary when one sits close enough to the limit, otherwise cuts hard
/// at `max_chars`.
pub fn truncate_display(text: &str, max_chars: usize) -> String {
    if text.is_empty() {
        return String::new();
    }

    let cleaned = text.replace("%20", " ").replace("%22", "\"").replace("%27", "'");
    if cleaned.chars().count() <= max_chars {
        return cleaned;
    }

    let truncated: String = cleaned.chars().take(max_chars).collect();
    let last_space = truncated
        .chars()
        .enumerate()
        .filter(|(_, c)| *c == ' ')
        .map(|(i, _)| i)
        .last();

    if let Some(space_index) = last_space {
        if space_index as f64 > max_chars as f64 * WORD_BOUNDARY_FRACTION {
            let cut: String = truncated.chars().take(space_index).collect();
            return format!("{}...", cut);
        }
    }
    format!("{}...", truncated)
}
