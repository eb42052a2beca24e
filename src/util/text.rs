// src/util/text.rs
use chrono::{DateTime, Utc};

/// Lowercase and trim, the form both sides of every text comparison take.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Short US-style date, e.g. `Jan 14, 2026`.
///
/// # Examples
///
/// ```
/// use biteboard::util::text::format_date;
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2026, 1, 14, 18, 15, 0).unwrap();
/// assert_eq!(format_date(&ts), "Jan 14, 2026");
/// ```
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y").to_string()
}

/// `1 result`, `3 results`.
pub fn results_summary(count: usize) -> String {
    format!("{count} result{}", if count == 1 { "" } else { "s" })
}
