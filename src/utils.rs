/// Utility functions
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Placeholder shown for any missing display value
pub const NOT_AVAILABLE: &str = "N/A";

/// Parse a launch timestamp; unparseable input is treated as absent
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&ndt));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&ndt));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|ndt| Utc.from_utc_datetime(&ndt));
    }
    None
}

/// Calendar year (UTC) of a launch timestamp
pub fn year_of(s: &str) -> Option<i32> {
    parse_timestamp(s).map(|dt| dt.year())
}

/// Human readable launch date, e.g. "January 1, 2023, 12:00 AM"
pub fn format_launch_date(s: Option<&str>) -> String {
    s.and_then(parse_timestamp)
        .map(|dt| dt.format("%B %-d, %Y, %I:%M %p").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Pick a non-empty string or fall back to the given placeholder
pub fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}
