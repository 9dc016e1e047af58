use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

/// Parses a backend timestamp.
///
/// Accepts RFC 3339 (`2024-03-05T10:20:30Z`), naive ISO datetimes as written
/// by the seeding script (`2024-03-05T10:20:30.123456`) and plain dates.
/// Naive values are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Millisecond timestamp used for date sorting; unparseable values sort as
/// the epoch.
pub fn timestamp_millis_or_zero(raw: &str) -> i64 {
    parse_timestamp(raw).map_or(0, |dt| dt.timestamp_millis())
}

/// True when `raw` falls within the `days` days ending at `now`.
pub fn is_within_last_days(raw: &str, now: DateTime<Utc>, days: i64) -> bool {
    match parse_timestamp(raw) {
        Some(ts) => ts <= now && now - ts <= Duration::days(days),
        None => false,
    }
}

/// ISO calendar date (`YYYY-MM-DD`) of an instant.
pub fn iso_date(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d").to_string()
}
