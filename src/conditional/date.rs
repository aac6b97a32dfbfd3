//! Date handling for condition evaluation.
//!
//! Two parsing behaviors coexist on purpose. Date-typed answer values lose
//! their time of day when an operand is resolved ([`truncate_to_day`]),
//! while a raw string coerced to a date inside a comparator keeps the full
//! instant ([`parse_instant`]). Callers relying on either behavior exist, so
//! they are kept separate rather than unified.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

/// Drop the time of day from an instant, keeping its offset.
pub(crate) fn truncate_to_day(dt: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    dt.date_naive()
        .and_time(NaiveTime::MIN)
        .and_local_timezone(*dt.offset())
        .single()
        .unwrap_or(*dt)
}

/// Parse a full date-time instant from text.
///
/// Accepts RFC 3339 with an offset, a local date-time without an offset, and
/// a bare date; offset-less forms are read as UTC. Returns `None` on any
/// malformed input, after logging; parse failures never become errors.
pub(crate) fn parse_instant(raw: &str) -> Option<DateTime<FixedOffset>> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc().fixed_offset());
    }
    log::warn!("Invalid date {raw}, comparison will evaluate to false");
    None
}
