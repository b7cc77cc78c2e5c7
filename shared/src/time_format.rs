use std::fmt::Write;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

const MINUTE: i64 = 60;
const HOUR_MINUTES: i64 = 60;
const DAY_HOURS: i64 = 24;
const MONTH_DAYS: i64 = 30;
const YEAR_MONTHS: i64 = 12;

/// Naive layouts the club sheet has been seen to emit; read as UTC.
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// A timestamp as received, plus the instant it denotes when it could be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Timestamp {
    pub raw: String,
    pub instant: Option<DateTime<Utc>>,
}

impl Timestamp {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let instant = parse_instant(&raw);
        Self { raw, instant }
    }

    pub fn from_epoch_millis(millis: i64) -> Self {
        Self {
            raw: millis.to_string(),
            instant: DateTime::from_timestamp_millis(millis),
        }
    }

    /// Milliseconds since the epoch; unparsable timestamps order as the epoch itself.
    pub fn sort_key(&self) -> i64 {
        self.instant
            .map(|instant| instant.timestamp_millis())
            .unwrap_or(0)
    }
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, layout) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Coarse age relative to `now`, e.g. `"3h ago"`.
///
/// Unparsable timestamps and timestamps in the future are returned as their raw text.
pub fn time_ago(timestamp: &Timestamp, now: DateTime<Utc>) -> String {
    let Some(instant) = timestamp.instant else {
        return timestamp.raw.clone();
    };
    let elapsed_secs = (now - instant).num_milliseconds().div_euclid(1000);
    if elapsed_secs < 0 {
        return timestamp.raw.clone();
    }
    format_age(elapsed_secs)
}

/// Bucket a non-negative number of elapsed seconds into the largest fitting unit.
/// Months are 30 days and years are 12 such months.
pub fn format_age(elapsed_secs: i64) -> String {
    let mut out = String::with_capacity(8);
    write_age(&mut out, elapsed_secs);
    out
}

pub fn write_age(buf: &mut String, elapsed_secs: i64) {
    buf.clear();
    let secs = elapsed_secs.max(0);
    if secs < MINUTE {
        let _ = write!(buf, "{secs}s ago");
        return;
    }
    let minutes = secs / MINUTE;
    if minutes < HOUR_MINUTES {
        let _ = write!(buf, "{minutes}m ago");
        return;
    }
    let hours = minutes / HOUR_MINUTES;
    if hours < DAY_HOURS {
        let _ = write!(buf, "{hours}h ago");
        return;
    }
    let days = hours / DAY_HOURS;
    if days < MONTH_DAYS {
        let _ = write!(buf, "{days}d ago");
        return;
    }
    let months = days / MONTH_DAYS;
    if months < YEAR_MONTHS {
        let _ = write!(buf, "{months}mo ago");
        return;
    }
    let years = months / YEAR_MONTHS;
    let _ = write!(buf, "{years}y ago");
}
