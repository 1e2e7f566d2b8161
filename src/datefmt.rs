//! Relative date labels
//!
//! Turns a post or comment timestamp into "just now", "5 minutes ago", ... and falls back to a
//! localized calendar date once the timestamp is 30 days old.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

use crate::locale::Locale;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
/// Beyond this the label becomes an absolute date
const RELATIVE_LIMIT: i64 = 30 * DAY;

/// Naive layouts accepted after RFC 3339, interpreted in the viewer's offset
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unrecognized date: {0}")]
pub struct DateParseError(pub String);

/// Bucketed distance between a timestamp and now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeTime {
    JustNow,
    Minutes(i64),
    Hours(i64),
    Days(i64),
    /// Calendar date in the viewer's offset
    Absolute(NaiveDate),
}

impl RelativeTime {
    pub fn between(date: DateTime<FixedOffset>, now: DateTime<Utc>) -> Self {
        let elapsed = now.signed_duration_since(date.with_timezone(&Utc)).num_seconds();

        if elapsed < MINUTE {
            RelativeTime::JustNow
        } else if elapsed < HOUR {
            RelativeTime::Minutes(elapsed / MINUTE)
        } else if elapsed < DAY {
            RelativeTime::Hours(elapsed / HOUR)
        } else if elapsed < RELATIVE_LIMIT {
            RelativeTime::Days(elapsed / DAY)
        } else {
            RelativeTime::Absolute(date.date_naive())
        }
    }

    pub fn render(&self, locale: Locale) -> String {
        match (self, locale) {
            (RelativeTime::JustNow, Locale::En) => "just now".to_string(),
            (RelativeTime::Minutes(n), Locale::En) => format!("{} minutes ago", n),
            (RelativeTime::Hours(n), Locale::En) => format!("{} hours ago", n),
            (RelativeTime::Days(n), Locale::En) => format!("{} days ago", n),
            (RelativeTime::Absolute(d), Locale::En) => {
                format!("{}/{}/{}", d.month(), d.day(), d.year())
            }
            (RelativeTime::JustNow, Locale::ZhCn) => "刚刚".to_string(),
            (RelativeTime::Minutes(n), Locale::ZhCn) => format!("{}分钟前", n),
            (RelativeTime::Hours(n), Locale::ZhCn) => format!("{}小时前", n),
            (RelativeTime::Days(n), Locale::ZhCn) => format!("{}天前", n),
            (RelativeTime::Absolute(d), Locale::ZhCn) => {
                format!("{}/{}/{}", d.year(), d.month(), d.day())
            }
        }
    }
}

/// Label for `date` as seen at `now`
pub fn relative_label(date: DateTime<FixedOffset>, now: DateTime<Utc>, locale: Locale) -> String {
    RelativeTime::between(date, now).render(locale)
}

/// Parse the date formats the blog templates emit.
///
/// Zoned timestamps keep their own offset and are then shifted into `local`; naive date-times
/// are read as local time; a bare date is UTC midnight.
pub fn parse_date(input: &str, local: FixedOffset) -> Result<DateTime<FixedOffset>, DateParseError> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&local));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            if let Some(dt) = local.from_local_datetime(&naive).single() {
                return Ok(dt);
            }
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight).with_timezone(&local));
        }
    }

    Err(DateParseError(input.to_string()))
}

/// Parse and label in one step; unparseable input is returned unchanged
pub fn format_date(input: &str, now: DateTime<Utc>, local: FixedOffset, locale: Locale) -> String {
    match parse_date(input, local) {
        Ok(date) => relative_label(date, now, locale),
        Err(e) => {
            tracing::debug!(error = %e, "Leaving date label untouched");
            input.to_string()
        }
    }
}
