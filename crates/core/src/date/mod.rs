//! Date/time formatting wrappers and Unix timestamp helpers.
//!
//! Dates render in the local timezone unless a `_in` variant is given an
//! explicit [`Zone`]. Nullish inputs produce an empty string, a nullish or
//! zero Unix timestamp produces [`NOT_AVAILABLE`].

pub mod pattern;

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::CoreError;
use crate::time::ONE_SECOND_IN_MS;
use crate::types::UnixTimestamp;

pub use pattern::{DatePattern, Zone};

// ---------------------------------------------------------------------------
// Patterns and placeholders
// ---------------------------------------------------------------------------

pub const TIME_PATTERN: &str = "HH:mm:ss";
pub const DATE_PATTERN: &str = "yyyy-MM-dd";
pub const DATE_TIME_PATTERN: &str = "yyyy-MM-dd HH:mm:ss";
/// Date-time without characters that are awkward in filenames.
pub const FILENAME_DATE_TIME_PATTERN: &str = "yyyy-MM-dd_HH-mm-ss";

/// Rendered for a missing (or zero) Unix timestamp.
pub const NOT_AVAILABLE: &str = "N/A";

/// Rendered when a Unix timestamp cannot be formatted.
pub const INVALID_DATE: &str = "Invalid date";

static TIME: LazyLock<DatePattern> =
    LazyLock::new(|| DatePattern::parse(TIME_PATTERN).expect("valid date pattern"));
static DATE: LazyLock<DatePattern> =
    LazyLock::new(|| DatePattern::parse(DATE_PATTERN).expect("valid date pattern"));
static DATE_TIME: LazyLock<DatePattern> =
    LazyLock::new(|| DatePattern::parse(DATE_TIME_PATTERN).expect("valid date pattern"));
static FILENAME_DATE_TIME: LazyLock<DatePattern> = LazyLock::new(|| {
    DatePattern::parse(FILENAME_DATE_TIME_PATTERN).expect("valid date pattern")
});

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Anything that can denote an instant: a zoned date-time, an ISO-8601
/// string, or milliseconds since the epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    DateTime(DateTime<FixedOffset>),
    Iso(String),
    EpochMillis(i64),
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput {
    fn from(value: DateTime<Tz>) -> Self {
        Self::DateTime(value.fixed_offset())
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        Self::Iso(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        Self::Iso(value)
    }
}

impl From<i64> for DateInput {
    fn from(value: i64) -> Self {
        Self::EpochMillis(value)
    }
}

impl DateInput {
    /// Resolve to a UTC instant.
    ///
    /// ISO strings with an offset are exact, a bare date means midnight UTC,
    /// and a date-time without an offset is read as local time.
    pub fn to_instant(&self) -> Result<DateTime<Utc>, CoreError> {
        match self {
            Self::DateTime(dt) => Ok(dt.with_timezone(&Utc)),
            Self::EpochMillis(ms) => DateTime::from_timestamp_millis(*ms).ok_or_else(|| {
                CoreError::InvalidDate(format!("{ms} ms is outside the representable range"))
            }),
            Self::Iso(s) => parse_iso(s),
        }
    }
}

fn parse_iso(s: &str) -> Result<DateTime<Utc>, CoreError> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
    {
        return Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| CoreError::InvalidDate(format!("'{s}' does not exist in local time")));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }

    Err(CoreError::InvalidDate(format!("'{s}' is not an ISO-8601 date")))
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Format a date with a calendar-style pattern in the given zone.
pub fn format_date_in(
    value: impl Into<DateInput>,
    pattern: &str,
    zone: Zone,
) -> Result<String, CoreError> {
    let pattern = DatePattern::parse(pattern)?;
    Ok(pattern.render(value.into().to_instant()?, zone))
}

/// Format a date with a calendar-style pattern in local time.
pub fn format_date(value: impl Into<DateInput>, pattern: &str) -> Result<String, CoreError> {
    format_date_in(value, pattern, Zone::Local)
}

fn format_optional<T: Into<DateInput>>(
    value: Option<T>,
    pattern: &DatePattern,
) -> Result<String, CoreError> {
    match value {
        None => Ok(String::new()),
        Some(value) => Ok(pattern.render(value.into().to_instant()?, Zone::Local)),
    }
}

/// `HH:mm:ss`, or `""` for no value.
pub fn date_as_hhmmss<T: Into<DateInput>>(value: Option<T>) -> Result<String, CoreError> {
    format_optional(value, &TIME)
}

/// `yyyy-MM-dd`, or `""` for no value.
pub fn date_as_yyyymmdd<T: Into<DateInput>>(value: Option<T>) -> Result<String, CoreError> {
    format_optional(value, &DATE)
}

/// `yyyy-MM-dd HH:mm:ss`, or `""` for no value.
pub fn date_as_yyyymmdd_hhmmss<T: Into<DateInput>>(
    value: Option<T>,
) -> Result<String, CoreError> {
    format_optional(value, &DATE_TIME)
}

/// Format the current instant with an arbitrary pattern.
pub fn format_now_in(pattern: &str, zone: Zone) -> Result<String, CoreError> {
    format_date_in(Utc::now(), pattern, zone)
}

pub fn now_as_time() -> String {
    TIME.render(Utc::now(), Zone::Local)
}

pub fn now_as_date() -> String {
    DATE.render(Utc::now(), Zone::Local)
}

pub fn now_as_date_time() -> String {
    DATE_TIME.render(Utc::now(), Zone::Local)
}

pub fn now_as_date_time_for_filename() -> String {
    FILENAME_DATE_TIME.render(Utc::now(), Zone::Local)
}

// ---------------------------------------------------------------------------
// Unix timestamps
// ---------------------------------------------------------------------------

/// Format a Unix timestamp (seconds) in local time.
///
/// See [`format_unix_timestamp_in`].
pub fn format_unix_timestamp(timestamp: Option<UnixTimestamp>, pattern: Option<&str>) -> String {
    format_unix_timestamp_in(timestamp, pattern, Zone::Local)
}

/// Format a Unix timestamp (seconds) with `pattern`, defaulting to
/// [`DATE_TIME_PATTERN`].
///
/// A missing or zero timestamp yields [`NOT_AVAILABLE`]. Formatting failures
/// are not propagated: they yield [`INVALID_DATE`].
pub fn format_unix_timestamp_in(
    timestamp: Option<UnixTimestamp>,
    pattern: Option<&str>,
    zone: Zone,
) -> String {
    let timestamp = match timestamp {
        None | Some(0) => return NOT_AVAILABLE.to_string(),
        Some(ts) => ts,
    };

    let formatted = timestamp
        .checked_mul(ONE_SECOND_IN_MS as i64)
        .ok_or_else(|| CoreError::InvalidDate(format!("{timestamp} s overflows milliseconds")))
        .and_then(|millis| {
            format_date_in(millis, pattern.unwrap_or(DATE_TIME_PATTERN), zone)
        });

    match formatted {
        Ok(s) => s,
        Err(e) => {
            tracing::debug!(timestamp, error = %e, "Unix timestamp could not be formatted");
            INVALID_DATE.to_string()
        }
    }
}

/// Wall-clock seconds since the epoch.
pub fn get_current_unix_timestamp() -> UnixTimestamp {
    Utc::now().timestamp()
}

/// True when `timestamp` lies strictly before `now`.
pub fn is_expired_timestamp_at(timestamp: UnixTimestamp, now: UnixTimestamp) -> bool {
    timestamp < now
}

/// True when `timestamp` lies at or before `now`.
pub fn is_active_timestamp_at(timestamp: UnixTimestamp, now: UnixTimestamp) -> bool {
    timestamp <= now
}

pub fn is_expired_timestamp(timestamp: UnixTimestamp) -> bool {
    is_expired_timestamp_at(timestamp, get_current_unix_timestamp())
}

pub fn is_active_timestamp(timestamp: UnixTimestamp) -> bool {
    is_active_timestamp_at(timestamp, get_current_unix_timestamp())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
