//! Time handling for gridded FWI data.
//!
//! Two concerns live here:
//! - decoding CF-convention time coordinates (`"days since 2015-01-01"`)
//! - normalizing user date queries to the same granularity as the dataset's
//!   time encoding, so that a query and a coordinate that denote the same
//!   instant compare equal.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Granularity of a dataset's time encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeResolution {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl TimeResolution {
    /// Parse a CF unit word ("days", "hour", "min", "s", ...).
    pub fn from_unit(unit: &str) -> Option<Self> {
        match unit.trim().to_ascii_lowercase().as_str() {
            "days" | "day" | "d" => Some(TimeResolution::Days),
            "hours" | "hour" | "hrs" | "hr" | "h" => Some(TimeResolution::Hours),
            "minutes" | "minute" | "mins" | "min" => Some(TimeResolution::Minutes),
            "seconds" | "second" | "secs" | "sec" | "s" => Some(TimeResolution::Seconds),
            _ => None,
        }
    }

    /// Length of one unit in seconds.
    pub fn seconds(&self) -> i64 {
        match self {
            TimeResolution::Days => 86_400,
            TimeResolution::Hours => 3_600,
            TimeResolution::Minutes => 60,
            TimeResolution::Seconds => 1,
        }
    }

    /// Truncate a UTC instant down to this resolution.
    ///
    /// Day truncation yields midnight UTC.
    pub fn truncate(&self, dt: DateTime<Utc>) -> DateTime<Utc> {
        let step = self.seconds();
        let secs = dt.timestamp().div_euclid(step) * step;
        Utc.timestamp_opt(secs, 0).single().unwrap_or(dt)
    }
}

impl fmt::Display for TimeResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeResolution::Days => "days",
            TimeResolution::Hours => "hours",
            TimeResolution::Minutes => "minutes",
            TimeResolution::Seconds => "seconds",
        };
        f.write_str(s)
    }
}

/// Parsed CF time units: `<unit> since <reference>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CfTimeUnits {
    pub resolution: TimeResolution,
    pub reference: DateTime<Utc>,
}

impl CfTimeUnits {
    /// Parse a CF `units` attribute such as `"hours since 1900-01-01 00:00:00"`.
    pub fn parse(units: &str) -> Result<Self, TimeParseError> {
        let trimmed = units.trim();
        let idx = trimmed
            .to_ascii_lowercase()
            .find(" since ")
            .ok_or_else(|| TimeParseError::InvalidUnits(units.to_string()))?;
        let (unit, reference) = (&trimmed[..idx], &trimmed[idx + " since ".len()..]);

        let resolution = TimeResolution::from_unit(unit)
            .ok_or_else(|| TimeParseError::InvalidUnits(units.to_string()))?;
        let reference = parse_reference_time(reference)
            .ok_or_else(|| TimeParseError::InvalidUnits(units.to_string()))?;

        Ok(Self {
            resolution,
            reference,
        })
    }

    /// Decode a raw coordinate value to a UTC timestamp.
    ///
    /// Offsets are rounded to the nearest millisecond.
    pub fn decode(&self, value: f64) -> Option<DateTime<Utc>> {
        if !value.is_finite() {
            return None;
        }
        let millis = (value * self.resolution.seconds() as f64 * 1000.0).round();
        if millis.abs() >= i64::MAX as f64 {
            return None;
        }
        let offset = Duration::try_milliseconds(millis as i64)?;
        self.reference.checked_add_signed(offset)
    }
}

fn parse_reference_time(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let s = s
        .trim_end_matches("UTC")
        .trim_end_matches('Z')
        .trim();

    for fmt in [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&ndt));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| Utc.from_utc_datetime(&ndt))
}

/// A user-supplied date selection.
///
/// Accepts a plain calendar date (`2016-07-01`), a naive datetime taken as
/// UTC, or an RFC 3339 timestamp with offset which is converted to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateQuery {
    instant: DateTime<Utc>,
}

impl DateQuery {
    pub fn parse(s: &str) -> Result<Self, TimeParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TimeParseError::InvalidFormat(s.to_string()));
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::from_datetime(dt.with_timezone(&Utc)));
        }

        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
            return Ok(Self::from_datetime(Utc.from_utc_datetime(&ndt)));
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::from_date(date));
        }

        Err(TimeParseError::InvalidFormat(s.to_string()))
    }

    /// Midnight UTC of the given calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        let instant = Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN));
        Self { instant }
    }

    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// The query instant in UTC, before normalization.
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// The query instant truncated to the dataset's time granularity.
    pub fn normalized(&self, resolution: TimeResolution) -> DateTime<Utc> {
        resolution.truncate(self.instant)
    }
}

/// Format a dataset timestamp for display: a bare date at midnight,
/// otherwise the full ISO 8601 form.
pub fn display_time(dt: &DateTime<Utc>) -> String {
    if dt.time() == chrono::NaiveTime::MIN {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TimeParseError {
    #[error("Invalid time format: {0}")]
    InvalidFormat(String),

    #[error("Invalid CF time units: {0}")]
    InvalidUnits(String),
}
