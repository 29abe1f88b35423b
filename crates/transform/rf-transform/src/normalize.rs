//! Normalization of the `images` and `timestamp` review values.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use rf_types::json_type_name;
use serde_json::Value;

/// Earliest year an epoch value may land in to be accepted for a unit.
const MIN_YEAR: i32 = 1677;

/// Latest year an epoch value may land in to be accepted for a unit.
const MAX_YEAR: i32 = 2262;

/// Accepted layouts for timestamp strings without an offset.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Calendar date of a review as `(month, day, year)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTriple {
    pub month: u32,
    pub day: u32,
    pub year: i32,
}

impl DateTriple {
    pub fn new(month: u32, day: u32, year: i32) -> Self {
        Self { month, day, year }
    }

    fn from_date(date: NaiveDate) -> Self {
        Self::new(date.month(), date.day(), date.year())
    }
}

/// Whether a review's `images` value holds at least one image.
///
/// Collections and strings count when non-empty, numbers when non-zero.
/// A missing value, `null` or `false` has no images.
pub fn has_images(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    }
}

/// Reduces a review's `timestamp` value to its calendar date.
///
/// Integers are Unix epoch values. Their unit is the first of seconds,
/// milliseconds, microseconds and nanoseconds that puts the instant between
/// the years 1677 and 2262; review dumps carry milliseconds. Strings are
/// RFC 3339 (the date is read in the string's own offset), a naive
/// `YYYY-MM-DD HH:MM:SS[.f]` (space or `T` separated) or a bare
/// `YYYY-MM-DD`. `null` yields `None`.
///
/// Returns the reason as a message when the value is not a date.
pub fn date_triple(value: &Value) -> Result<Option<DateTriple>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            let epoch = if let Some(v) = n.as_i64() {
                v
            } else {
                match n.as_f64() {
                    Some(v) if v.is_finite() && v.abs() < i64::MAX as f64 => v.trunc() as i64,
                    _ => return Err(format!("epoch value {} out of range", n)),
                }
            };
            from_epoch(epoch)
                .map(|dt| Some(DateTriple::from_date(dt.date_naive())))
                .ok_or_else(|| format!("epoch value {} out of range", epoch))
        }
        Value::String(s) => parse_date_string(s.trim())
            .map(|date| Some(DateTriple::from_date(date)))
            .ok_or_else(|| format!("unrecognized date '{}'", s)),
        other => Err(format!("expected a date, found {}", json_type_name(other))),
    }
}

#[derive(Debug, Clone, Copy)]
enum EpochUnit {
    Seconds,
    Millis,
    Micros,
    Nanos,
}

impl EpochUnit {
    const ALL: [EpochUnit; 4] = [
        EpochUnit::Seconds,
        EpochUnit::Millis,
        EpochUnit::Micros,
        EpochUnit::Nanos,
    ];

    fn to_datetime(self, value: i64) -> Option<DateTime<Utc>> {
        match self {
            EpochUnit::Seconds => DateTime::from_timestamp(value, 0),
            EpochUnit::Millis => DateTime::from_timestamp_millis(value),
            EpochUnit::Micros => DateTime::from_timestamp_micros(value),
            EpochUnit::Nanos => Some(DateTime::from_timestamp_nanos(value)),
        }
    }
}

fn from_epoch(value: i64) -> Option<DateTime<Utc>> {
    EpochUnit::ALL
        .iter()
        .filter_map(|unit| unit.to_datetime(value))
        .find(|dt| (MIN_YEAR..=MAX_YEAR).contains(&dt.year()))
}

fn parse_date_string(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.date());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
