//! Date normalization
//!
//! Documents in the store carry the transaction date in several shapes: plain
//! `YYYY-MM-DD` strings, ISO-8601 datetimes, epoch numbers (seconds or
//! milliseconds) and structured `{seconds, nanoseconds}` timestamps. This
//! module is the single place where those shapes are mapped to a calendar
//! date. Every instant is interpreted in UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

/// Epoch numbers below this magnitude are seconds, at or above it milliseconds
pub const EPOCH_MILLIS_THRESHOLD: f64 = 1e12;

/// Date-only text formats, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Naive datetime text formats, tried in order
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A date value exactly as it was found on a document
#[derive(Debug, Clone, PartialEq)]
pub enum RawDate {
    /// Text such as "2025-01-15" or "2025-01-15T10:30:00Z"
    Text(String),
    /// Epoch seconds or milliseconds
    Number(f64),
    /// Structured timestamp as written by the hosted document store
    Timestamp { seconds: i64, nanoseconds: u32 },
    /// No date field present
    Missing,
    /// A value of a shape no resolver understands
    Unsupported(Value),
}

impl RawDate {
    /// Build a raw date from a canonical calendar date
    pub fn from_date(date: NaiveDate) -> Self {
        Self::Text(date.format("%Y-%m-%d").to_string())
    }

    /// Classify a JSON value
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::String(s) => Self::Text(s.clone()),
            Value::Number(n) => n
                .as_f64()
                .map(Self::Number)
                .unwrap_or_else(|| Self::Unsupported(value.clone())),
            Value::Object(map) => {
                let seconds = map.get("seconds").or_else(|| map.get("_seconds"));
                let nanos = map.get("nanoseconds").or_else(|| map.get("_nanoseconds"));
                match seconds.and_then(json_i64) {
                    Some(seconds) => Self::Timestamp {
                        seconds,
                        nanoseconds: nanos
                            .and_then(json_i64)
                            .and_then(|n| u32::try_from(n).ok())
                            .unwrap_or(0),
                    },
                    None => Self::Unsupported(value.clone()),
                }
            }
            _ => Self::Unsupported(value.clone()),
        }
    }

    /// Convert back into the JSON shape it came from
    pub fn to_value(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Number(n) => json!(n),
            Self::Timestamp {
                seconds,
                nanoseconds,
            } => json!({ "seconds": seconds, "nanoseconds": nanoseconds }),
            Self::Missing => Value::Null,
            Self::Unsupported(v) => v.clone(),
        }
    }

    /// Resolve to a calendar date, if the shape is recognized
    pub fn resolve(&self) -> Option<NaiveDate> {
        resolve_date(self)
    }

    /// Check whether a value is present at all
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl Serialize for RawDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RawDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

fn json_i64(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
}

/// Resolve any recognized date shape to a calendar date
///
/// This is a total function: unrecognized shapes yield `None` rather than an
/// error, so callers can count and exclude them.
pub fn resolve_date(raw: &RawDate) -> Option<NaiveDate> {
    match raw {
        RawDate::Text(s) => parse_date_text(s),
        RawDate::Number(n) => date_from_epoch(*n),
        RawDate::Timestamp {
            seconds,
            nanoseconds,
        } => DateTime::<Utc>::from_timestamp(*seconds, *nanoseconds).map(|dt| dt.date_naive()),
        RawDate::Missing | RawDate::Unsupported(_) => None,
    }
}

/// Parse a textual date in any of the recognized formats
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.date());
        }
    }

    None
}

/// Interpret an epoch number as seconds or milliseconds
pub fn date_from_epoch(value: f64) -> Option<NaiveDate> {
    if !value.is_finite() {
        return None;
    }

    let (seconds, nanos) = if value.abs() < EPOCH_MILLIS_THRESHOLD {
        let whole = value.floor();
        (whole as i64, ((value - whole) * 1e9) as u32)
    } else {
        let millis = value.trunc() as i64;
        (
            millis.div_euclid(1000),
            (millis.rem_euclid(1000) * 1_000_000) as u32,
        )
    };

    DateTime::<Utc>::from_timestamp(seconds, nanos).map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_plain_date_text() {
        assert_eq!(parse_date_text("2025-01-15"), Some(ymd(2025, 1, 15)));
        assert_eq!(parse_date_text("  2025-01-15 "), Some(ymd(2025, 1, 15)));
        assert_eq!(parse_date_text("2025/02/01"), Some(ymd(2025, 2, 1)));
    }

    #[test]
    fn test_iso_datetime_text() {
        assert_eq!(
            parse_date_text("2025-01-15T10:30:00Z"),
            Some(ymd(2025, 1, 15))
        );
        assert_eq!(
            parse_date_text("2025-01-15T23:30:00-05:00"),
            Some(ymd(2025, 1, 16))
        );
        assert_eq!(
            parse_date_text("2025-01-15T10:30:00.123"),
            Some(ymd(2025, 1, 15))
        );
        assert_eq!(
            parse_date_text("2025-01-15 10:30:00"),
            Some(ymd(2025, 1, 15))
        );
    }

    #[test]
    fn test_unparseable_text() {
        assert_eq!(parse_date_text("N/A"), None);
        assert_eq!(parse_date_text(""), None);
        assert_eq!(parse_date_text("2025-13-01"), None);
        assert_eq!(parse_date_text("2025-02-30"), None);
    }

    #[test]
    fn test_epoch_seconds_and_millis() {
        // 2025-01-15T00:00:00Z
        let secs = 1_736_899_200.0;
        assert_eq!(date_from_epoch(secs), Some(ymd(2025, 1, 15)));
        assert_eq!(date_from_epoch(secs * 1000.0), Some(ymd(2025, 1, 15)));
        assert_eq!(date_from_epoch(f64::NAN), None);
    }

    #[test]
    fn test_structured_timestamp() {
        let raw = RawDate::from_value(&json!({ "seconds": 1_736_899_200, "nanoseconds": 5 }));
        assert_eq!(
            raw,
            RawDate::Timestamp {
                seconds: 1_736_899_200,
                nanoseconds: 5
            }
        );
        assert_eq!(raw.resolve(), Some(ymd(2025, 1, 15)));

        let underscored = RawDate::from_value(&json!({ "_seconds": 1_736_899_200 }));
        assert_eq!(underscored.resolve(), Some(ymd(2025, 1, 15)));
    }

    #[test]
    fn test_value_classification() {
        assert_eq!(RawDate::from_value(&Value::Null), RawDate::Missing);
        assert_eq!(
            RawDate::from_value(&json!("2025-01-15")),
            RawDate::Text("2025-01-15".into())
        );
        assert!(matches!(
            RawDate::from_value(&json!(true)),
            RawDate::Unsupported(_)
        ));
        assert!(matches!(
            RawDate::from_value(&json!({ "when": "today" })),
            RawDate::Unsupported(_)
        ));
        assert_eq!(RawDate::Missing.resolve(), None);
        assert_eq!(RawDate::Unsupported(json!([1, 2])).resolve(), None);
    }

    #[test]
    fn test_serde_preserves_shape() {
        let raw: RawDate = serde_json::from_str("{\"seconds\":10,\"nanoseconds\":0}").unwrap();
        assert!(matches!(raw, RawDate::Timestamp { seconds: 10, .. }));
        let text = serde_json::to_string(&RawDate::from_date(ymd(2025, 3, 9))).unwrap();
        assert_eq!(text, "\"2025-03-09\"");
    }
}
