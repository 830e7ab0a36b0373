//! Event timestamps.
//!
//! Matchers stamp events either with an ISO 8601 string or with milliseconds
//! since the Unix epoch. Both are coerced to a UTC instant at the decode
//! boundary; re-serialization always emits RFC 3339. Strings without an
//! offset (`2024-01-01T12:00:00`, `2024-01-01`) are read as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub type Timestamp = DateTime<Utc>;

/// Coerce milliseconds since the epoch into a timestamp.
pub fn timestamp_from_millis(ms: i64) -> Option<Timestamp> {
    Utc.timestamp_millis_opt(ms).single()
}

/// Offset-less date-time layouts, tried in order.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Coerce an ISO 8601 string into a timestamp: RFC 3339 first, then an
/// offset-less date-time or a bare date, both taken as UTC.
pub fn timestamp_from_str(s: &str) -> Option<Timestamp> {
    let s = s.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Serde adapter for coercible timestamps: `#[serde(with = "foundation::time::coerce")]`.
pub mod coerce {
    use serde::de::{self, Deserializer, Unexpected, Visitor};
    use serde::ser::Serializer;
    use std::fmt;

    use super::{Timestamp, timestamp_from_millis, timestamp_from_str};

    pub fn serialize<S: Serializer>(t: &Timestamp, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Timestamp, D::Error> {
        d.deserialize_any(CoerceVisitor)
    }

    struct CoerceVisitor;

    impl Visitor<'_> for CoerceVisitor {
        type Value = Timestamp;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "an ISO 8601 timestamp or epoch milliseconds")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Timestamp, E> {
            timestamp_from_millis(v)
                .ok_or_else(|| E::invalid_value(Unexpected::Signed(v), &self))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Timestamp, E> {
            i64::try_from(v)
                .ok()
                .and_then(timestamp_from_millis)
                .ok_or_else(|| E::invalid_value(Unexpected::Unsigned(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Timestamp, E> {
            if !v.is_finite() {
                return Err(E::invalid_value(Unexpected::Float(v), &self));
            }
            timestamp_from_millis(v.trunc() as i64)
                .ok_or_else(|| E::invalid_value(Unexpected::Float(v), &self))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Timestamp, E> {
            timestamp_from_str(v).ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
        }
    }
}
