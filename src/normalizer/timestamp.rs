//! Publication date parsing.
//!
//! The recommendations API emits `date_publication` in several ISO-8601-ish
//! shapes: with or without a 3 or 6 digit fraction, with or without a UTC
//! offset. Every shape is tried in a fixed order and the first that parses
//! wins. Strings without an offset are taken to be UTC.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// One entry of the pattern table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatePattern {
    pub format: &'static str,
    pub has_offset: bool,
}

/// Precedence order matters: keep it stable.
pub const PATTERNS: [DatePattern; 6] = [
    DatePattern {
        format: "%Y-%m-%dT%H:%M:%S%.3f%:z",
        has_offset: true,
    },
    DatePattern {
        format: "%Y-%m-%dT%H:%M:%S%.6f%:z",
        has_offset: true,
    },
    DatePattern {
        format: "%Y-%m-%dT%H:%M:%S%.6f",
        has_offset: false,
    },
    DatePattern {
        format: "%Y-%m-%dT%H:%M:%S%.3f",
        has_offset: false,
    },
    DatePattern {
        format: "%Y-%m-%dT%H:%M:%S%:z",
        has_offset: true,
    },
    DatePattern {
        format: "%Y-%m-%dT%H:%M:%S",
        has_offset: false,
    },
];

impl DatePattern {
    fn parse(&self, raw: &str) -> Option<DateTime<Utc>> {
        if self.has_offset {
            return DateTime::parse_from_str(raw, self.format)
                .ok()
                .map(|dt| dt.with_timezone(&Utc));
        }

        NaiveDateTime::parse_from_str(raw, self.format)
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// Parse a server timestamp, returning `None` if no pattern accepts it.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }

    let candidate = expand_zulu(raw);

    let parsed = PATTERNS.iter().find_map(|pattern| pattern.parse(&candidate));
    if parsed.is_none() {
        tracing::debug!("Unrecognized timestamp: {:?}", raw);
    }
    parsed
}

/// chrono's `%:z` wants a numeric offset, so a trailing `Z` becomes `+00:00`.
fn expand_zulu(raw: &str) -> Cow<'_, str> {
    match raw.strip_suffix('Z').or_else(|| raw.strip_suffix('z')) {
        Some(rest) => Cow::Owned(format!("{}+00:00", rest)),
        None => Cow::Borrowed(raw),
    }
}

/// Serde adapter for optional server timestamps.
///
/// Absent, `null`, and unparsable values all become `None`; only a value of
/// the wrong JSON type fails the decode.
pub fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone, Timelike};

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 34, 56)
            .unwrap()
            .with_nanosecond(123_456_000)
            .unwrap()
    }

    #[test]
    fn test_every_pattern_round_trips() {
        let original = reference();
        let moscow = FixedOffset::east_opt(3 * 3600).unwrap();

        for pattern in &PATTERNS {
            let formatted = if pattern.has_offset {
                original.with_timezone(&moscow).format(pattern.format).to_string()
            } else {
                original.naive_utc().format(pattern.format).to_string()
            };

            let parsed = parse_timestamp(&formatted)
                .unwrap_or_else(|| panic!("{} did not parse {}", pattern.format, formatted));
            let drift = (parsed - original).num_milliseconds().abs();
            assert!(drift < 1000, "{} drifted {}ms", pattern.format, drift);
        }
    }

    #[test]
    fn test_three_digit_fraction_with_offset() {
        let ts = parse_timestamp("2024-03-15T15:34:56.123+03:00").unwrap();
        let expected = Utc
            .with_ymd_and_hms(2024, 3, 15, 12, 34, 56)
            .unwrap()
            .with_nanosecond(123_000_000)
            .unwrap();
        assert_eq!(ts, expected);
    }

    #[test]
    fn test_six_digit_fraction_without_offset_is_utc() {
        let ts = parse_timestamp("2024-03-15T12:34:56.123456").unwrap();
        assert_eq!(ts, reference());
    }

    #[test]
    fn test_no_fraction_no_offset() {
        let ts = parse_timestamp("2023-12-31T23:59:59").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap());
    }

    #[test]
    fn test_zulu_designator() {
        let ts = parse_timestamp("2024-01-01T00:00:00Z").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

        let ts = parse_timestamp("2024-01-01T00:00:00.500Z").unwrap();
        assert_eq!(ts.nanosecond(), 500_000_000);
    }

    #[test]
    fn test_negative_offset() {
        let ts = parse_timestamp("2024-01-01T20:00:00-05:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 2, 1, 0, 0).unwrap());
    }

    #[test]
    fn test_garbage_is_none() {
        assert_eq!(parse_timestamp("not-a-date"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2024-01-01"), None);
        assert_eq!(parse_timestamp("2024-13-01T00:00:00"), None);
        assert_eq!(parse_timestamp("Z"), None);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let raw = "2024-03-15T12:34:56.123+00:00";
        assert_eq!(parse_timestamp(raw), parse_timestamp(raw));
    }

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_deserialize_absent_null_and_garbage() {
        let absent: Holder = serde_json::from_str("{}").unwrap();
        assert!(absent.at.is_none());

        let null: Holder = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert!(null.at.is_none());

        let garbage: Holder = serde_json::from_str(r#"{"at": "yesterday"}"#).unwrap();
        assert!(garbage.at.is_none());

        let good: Holder = serde_json::from_str(r#"{"at": "2023-12-31T23:59:59"}"#).unwrap();
        assert!(good.at.is_some());
    }

    #[test]
    fn test_deserialize_wrong_type_fails() {
        assert!(serde_json::from_str::<Holder>(r#"{"at": 42}"#).is_err());
    }
}
