//! String-to-value converters, one per scalar kind, plus the element-wise
//! sequence converter. Pure functions: every failure is a deterministic
//! function of the input.

use std::num::ParseIntError;
use std::str::FromStr;
use std::time::Duration;

use chrono::format::{Parsed, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::descriptor::FieldDescriptor;
use crate::error::BindError;

/// Identity conversion. Every input is valid, including empty and
/// whitespace-only strings; no trimming.
pub fn text(raw: &str) -> String {
    raw.to_owned()
}

/// Base-10 signed integer, full string, honoring the target bit width.
/// A leading `+` or `-` is accepted.
pub fn int<T>(descriptor: &FieldDescriptor, raw: &str) -> Result<T, BindError>
where
    T: FromStr<Err = ParseIntError>,
{
    raw.parse().map_err(|_| BindError::conversion(descriptor, raw))
}

/// Base-10 unsigned integer. Unlike [`int`], any leading sign is rejected.
pub fn uint<T>(descriptor: &FieldDescriptor, raw: &str) -> Result<T, BindError>
where
    T: FromStr<Err = ParseIntError>,
{
    if raw.starts_with(['+', '-']) {
        return Err(BindError::conversion(descriptor, raw));
    }
    raw.parse().map_err(|_| BindError::conversion(descriptor, raw))
}

/// Boolean from the canonical token set
/// `0 1 t f T F true false True False TRUE FALSE`; nothing else.
pub fn boolean(descriptor: &FieldDescriptor, raw: &str) -> Result<bool, BindError> {
    match raw {
        "1" | "t" | "T" | "true" | "True" | "TRUE" => Ok(true),
        "0" | "f" | "F" | "false" | "False" | "FALSE" => Ok(false),
        _ => Err(BindError::conversion(descriptor, raw)),
    }
}

/// Composite numeric+unit duration, e.g. `12s`, `5m6s`, `23h`.
/// Unit-less numerics fail.
pub fn duration(descriptor: &FieldDescriptor, raw: &str) -> Result<Duration, BindError> {
    humantime::parse_duration(raw).map_err(|_| BindError::conversion(descriptor, raw))
}

/// Point in time, normalized to UTC.
///
/// The declared location is resolved first, so an unknown location name
/// fails regardless of the raw value. Without a layout the input must be
/// an RFC 3339 date-time with offset. With a layout, an offset parsed from
/// the input resolves the instant directly; otherwise the naive timestamp
/// is interpreted in the resolved location, defaulting a missing
/// time-of-day to midnight. Ambiguous local times resolve to the earliest
/// instant.
pub fn datetime(descriptor: &FieldDescriptor, raw: &str) -> Result<DateTime<Utc>, BindError> {
    let tz = match descriptor.loc {
        Some(name) => name
            .parse::<Tz>()
            .map_err(|_| BindError::location(descriptor, name))?,
        None => Tz::UTC,
    };

    let Some(layout) = descriptor.layout else {
        return raw
            .parse::<DateTime<FixedOffset>>()
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| BindError::conversion(descriptor, raw));
    };

    let mut parsed = Parsed::new();
    chrono::format::parse(&mut parsed, raw, StrftimeItems::new(layout))
        .map_err(|_| BindError::conversion(descriptor, raw))?;

    // Layouts carrying an offset pin the instant without the location.
    if let Ok(dt) = parsed.to_datetime() {
        return Ok(dt.with_timezone(&Utc));
    }

    let date = parsed
        .to_naive_date()
        .map_err(|_| BindError::conversion(descriptor, raw))?;
    let time = parsed.to_naive_time().unwrap_or(NaiveTime::MIN);
    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| BindError::conversion(descriptor, raw))
}

/// Element-wise conversion into a new vector, preserving input order.
/// The first failing element aborts the whole conversion; no partial
/// vector is ever returned.
pub fn seq<T, F>(raws: &[String], mut element: F) -> Result<Vec<T>, BindError>
where
    F: FnMut(&str) -> Result<T, BindError>,
{
    let mut out = Vec::with_capacity(raws.len());
    for raw in raws {
        out.push(element(raw)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{FieldKind, ScalarKind};

    fn descriptor(kind: FieldKind) -> FieldDescriptor {
        FieldDescriptor {
            key: "test",
            kind,
            layout: None,
            loc: None,
        }
    }

    #[test]
    fn uint_rejects_explicit_plus_sign() {
        let d = descriptor(FieldKind::Scalar(ScalarKind::Uint));
        assert!(uint::<u32>(&d, "+1").is_err());
        assert_eq!(uint::<u32>(&d, "1"), Ok(1));
    }

    #[test]
    fn int_accepts_explicit_plus_sign() {
        let d = descriptor(FieldKind::Scalar(ScalarKind::Int));
        assert_eq!(int::<i32>(&d, "+1"), Ok(1));
    }

    #[test]
    fn boolean_token_set_is_exact() {
        let d = descriptor(FieldKind::Scalar(ScalarKind::Bool));
        for raw in ["1", "t", "T", "true", "True", "TRUE"] {
            assert_eq!(boolean(&d, raw), Ok(true), "{raw}");
        }
        for raw in ["0", "f", "F", "false", "False", "FALSE"] {
            assert_eq!(boolean(&d, raw), Ok(false), "{raw}");
        }
        for raw in ["", " ", "x", "11", "no", "yes", "TRUE ", " t"] {
            assert!(boolean(&d, raw).is_err(), "{raw}");
        }
    }

    #[test]
    fn location_error_takes_precedence_over_malformed_value() {
        let d = FieldDescriptor {
            key: "test",
            kind: FieldKind::Scalar(ScalarKind::DateTime),
            layout: None,
            loc: Some("X"),
        };
        match datetime(&d, "not a date") {
            Err(BindError::Location { field, location }) => {
                assert_eq!(field, "test");
                assert_eq!(location, "X");
            }
            other => panic!("expected location error, got {other:?}"),
        }
    }

    #[test]
    fn datetime_layout_without_calendar_date_fails() {
        let d = FieldDescriptor {
            key: "test",
            kind: FieldKind::Scalar(ScalarKind::DateTime),
            layout: Some("%H:%M"),
            loc: None,
        };
        assert!(datetime(&d, "09:38").is_err());
    }

    #[test]
    fn seq_stops_at_first_failing_element() {
        let d = descriptor(FieldKind::Seq(ScalarKind::Int));
        let raws = vec!["1".to_string(), "2x".to_string(), "3".to_string()];
        let err = seq(&raws, |raw| int::<i64>(&d, raw)).unwrap_err();
        match err {
            BindError::Conversion { value, .. } => assert_eq!(value, "2x"),
            other => panic!("expected conversion error, got {other:?}"),
        }
    }
}
