use chrono::{NaiveDate, NaiveDateTime};

use crate::stmt::Value;

/// Text form of a datetime in JSON documents and error messages.
pub const DATETIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Text form of a datetime written to storage.
pub const STORAGE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

const ACCEPTED_FORMATS: &[&str] = &[
    DATETIME_FORMAT,
    STORAGE_DATETIME_FORMAT,
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.fZ",
];

/// Parses datetime text in any of the accepted forms. A bare `%Y-%m-%d`
/// date parses as midnight.
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    ACCEPTED_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .or_else(|_| NaiveDate::parse_from_str(text, "%Y/%m/%d"))
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        value
            .and_hms_opt(0, 0, 0)
            .map(Self::DateTime)
            .unwrap_or(Self::Null)
    }
}

impl TryFrom<Value> for NaiveDateTime {
    type Error = crate::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::DateTime(value) => Ok(value),
            Value::String(ref text) => parse_datetime(text)
                .ok_or_else(|| crate::err!("value is not of type NaiveDateTime")),
            _ => Err(crate::err!("value is not of type NaiveDateTime")),
        }
    }
}
