//! Coercion of loosely typed source values into declared column types.
//!
//! SQLite stores UUIDs, dates and timestamps as text, so most of the work
//! here is parsing.

use crate::core::{data_type::DataType, value::Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const OFFSET_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

/// Converts `value` to `target`. `Value::Null` passes through unchanged.
pub fn coerce(value: Value, target: DataType) -> Result<Value, String> {
    if value.is_null() {
        return Ok(Value::Null);
    }

    match target {
        DataType::Uuid => to_uuid(value).map(Value::Uuid),
        DataType::String => match value {
            Value::String(s) => Ok(Value::String(s)),
            Value::Uuid(u) => Ok(Value::String(u.hyphenated().to_string())),
            other => Err(format!("cannot read {:?} as text", other.data_type())),
        },
        DataType::Int => match value {
            Value::Int(v) => Ok(Value::Int(v)),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|e| format!("'{s}': {e}")),
            other => Err(format!("cannot read {:?} as integer", other.data_type())),
        },
        DataType::Float => value
            .as_f64()
            .map(Value::Float)
            .ok_or_else(|| format!("cannot read {value} as float")),
        DataType::Boolean => match value {
            Value::Boolean(v) => Ok(Value::Boolean(v)),
            Value::Int(v) => Ok(Value::Boolean(v != 0)),
            other => Err(format!("cannot read {:?} as boolean", other.data_type())),
        },
        DataType::Date => to_date(value).map(Value::Date),
        DataType::Timestamp => to_timestamp(value).map(Value::Timestamp),
        DataType::Bytea => match value {
            Value::Bytes(b) => Ok(Value::Bytes(b)),
            Value::String(s) => Ok(Value::Bytes(s.into_bytes())),
            other => Err(format!("cannot read {:?} as bytes", other.data_type())),
        },
        DataType::Null => Err("column declared as NULL type".to_string()),
    }
}

fn to_uuid(value: Value) -> Result<Uuid, String> {
    match value {
        Value::Uuid(u) => Ok(u),
        Value::String(s) => Uuid::parse_str(s.trim()).map_err(|e| format!("'{s}': {e}")),
        Value::Bytes(b) => Uuid::from_slice(&b).map_err(|e| e.to_string()),
        other => Err(format!("cannot read {:?} as uuid", other.data_type())),
    }
}

fn to_date(value: Value) -> Result<NaiveDate, String> {
    match value {
        Value::Date(d) => Ok(d),
        Value::Timestamp(ts) => Ok(ts.date_naive()),
        Value::String(s) => {
            let trimmed = s.trim();
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .or_else(|_| parse_timestamp(trimmed).map(|ts| ts.date_naive()))
                .map_err(|_| format!("'{s}' is not a date"))
        }
        other => Err(format!("cannot read {:?} as date", other.data_type())),
    }
}

fn to_timestamp(value: Value) -> Result<DateTime<Utc>, String> {
    match value {
        Value::Timestamp(ts) => Ok(ts),
        Value::String(s) => parse_timestamp(s.trim()).map_err(|_| format!("'{s}' is not a timestamp")),
        other => Err(format!("cannot read {:?} as timestamp", other.data_type())),
    }
}

/// Parses the timestamp spellings found in SQLite dumps.
///
/// Text without an offset is taken as UTC.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Ok(ts.with_timezone(&Utc));
    }

    let mut last_err = None;
    for format in OFFSET_TIMESTAMP_FORMATS {
        match DateTime::parse_from_str(text, format) {
            Ok(ts) => return Ok(ts.with_timezone(&Utc)),
            Err(e) => last_err = Some(e),
        }
    }
    for format in NAIVE_TIMESTAMP_FORMATS {
        match NaiveDateTime::parse_from_str(text, format) {
            Ok(naive) => return Ok(naive.and_utc()),
            Err(e) => last_err = Some(e),
        }
    }

    match last_err {
        Some(e) => Err(e),
        None => DateTime::parse_from_rfc3339(text).map(|ts| ts.with_timezone(&Utc)),
    }
}
