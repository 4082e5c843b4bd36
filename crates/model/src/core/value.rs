use crate::core::data_type::DataType;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Uuid(Uuid),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Null,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::String(v) => v.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        use Value::*;
        match (self, other) {
            (Int(a), Int(b)) => Some(a.cmp(b)),
            (Float(a), Float(b)) => a.partial_cmp(b),
            (Int(a), Float(b)) => (*a as f64).partial_cmp(b),
            (Float(a), Int(b)) => a.partial_cmp(&(*b as f64)),
            (String(a), String(b)) => Some(a.cmp(b)),
            (Boolean(a), Boolean(b)) => Some(a.cmp(b)),
            (Uuid(a), Uuid(b)) => Some(a.cmp(b)),
            (Bytes(a), Bytes(b)) => Some(a.cmp(b)),
            (Date(a), Date(b)) => Some(a.cmp(b)),
            (Timestamp(a), Timestamp(b)) => Some(a.cmp(b)),
            (Null, Null) => Some(Ordering::Equal),
            _ => None,
        }
    }

    pub fn equal(&self, other: &Value) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }

    /// Rewrites engine-specific representations into a form both stores
    /// agree on: UUIDs and dates become their canonical text.
    pub fn normalized(&self) -> Value {
        match self {
            Value::Uuid(v) => Value::String(v.hyphenated().to_string()),
            Value::Date(v) => Value::String(v.format("%Y-%m-%d").to_string()),
            other => other.clone(),
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Value::Int(_) => DataType::Int,
            Value::Float(_) => DataType::Float,
            Value::String(_) => DataType::String,
            Value::Boolean(_) => DataType::Boolean,
            Value::Uuid(_) => DataType::Uuid,
            Value::Bytes(_) => DataType::Bytea,
            Value::Date(_) => DataType::Date,
            Value::Timestamp(_) => DataType::Timestamp,
            Value::Null => DataType::Null,
        }
    }
}

/// A named value together with the column type it is declared as.
///
/// `data_type` is kept even for `Value::Null` so that drivers can bind a
/// correctly typed NULL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldValue {
    pub name: String,
    pub value: Value,
    pub data_type: DataType,
}

impl FieldValue {
    pub fn new(name: &str, value: Value, data_type: DataType) -> Self {
        FieldValue {
            name: name.to_string(),
            value,
            data_type,
        }
    }

    /// Builds a field whose type is inferred from the value itself.
    pub fn inferred(name: &str, value: Value) -> Self {
        let data_type = value.data_type();
        FieldValue::new(name, value, data_type)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Uuid(v) => write!(f, "{v}"),
            Value::Bytes(v) => {
                let hex = v
                    .iter()
                    .fold(String::new(), |acc, byte: &u8| acc + &format!("{byte:02x}"));
                write!(f, "E'\\\\x{hex}'")
            }
            Value::Date(v) => write!(f, "'{v}'"),
            Value::Timestamp(v) => write!(f, "'{v}'"),
            Value::Null => write!(f, "NULL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Value;
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn test_int_and_float_compare_equal() {
        assert!(Value::Int(8).equal(&Value::Float(8.0)));
        assert!(!Value::Int(8).equal(&Value::Float(8.5)));
    }

    #[test]
    fn test_null_equals_only_null() {
        assert!(Value::Null.equal(&Value::Null));
        assert!(!Value::Null.equal(&Value::String("NULL".into())));
    }

    #[test]
    fn test_normalized_uuid_matches_text() {
        let id = Uuid::parse_str("3d825f60-9fff-4dfe-b294-1a45fa1e115d").unwrap();
        let from_pg = Value::Uuid(id).normalized();
        let from_sqlite = Value::String("3d825f60-9fff-4dfe-b294-1a45fa1e115d".into()).normalized();
        assert_eq!(from_pg, from_sqlite);
    }

    #[test]
    fn test_normalized_date_is_iso_text() {
        let date = NaiveDate::from_ymd_opt(2021, 6, 16).unwrap();
        assert_eq!(
            Value::Date(date).normalized(),
            Value::String("2021-06-16".into())
        );
    }
}
