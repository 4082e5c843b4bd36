use crate::{
    core::{
        data_type::DataType,
        value::{FieldValue, Value},
    },
    error::RecordError,
    records::row::RowData,
    schema::{DefaultRule, TableSchema, coerce::coerce},
};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use uuid::Uuid;

pub mod film_work;
pub mod genre;
pub mod genre_film_work;
pub mod person;
pub mod person_film_work;
pub mod row;

pub use film_work::{FilmWork, FilmWorkType};
pub use genre::Genre;
pub use genre_film_work::GenreFilmWork;
pub use person::Person;
pub use person_film_work::PersonFilmWork;

/// A typed record shape backed by a [`TableSchema`] descriptor.
pub trait Record: Sized {
    fn schema() -> &'static TableSchema;

    fn from_bound(row: BoundRow) -> Result<Self, RecordError>;

    /// Fields in descriptor order, typed for binding.
    fn into_fields(self) -> Vec<FieldValue>;
}

/// Builds a record of shape `R` from a source row.
///
/// Absent timestamps are filled with a single `Utc::now()` taken here, so
/// every record gets its own construction time.
pub fn build<R: Record>(row: &RowData) -> Result<R, RecordError> {
    let bound = BoundRow::bind(R::schema(), row, Utc::now())?;
    R::from_bound(bound)
}

/// A source row validated against a schema and coerced to declared types.
#[derive(Debug)]
pub struct BoundRow {
    table: &'static str,
    values: HashMap<&'static str, Value>,
}

impl BoundRow {
    pub fn bind(
        schema: &'static TableSchema,
        row: &RowData,
        now: DateTime<Utc>,
    ) -> Result<Self, RecordError> {
        let unexpected: Vec<String> = row
            .column_names()
            .filter(|name| schema.column(name).is_none())
            .map(str::to_string)
            .collect();
        if !unexpected.is_empty() {
            return Err(RecordError::SchemaMismatch {
                table: schema.table.to_string(),
                columns: unexpected,
            });
        }

        let mut values = HashMap::with_capacity(schema.columns.len());
        for spec in schema.columns {
            let raw = row.get_value(spec.name);
            let value = if raw.is_null() {
                match spec.rule {
                    DefaultRule::Required => {
                        return Err(RecordError::MissingField {
                            table: schema.table.to_string(),
                            field: spec.name.to_string(),
                        });
                    }
                    DefaultRule::Optional => Value::Null,
                    DefaultRule::NowUtc => Value::Timestamp(now),
                }
            } else {
                coerce(raw, spec.data_type).map_err(|reason| RecordError::InvalidValue {
                    table: schema.table.to_string(),
                    field: spec.name.to_string(),
                    expected: spec.data_type,
                    reason,
                })?
            };
            values.insert(spec.name, value);
        }

        Ok(BoundRow {
            table: schema.table,
            values,
        })
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    fn take(&mut self, field: &str) -> Value {
        self.values.remove(field).unwrap_or(Value::Null)
    }

    pub fn invalid(&self, field: &str, expected: DataType, reason: &str) -> RecordError {
        RecordError::InvalidValue {
            table: self.table.to_string(),
            field: field.to_string(),
            expected,
            reason: reason.to_string(),
        }
    }

    fn missing(&self, field: &str) -> RecordError {
        RecordError::MissingField {
            table: self.table.to_string(),
            field: field.to_string(),
        }
    }

    pub fn uuid(&mut self, field: &str) -> Result<Uuid, RecordError> {
        match self.take(field) {
            Value::Uuid(v) => Ok(v),
            Value::Null => Err(self.missing(field)),
            _ => Err(self.invalid(field, DataType::Uuid, "not a uuid")),
        }
    }

    pub fn string(&mut self, field: &str) -> Result<String, RecordError> {
        self.opt_string(field)?.ok_or_else(|| self.missing(field))
    }

    pub fn opt_string(&mut self, field: &str) -> Result<Option<String>, RecordError> {
        match self.take(field) {
            Value::String(v) => Ok(Some(v)),
            Value::Null => Ok(None),
            _ => Err(self.invalid(field, DataType::String, "not text")),
        }
    }

    pub fn opt_float(&mut self, field: &str) -> Result<Option<f64>, RecordError> {
        match self.take(field) {
            Value::Float(v) => Ok(Some(v)),
            Value::Null => Ok(None),
            _ => Err(self.invalid(field, DataType::Float, "not a float")),
        }
    }

    pub fn opt_date(&mut self, field: &str) -> Result<Option<NaiveDate>, RecordError> {
        match self.take(field) {
            Value::Date(v) => Ok(Some(v)),
            Value::Null => Ok(None),
            _ => Err(self.invalid(field, DataType::Date, "not a date")),
        }
    }

    pub fn timestamp(&mut self, field: &str) -> Result<DateTime<Utc>, RecordError> {
        match self.take(field) {
            Value::Timestamp(v) => Ok(v),
            Value::Null => Err(self.missing(field)),
            _ => Err(self.invalid(field, DataType::Timestamp, "not a timestamp")),
        }
    }
}

/// Converts an optional value into a field, keeping the declared type for NULL.
pub(crate) fn field<T: Into<Value>>(
    schema: &TableSchema,
    name: &str,
    value: Option<T>,
) -> FieldValue {
    let data_type = schema.column(name).map_or(DataType::Null, |c| c.data_type);
    FieldValue::new(name, value.map(Into::into).unwrap_or(Value::Null), data_type)
}
