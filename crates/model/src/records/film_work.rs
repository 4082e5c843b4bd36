use crate::{
    core::{
        data_type::DataType,
        value::{FieldValue, Value},
    },
    error::RecordError,
    records::{BoundRow, Record, field},
    schema::{ColumnSpec, TableSchema},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 10.0;

static COLUMNS: [ColumnSpec; 9] = [
    ColumnSpec::required("id", DataType::Uuid),
    ColumnSpec::required("title", DataType::String),
    ColumnSpec::required("type", DataType::String),
    ColumnSpec::optional("description", DataType::String),
    ColumnSpec::optional("creation_date", DataType::Date),
    ColumnSpec::optional("file_path", DataType::String),
    ColumnSpec::optional("rating", DataType::Float),
    ColumnSpec::now_utc("created_at"),
    ColumnSpec::now_utc("updated_at"),
];

pub static SCHEMA: TableSchema = TableSchema {
    table: "film_work",
    columns: &COLUMNS,
};

/// The admin's type choices. The destination column is plain text, so any
/// other value is carried through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilmWorkType {
    Movie,
    TvSeries,
    #[serde(untagged)]
    Other(String),
}

impl FilmWorkType {
    pub fn as_str(&self) -> &str {
        match self {
            FilmWorkType::Movie => "movie",
            FilmWorkType::TvSeries => "tv_series",
            FilmWorkType::Other(other) => other,
        }
    }
}

impl From<String> for FilmWorkType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "movie" => FilmWorkType::Movie,
            "tv_series" => FilmWorkType::TvSeries,
            _ => FilmWorkType::Other(s),
        }
    }
}

impl fmt::Display for FilmWorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<FilmWorkType> for Value {
    fn from(v: FilmWorkType) -> Self {
        match v {
            FilmWorkType::Other(other) => Value::String(other),
            known => Value::String(known.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilmWork {
    pub id: Uuid,
    pub title: String,
    pub kind: FilmWorkType,
    pub description: Option<String>,
    pub creation_date: Option<NaiveDate>,
    pub file_path: Option<String>,
    pub rating: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for FilmWork {
    fn schema() -> &'static TableSchema {
        &SCHEMA
    }

    fn from_bound(mut row: BoundRow) -> Result<Self, RecordError> {
        let kind = FilmWorkType::from(row.string("type")?);

        let rating = row.opt_float("rating")?;
        if let Some(r) = rating
            && !(MIN_RATING..=MAX_RATING).contains(&r)
        {
            return Err(row.invalid(
                "rating",
                DataType::Float,
                &format!("{r} is outside [{MIN_RATING}, {MAX_RATING}]"),
            ));
        }

        Ok(FilmWork {
            id: row.uuid("id")?,
            title: row.string("title")?,
            kind,
            description: row.opt_string("description")?,
            creation_date: row.opt_date("creation_date")?,
            file_path: row.opt_string("file_path")?,
            rating,
            created_at: row.timestamp("created_at")?,
            updated_at: row.timestamp("updated_at")?,
        })
    }

    fn into_fields(self) -> Vec<FieldValue> {
        vec![
            field(&SCHEMA, "id", Some(self.id)),
            field(&SCHEMA, "title", Some(self.title)),
            field(&SCHEMA, "type", Some(self.kind)),
            field(&SCHEMA, "description", self.description),
            field(&SCHEMA, "creation_date", self.creation_date),
            field(&SCHEMA, "file_path", self.file_path),
            field(&SCHEMA, "rating", self.rating),
            field(&SCHEMA, "created_at", Some(self.created_at)),
            field(&SCHEMA, "updated_at", Some(self.updated_at)),
        ]
    }
}
