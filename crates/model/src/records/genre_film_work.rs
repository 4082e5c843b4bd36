use crate::{
    core::{data_type::DataType, value::FieldValue},
    error::RecordError,
    records::{BoundRow, Record, field},
    schema::{ColumnSpec, TableSchema},
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

static COLUMNS: [ColumnSpec; 4] = [
    ColumnSpec::required("id", DataType::Uuid),
    ColumnSpec::required("film_work_id", DataType::Uuid),
    ColumnSpec::required("genre_id", DataType::Uuid),
    ColumnSpec::now_utc("created_at"),
];

pub static SCHEMA: TableSchema = TableSchema {
    table: "genre_film_work",
    columns: &COLUMNS,
};

#[derive(Debug, Clone, PartialEq)]
pub struct GenreFilmWork {
    pub id: Uuid,
    pub film_work_id: Uuid,
    pub genre_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Record for GenreFilmWork {
    fn schema() -> &'static TableSchema {
        &SCHEMA
    }

    fn from_bound(mut row: BoundRow) -> Result<Self, RecordError> {
        Ok(GenreFilmWork {
            id: row.uuid("id")?,
            film_work_id: row.uuid("film_work_id")?,
            genre_id: row.uuid("genre_id")?,
            created_at: row.timestamp("created_at")?,
        })
    }

    fn into_fields(self) -> Vec<FieldValue> {
        vec![
            field(&SCHEMA, "id", Some(self.id)),
            field(&SCHEMA, "film_work_id", Some(self.film_work_id)),
            field(&SCHEMA, "genre_id", Some(self.genre_id)),
            field(&SCHEMA, "created_at", Some(self.created_at)),
        ]
    }
}
