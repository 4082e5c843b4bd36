use crate::{
    core::{data_type::DataType, value::FieldValue},
    error::RecordError,
    records::{BoundRow, Record, field},
    schema::{ColumnSpec, TableSchema},
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

static COLUMNS: [ColumnSpec; 5] = [
    ColumnSpec::required("id", DataType::Uuid),
    ColumnSpec::required("film_work_id", DataType::Uuid),
    ColumnSpec::required("person_id", DataType::Uuid),
    ColumnSpec::required("role", DataType::String),
    ColumnSpec::now_utc("created_at"),
];

pub static SCHEMA: TableSchema = TableSchema {
    table: "person_film_work",
    columns: &COLUMNS,
};

#[derive(Debug, Clone, PartialEq)]
pub struct PersonFilmWork {
    pub id: Uuid,
    pub film_work_id: Uuid,
    pub person_id: Uuid,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl Record for PersonFilmWork {
    fn schema() -> &'static TableSchema {
        &SCHEMA
    }

    fn from_bound(mut row: BoundRow) -> Result<Self, RecordError> {
        Ok(PersonFilmWork {
            id: row.uuid("id")?,
            film_work_id: row.uuid("film_work_id")?,
            person_id: row.uuid("person_id")?,
            role: row.string("role")?,
            created_at: row.timestamp("created_at")?,
        })
    }

    fn into_fields(self) -> Vec<FieldValue> {
        vec![
            field(&SCHEMA, "id", Some(self.id)),
            field(&SCHEMA, "film_work_id", Some(self.film_work_id)),
            field(&SCHEMA, "person_id", Some(self.person_id)),
            field(&SCHEMA, "role", Some(self.role)),
            field(&SCHEMA, "created_at", Some(self.created_at)),
        ]
    }
}
