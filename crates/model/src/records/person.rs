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
    ColumnSpec::required("full_name", DataType::String),
    ColumnSpec::now_utc("created_at"),
    ColumnSpec::now_utc("updated_at"),
];

pub static SCHEMA: TableSchema = TableSchema {
    table: "person",
    columns: &COLUMNS,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: Uuid,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Person {
    fn schema() -> &'static TableSchema {
        &SCHEMA
    }

    fn from_bound(mut row: BoundRow) -> Result<Self, RecordError> {
        Ok(Person {
            id: row.uuid("id")?,
            full_name: row.string("full_name")?,
            created_at: row.timestamp("created_at")?,
            updated_at: row.timestamp("updated_at")?,
        })
    }

    fn into_fields(self) -> Vec<FieldValue> {
        vec![
            field(&SCHEMA, "id", Some(self.id)),
            field(&SCHEMA, "full_name", Some(self.full_name)),
            field(&SCHEMA, "created_at", Some(self.created_at)),
            field(&SCHEMA, "updated_at", Some(self.updated_at)),
        ]
    }
}
