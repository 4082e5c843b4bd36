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
    ColumnSpec::required("name", DataType::String),
    ColumnSpec::optional("description", DataType::String),
    ColumnSpec::now_utc("created_at"),
    ColumnSpec::now_utc("updated_at"),
];

pub static SCHEMA: TableSchema = TableSchema {
    table: "genre",
    columns: &COLUMNS,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Genre {
    fn schema() -> &'static TableSchema {
        &SCHEMA
    }

    fn from_bound(mut row: BoundRow) -> Result<Self, RecordError> {
        Ok(Genre {
            id: row.uuid("id")?,
            name: row.string("name")?,
            description: row.opt_string("description")?,
            created_at: row.timestamp("created_at")?,
            updated_at: row.timestamp("updated_at")?,
        })
    }

    fn into_fields(self) -> Vec<FieldValue> {
        vec![
            field(&SCHEMA, "id", Some(self.id)),
            field(&SCHEMA, "name", Some(self.name)),
            field(&SCHEMA, "description", self.description),
            field(&SCHEMA, "created_at", Some(self.created_at)),
            field(&SCHEMA, "updated_at", Some(self.updated_at)),
        ]
    }
}
