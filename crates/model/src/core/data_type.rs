use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, collections::HashMap, fmt};

/// Logical column types understood by the loader.
///
/// The set is intentionally small: it covers what the catalogue tables
/// store and what the two engines can exchange without loss.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DataType {
    Uuid,
    String,
    Int,
    Float,
    Boolean,
    Date,
    Timestamp,
    Bytea,
    Null,
}

lazy_static! {
    static ref POSTGRES_TYPE_MAP: HashMap<&'static str, DataType> = build_postgres_type_map();
    static ref SQLITE_STORAGE_MAP: HashMap<&'static str, DataType> = build_sqlite_storage_map();
}

impl DataType {
    pub fn from_postgres_type(type_name: &str) -> Result<Self, String> {
        let normalized = Self::normalize_type_name(type_name);
        POSTGRES_TYPE_MAP
            .get(normalized.as_str())
            .copied()
            .ok_or_else(|| format!("Unknown Postgres column type: {type_name}"))
    }

    /// Maps an SQLite storage class (`INTEGER`, `REAL`, `TEXT`, `BLOB`, `NULL`).
    pub fn from_sqlite_storage(storage: &str) -> Result<Self, String> {
        let normalized = Self::normalize_type_name(storage);
        SQLITE_STORAGE_MAP
            .get(normalized.as_str())
            .copied()
            .ok_or_else(|| format!("Unknown SQLite storage class: {storage}"))
    }

    pub fn postgres_name(&self) -> Cow<'_, str> {
        match self {
            DataType::Uuid => Cow::Borrowed("UUID"),
            DataType::String => Cow::Borrowed("TEXT"),
            DataType::Int => Cow::Borrowed("BIGINT"),
            DataType::Float => Cow::Borrowed("DOUBLE PRECISION"),
            DataType::Boolean => Cow::Borrowed("BOOLEAN"),
            DataType::Date => Cow::Borrowed("DATE"),
            DataType::Timestamp => Cow::Borrowed("TIMESTAMP WITH TIME ZONE"),
            DataType::Bytea => Cow::Borrowed("BYTEA"),
            DataType::Null => Cow::Borrowed("NULL"),
        }
    }

    fn normalize_type_name(type_name: &str) -> String {
        type_name.trim().to_uppercase()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.postgres_name())
    }
}

fn build_postgres_type_map() -> HashMap<&'static str, DataType> {
    use DataType::*;

    let entries = [
        ("UUID", Uuid),
        ("BOOLEAN", Boolean),
        ("BOOL", Boolean),
        ("SMALLINT", Int),
        ("INT2", Int),
        ("INTEGER", Int),
        ("INT", Int),
        ("INT4", Int),
        ("INT8", Int),
        ("BIGINT", Int),
        ("FLOAT4", Float),
        ("REAL", Float),
        ("FLOAT8", Float),
        ("DOUBLE PRECISION", Float),
        ("TEXT", String),
        ("NAME", String),
        ("CHARACTER VARYING", String),
        ("VARCHAR", String),
        ("CHARACTER", String),
        ("CHAR", String),
        ("BPCHAR", String),
        ("BYTEA", Bytea),
        ("DATE", Date),
        ("TIMESTAMP", Timestamp),
        ("TIMESTAMP WITHOUT TIME ZONE", Timestamp),
        ("TIMESTAMP WITH TIME ZONE", Timestamp),
        ("TIMESTAMPTZ", Timestamp),
    ];

    let mut map = HashMap::new();
    for (name, data_type) in entries {
        map.insert(name, data_type);
    }
    map
}

fn build_sqlite_storage_map() -> HashMap<&'static str, DataType> {
    use DataType::*;

    let entries = [
        ("INTEGER", Int),
        ("REAL", Float),
        ("TEXT", String),
        ("BLOB", Bytea),
        ("NULL", Null),
    ];

    let mut map = HashMap::new();
    for (name, data_type) in entries {
        map.insert(name, data_type);
    }
    map
}
