use crate::core::data_type::DataType;
use thiserror::Error;

/// Raised when a source row cannot be turned into a typed record.
///
/// Every variant is fatal for a run: it means the source schema and the
/// registered record shape disagree.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    /// The row carries columns the record shape does not declare.
    #[error("Schema mismatch for '{table}': unexpected columns {columns:?}")]
    SchemaMismatch { table: String, columns: Vec<String> },

    /// A required column is absent or NULL.
    #[error("Missing required field '{field}' for '{table}'")]
    MissingField { table: String, field: String },

    /// A column value could not be coerced into its declared type.
    #[error("Invalid value for '{table}.{field}' (expected {expected}): {reason}")]
    InvalidValue {
        table: String,
        field: String,
        expected: DataType,
        reason: String,
    },
}

/// Raised when a table schema descriptor is rejected at registration.
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("Table '{0}' declares no columns")]
    EmptySchema(String),

    #[error("Table '{table}' declares column '{column}' more than once")]
    DuplicateColumn { table: String, column: String },

    #[error("Table '{0}' must declare a required UUID 'id' column")]
    MissingIdentity(String),

    #[error("Column '{table}.{column}' defaults to now but is not a timestamp")]
    InvalidDefault { table: String, column: String },

    #[error("Table '{0}' is registered more than once")]
    DuplicateTable(String),

    #[error("Unknown table: {0}")]
    UnknownTable(String),
}
