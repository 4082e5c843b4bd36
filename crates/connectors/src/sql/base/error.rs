use thiserror::Error;

/// All errors coming from the database/query layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Any SQLite driver error.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] sqlx::Error),

    /// Any Postgres driver error.
    #[error("Postgres error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// The destination relation (or its namespace) does not exist.
    #[error("Table '{table}' does not exist: {message}")]
    UndefinedTable { table: String, message: String },

    /// A column value could not be decoded into a `Value`.
    #[error("Cannot decode '{table}.{column}': {reason}")]
    Decode {
        table: String,
        column: String,
        reason: String,
    },

    /// An error occurred while building a SQL query.
    #[error("Query build error: {0}")]
    QueryBuildError(String),
}

/// Errors happening during adapter or connection setup.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// SQLx failed to open the database file.
    #[error("SQLite connection failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Postgres connection failed: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("TLS setup failed: {0}")]
    Tls(#[from] native_tls::Error),

    #[error("Invalid connection settings: {0}")]
    InvalidConfig(String),
}
