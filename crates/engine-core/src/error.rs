use connectors::sql::base::error::DbError;
use model::error::RecordError;
use thiserror::Error;

/// Fatal errors raised while moving one table.
#[derive(Debug, Error)]
pub enum EtlError {
    #[error("Source error: {0}")]
    Source(DbError),

    #[error("Destination error: {0}")]
    Destination(DbError),

    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    #[error("Page for '{table}' needs {params} bind parameters, limit is {limit}")]
    TooManyParameters {
        table: String,
        params: usize,
        limit: usize,
    },
}
