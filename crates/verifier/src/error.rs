use connectors::sql::base::error::DbError;
use engine_runtime::error::MigrationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Failed to open stores: {0}")]
    Open(#[from] MigrationError),

    #[error("Failed to read '{table}' from {store}: {source}")]
    Read {
        table: String,
        store: &'static str,
        #[source]
        source: DbError,
    },

    #[error("Check for '{0}' names no fields")]
    EmptyCheck(String),
}
