use connectors::sql::base::error::{ConnectorError, DbError};
use engine_config::error::SettingsError;
use engine_core::error::EtlError;
use thiserror::Error;

/// Top‐level errors for a migration run.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// A store could not be reached. Raised before any table is touched.
    #[error("Connectivity error: {0}")]
    Connectivity(#[from] ConnectorError),

    /// Setting error.
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// A table failed fatally; tables before it stay loaded.
    #[error("Migration of '{table}' failed: {source}")]
    Table {
        table: String,
        #[source]
        source: EtlError,
    },

    /// Db error.
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl MigrationError {
    pub fn table(table: &str, source: EtlError) -> Self {
        MigrationError::Table {
            table: table.to_string(),
            source,
        }
    }
}
