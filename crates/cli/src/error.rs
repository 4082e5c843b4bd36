use connectors::sql::base::error::{ConnectorError, DbError};
use engine_config::error::SettingsError;
use engine_runtime::error::MigrationError;
use thiserror::Error;
use verifier::error::VerifyError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Failed to run the migration: {0}")]
    Runner(#[from] MigrationError),

    #[error("Failed to verify the migration: {0}")]
    Verify(#[from] VerifyError),

    #[error("Verification found {0} inconsistent table(s)")]
    Inconsistent(usize),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Connection failed: {0}")]
    Connector(#[from] ConnectorError),

    #[error("Ping failed: {0}")]
    Ping(#[from] DbError),
}
