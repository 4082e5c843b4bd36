use model::error::RegistryError;
use thiserror::Error;

/// Errors raised while loading or validating run settings.
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("Missing required setting: {0}")]
    MissingVar(String),

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Failed to read env file {path}: {reason}")]
    EnvFile { path: String, reason: String },

    #[error("Invalid env file: {0}")]
    MalformedEnv(String),

    /// An association table is scheduled before a table it references.
    #[error("Table '{table}' must come after '{depends_on}'")]
    InvalidTableOrder { table: String, depends_on: String },

    #[error("Table '{0}' is listed more than once")]
    DuplicateTable(String),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}
