//! Run settings assembled from the environment.

use crate::{env::EnvManager, error::SettingsError, mapping::ColumnMapping};
use model::registry::{RecordKind, Registry};
use std::{fmt, path::PathBuf};
use tracing::debug;

pub mod batch_size;
pub mod table_order;

pub use batch_size::BatchSize;
pub use table_order::validate_table_order;

pub const SQLITE_DB: &str = "SQLITE_DB";
pub const POSTGRES_NAME: &str = "POSTGRES_NAME";
pub const POSTGRES_USER: &str = "POSTGRES_USER";
pub const POSTGRES_PASSWORD: &str = "POSTGRES_PASSWORD";
pub const POSTGRES_HOST: &str = "POSTGRES_HOST";
pub const POSTGRES_PORT: &str = "POSTGRES_PORT";
pub const POSTGRES_SCHEMA: &str = "POSTGRES_SCHEMA";
pub const BATCH_SIZE: &str = "BATCH_SIZE";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5432;
const DEFAULT_SCHEMA: &str = "content";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteSettings {
    pub path: PathBuf,
}

#[derive(Clone, PartialEq, Eq)]
pub struct PostgresSettings {
    pub dbname: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub schema: String,
}

impl PostgresSettings {
    pub fn to_config(&self) -> tokio_postgres::Config {
        let mut config = tokio_postgres::Config::new();
        config
            .dbname(&self.dbname)
            .user(&self.user)
            .password(&self.password)
            .host(&self.host)
            .port(self.port)
            .application_name("sqlite-to-postgres");
        config
    }
}

impl fmt::Debug for PostgresSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresSettings")
            .field("dbname", &self.dbname)
            .field("user", &self.user)
            .field("password", &"***")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("schema", &self.schema)
            .finish()
    }
}

/// Everything one migration run needs. Built once and passed down explicitly.
#[derive(Debug, Clone)]
pub struct EtlSettings {
    pub sqlite: SqliteSettings,
    pub postgres: PostgresSettings,
    pub batch_size: BatchSize,
    pub mapping: ColumnMapping,
    pub tables: Vec<RecordKind>,
}

impl EtlSettings {
    pub fn from_env(env: &EnvManager) -> Result<Self, SettingsError> {
        let sqlite = SqliteSettings {
            path: PathBuf::from(env.require(SQLITE_DB)?),
        };

        let postgres = PostgresSettings {
            dbname: env.require(POSTGRES_NAME)?.to_string(),
            user: env.require(POSTGRES_USER)?.to_string(),
            password: env.require(POSTGRES_PASSWORD)?.to_string(),
            host: env.get_or(POSTGRES_HOST, DEFAULT_HOST),
            port: env.parse_or(POSTGRES_PORT, DEFAULT_PORT)?,
            schema: env.get_or(POSTGRES_SCHEMA, DEFAULT_SCHEMA),
        };

        let batch_size = BatchSize::new(env.parse_or(BATCH_SIZE, BatchSize::DEFAULT)?)?;

        let settings = EtlSettings {
            sqlite,
            postgres,
            batch_size,
            mapping: ColumnMapping::catalogue(),
            tables: RecordKind::ALL.to_vec(),
        };
        settings.validate()?;

        debug!(
            sqlite = %settings.sqlite.path.display(),
            host = %settings.postgres.host,
            schema = %settings.postgres.schema,
            batch_size = %settings.batch_size,
            "Loaded settings"
        );
        Ok(settings)
    }

    pub fn with_tables(mut self, tables: Vec<RecordKind>) -> Result<Self, SettingsError> {
        self.tables = tables;
        self.validate()?;
        Ok(self)
    }

    pub fn with_batch_size(mut self, size: usize) -> Result<Self, SettingsError> {
        self.batch_size = BatchSize::new(size)?;
        Ok(self)
    }

    pub fn with_sqlite_path(mut self, path: PathBuf) -> Self {
        self.sqlite.path = path;
        self
    }

    /// Checks the table list against the record registry and its order.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let registry = Registry::standard()?;
        for kind in &self.tables {
            registry.resolve(kind.table())?;
        }
        validate_table_order(&self.tables)
    }
}
