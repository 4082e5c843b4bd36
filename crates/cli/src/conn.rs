use crate::error::CliError;
use async_trait::async_trait;
use connectors::sql::{postgres::adapter::PgAdapter, sqlite::adapter::SqliteAdapter};
use engine_config::settings::{EtlSettings, PostgresSettings, SqliteSettings};
use tracing::{error, info};

/// Trait for "pinging" a data store
#[async_trait]
pub trait ConnectionPinger {
    /// Attempts to ping; returns Err if unreachable
    async fn ping(&self) -> Result<(), CliError>;
}

pub struct SqlitePinger<'a> {
    pub settings: &'a SqliteSettings,
}

pub struct PostgresPinger<'a> {
    pub settings: &'a PostgresSettings,
}

#[async_trait]
impl ConnectionPinger for SqlitePinger<'_> {
    async fn ping(&self) -> Result<(), CliError> {
        let path = self.settings.path.display();
        info!("Pinging SQLite at '{path}'");

        let mut adapter = SqliteAdapter::open(&self.settings.path).await.map_err(|e| {
            error!("SQLite open of '{path}' failed: {e}");
            e
        })?;
        adapter.ping().await.map_err(|e| {
            error!("SQLite ping on '{path}' failed: {e}");
            e
        })?;
        adapter.close().await?;

        info!("SQLite ping to '{path}' succeeded");
        Ok(())
    }
}

#[async_trait]
impl ConnectionPinger for PostgresPinger<'_> {
    async fn ping(&self) -> Result<(), CliError> {
        let target = format!(
            "{}:{}/{}",
            self.settings.host, self.settings.port, self.settings.dbname
        );
        info!("Pinging Postgres at '{target}'");

        let adapter = PgAdapter::connect(self.settings.to_config(), &self.settings.schema)
            .await
            .map_err(|e| {
                error!("Postgres connection to '{target}' failed: {e}");
                e
            })?;
        adapter.ping().await.map_err(|e| {
            error!("Postgres ping on '{target}' failed: {e}");
            e
        })?;

        info!("Postgres ping to '{target}' succeeded");
        Ok(())
    }
}

/// Pings both stores, reporting every failure before returning the first.
pub async fn test_connections(settings: &EtlSettings) -> Result<(), CliError> {
    let sqlite = SqlitePinger {
        settings: &settings.sqlite,
    }
    .ping()
    .await;
    let postgres = PostgresPinger {
        settings: &settings.postgres,
    }
    .ping()
    .await;
    sqlite.and(postgres)
}
