use crate::sql::{
    base::{destination::PageSink, error::DbError, statement::PageStatement},
    postgres::{adapter::PgAdapter, params::PgParamStore},
};
use async_trait::async_trait;
use tokio_postgres::error::SqlState;
use tracing::{debug, warn};

/// Writes rendered pages to Postgres, one transaction per page.
pub struct PgDestination {
    adapter: PgAdapter,
}

impl PgDestination {
    pub fn new(adapter: PgAdapter) -> Self {
        PgDestination { adapter }
    }
}

#[async_trait]
impl PageSink for PgDestination {
    async fn write_page(&mut self, statement: &PageStatement) -> Result<u64, DbError> {
        let bindings = PgParamStore::from_statement(statement);
        let tx = self.adapter.client_mut().transaction().await?;

        match tx.execute(statement.sql.as_str(), &bindings.as_refs()).await {
            Ok(inserted) => {
                tx.commit().await?;
                debug!(
                    table = %statement.table,
                    rows = statement.rows,
                    inserted,
                    "Committed page"
                );
                Ok(inserted)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(table = %statement.table, error = %rollback_err, "Rollback failed");
                }
                Err(classify(err, &statement.table))
            }
        }
    }
}

/// Maps a missing relation or namespace to `DbError::UndefinedTable`.
fn classify(err: tokio_postgres::Error, table: &str) -> DbError {
    match err.code() {
        Some(code) if *code == SqlState::UNDEFINED_TABLE || *code == SqlState::INVALID_SCHEMA_NAME => {
            let message = err
                .as_db_error()
                .map(|db| db.message().to_string())
                .unwrap_or_else(|| err.to_string());
            DbError::UndefinedTable {
                table: table.to_string(),
                message,
            }
        }
        _ => DbError::Postgres(err),
    }
}
