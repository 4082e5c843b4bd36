use crate::sql::{
    base::error::{ConnectorError, DbError},
    postgres::{params::PgParamStore, utils::connect_client},
};
use model::core::value::Value;
use planner::query::{
    ast::{common::TableRef, expr::Expr, select::Select},
    builder::select::SelectBuilder,
    dialect::Postgres,
    ident,
    renderer::render_sql,
    value,
};
use tokio_postgres::{Client, Config};
use tracing::debug;

/// Owns one Postgres client bound to a target namespace.
pub struct PgAdapter {
    client: Client,
    schema: String,
}

impl PgAdapter {
    pub async fn connect(config: Config, schema: &str) -> Result<Self, ConnectorError> {
        if config.get_hosts().is_empty() {
            return Err(ConnectorError::InvalidConfig(
                "no Postgres host configured".to_string(),
            ));
        }

        let client = connect_client(config).await?;
        debug!(schema, "Connected to Postgres");
        Ok(PgAdapter {
            client,
            schema: schema.to_string(),
        })
    }

    pub fn table_ref(&self, table: &str) -> TableRef {
        TableRef::qualified(&self.schema, table)
    }

    pub async fn ping(&self) -> Result<(), DbError> {
        self.client.simple_query("SELECT 1").await?;
        Ok(())
    }

    pub async fn table_exists(&self, table: &str) -> Result<bool, DbError> {
        let (sql, params) = render_sql(&table_exists_query(&self.schema, table), &Postgres);
        let bindings = PgParamStore::from_values(params);
        let row = self.client.query_opt(&sql, &bindings.as_refs()).await?;
        Ok(row.is_some())
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn client_mut(&mut self) -> &mut Client {
        &mut self.client
    }
}

fn table_exists_query(schema: &str, table: &str) -> Select {
    SelectBuilder::new()
        .select(vec![ident("tablename")])
        .from(TableRef::qualified("pg_catalog", "pg_tables"))
        .where_clause(Expr::and(
            Expr::eq(ident("schemaname"), value(Value::String(schema.to_string()))),
            Expr::eq(ident("tablename"), value(Value::String(table.to_string()))),
        ))
        .build()
}
