use crate::sql::{
    base::error::{ConnectorError, DbError},
    sqlite::params::bind_values,
};
use model::core::value::Value;
use planner::query::{
    ast::{common::TableRef, expr::Expr, select::Select},
    builder::select::SelectBuilder,
    dialect::Sqlite as SqliteDialect,
    ident,
    renderer::render_sql,
    value,
};
use sqlx::{
    ConnectOptions, Connection,
    sqlite::{SqliteConnectOptions, SqliteConnection},
};
use std::path::Path;
use tracing::debug;

/// A single read-only connection to an SQLite database file.
pub struct SqliteAdapter {
    conn: SqliteConnection,
}

impl SqliteAdapter {
    pub async fn open(path: &Path) -> Result<Self, ConnectorError> {
        if !path.exists() {
            return Err(ConnectorError::InvalidConfig(format!(
                "SQLite database '{}' does not exist",
                path.display()
            )));
        }

        let conn = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .connect()
            .await?;
        debug!(path = %path.display(), "Opened SQLite database");
        Ok(SqliteAdapter { conn })
    }

    /// Wraps an already open connection, e.g. an in-memory database.
    pub fn from_connection(conn: SqliteConnection) -> Self {
        SqliteAdapter { conn }
    }

    pub async fn table_exists(&mut self, table: &str) -> Result<bool, DbError> {
        let (sql, params) = render_sql(&table_exists_query(table), &SqliteDialect);
        let row = bind_values(sqlx::query(&sql), params)
            .fetch_optional(&mut self.conn)
            .await?;
        Ok(row.is_some())
    }

    pub async fn ping(&mut self) -> Result<(), DbError> {
        self.conn.ping().await?;
        Ok(())
    }

    pub async fn close(self) -> Result<(), DbError> {
        self.conn.close().await?;
        Ok(())
    }

    pub(crate) fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }
}

fn table_exists_query(table: &str) -> Select {
    SelectBuilder::new()
        .select(vec![ident("name")])
        .from(TableRef::new("sqlite_master"))
        .where_clause(Expr::and(
            Expr::eq(ident("type"), value(Value::String("table".into()))),
            Expr::eq(ident("name"), value(Value::String(table.to_string()))),
        ))
        .build()
}
