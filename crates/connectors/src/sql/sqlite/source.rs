use crate::sql::{
    base::{
        error::DbError,
        source::{Extraction, Extractor},
    },
    sqlite::{adapter::SqliteAdapter, row::to_row_data},
};
use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt, future, stream::TryChunksError};
use planner::query::{
    ast::{common::TableRef, expr::Expr},
    builder::select::SelectBuilder,
    dialect::Sqlite as SqliteDialect,
    renderer::render_sql,
};
use tracing::debug;

/// Reads whole tables from SQLite in fixed-size pages.
pub struct SqliteExtractor {
    adapter: SqliteAdapter,
    page_size: usize,
    statement: String,
}

impl SqliteExtractor {
    pub fn new(adapter: SqliteAdapter, page_size: usize) -> Self {
        SqliteExtractor {
            adapter,
            page_size: page_size.max(1),
            statement: String::new(),
        }
    }

    /// Closes the underlying connection gracefully.
    pub async fn close(self) -> Result<(), DbError> {
        self.adapter.close().await
    }
}

pub(crate) fn select_all(table: TableRef) -> planner::query::ast::select::Select {
    SelectBuilder::new()
        .select(vec![Expr::Wildcard])
        .from(table)
        .build()
}

#[async_trait]
impl Extractor for SqliteExtractor {
    async fn extract<'a>(&'a mut self, table: &str) -> Result<Extraction<'a>, DbError> {
        if !self.adapter.table_exists(table).await? {
            return Ok(Extraction::Missing);
        }

        let (sql, _) = render_sql(&select_all(TableRef::new(table)), &SqliteDialect);
        debug!(table, sql = %sql, "Scanning SQLite table");
        self.statement = sql;

        let table = table.to_string();
        let page_size = self.page_size;
        // Split borrows: the stream holds the SQL text and the connection at once.
        let statement = self.statement.as_str();
        let conn = self.adapter.connection();

        let pages = sqlx::query(statement)
            .fetch(conn)
            .map_err(DbError::from)
            .and_then(move |row| {
                let decoded = to_row_data(&row, &table);
                future::ready(decoded)
            })
            .try_chunks(page_size)
            .map_err(|TryChunksError(_, err)| err)
            .boxed();

        Ok(Extraction::Pages(pages))
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}
