use crate::sql::{
    base::{
        error::DbError,
        source::{Extraction, Extractor},
    },
    postgres::{adapter::PgAdapter, row::to_row_data},
};
use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt, future, stream::TryChunksError};
use planner::query::{
    ast::expr::Expr, builder::select::SelectBuilder, dialect::Postgres, renderer::render_sql,
};
use tracing::debug;

/// Reads whole tables from the destination namespace in fixed-size pages.
pub struct PgExtractor {
    adapter: PgAdapter,
    page_size: usize,
}

impl PgExtractor {
    pub fn new(adapter: PgAdapter, page_size: usize) -> Self {
        PgExtractor {
            adapter,
            page_size: page_size.max(1),
        }
    }
}

#[async_trait]
impl Extractor for PgExtractor {
    async fn extract<'a>(&'a mut self, table: &str) -> Result<Extraction<'a>, DbError> {
        if !self.adapter.table_exists(table).await? {
            return Ok(Extraction::Missing);
        }

        let select = SelectBuilder::new()
            .select(vec![Expr::Wildcard])
            .from(self.adapter.table_ref(table))
            .build();
        let (sql, _) = render_sql(&select, &Postgres);
        debug!(table, sql = %sql, "Scanning Postgres table");

        let rows = self
            .adapter
            .client()
            .query_raw(sql.as_str(), std::iter::empty::<String>())
            .await?;

        let table = table.to_string();
        let pages = rows
            .map_err(DbError::from)
            .and_then(move |row| future::ready(to_row_data(&row, &table)))
            .try_chunks(self.page_size)
            .map_err(|TryChunksError(_, err)| err)
            .boxed();

        Ok(Extraction::Pages(pages))
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}
