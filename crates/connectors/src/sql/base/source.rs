use crate::sql::base::error::DbError;
use async_trait::async_trait;
use futures_util::stream::BoxStream;
use model::records::row::Page;

/// A lazy sequence of non-empty pages read from one full scan of a table.
pub type PageStream<'a> = BoxStream<'a, Result<Page, DbError>>;

/// Result of asking a store for a table's rows.
pub enum Extraction<'a> {
    Pages(PageStream<'a>),
    /// The store has no such table. Not an error: callers report it and move on.
    Missing,
}

impl Extraction<'_> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Extraction::Missing)
    }
}

#[async_trait]
pub trait Extractor: Send {
    /// Starts a single scan of `table`. The returned stream borrows the
    /// extractor's connection until it is dropped.
    async fn extract<'a>(&'a mut self, table: &str) -> Result<Extraction<'a>, DbError>;

    fn page_size(&self) -> usize;
}
