use crate::sql::base::{error::DbError, statement::PageStatement};
use async_trait::async_trait;

#[async_trait]
pub trait PageSink: Send {
    /// Runs `statement` in its own transaction. Commits on success and rolls
    /// back before returning any error. Returns the number of rows inserted.
    async fn write_page(&mut self, statement: &PageStatement) -> Result<u64, DbError>;
}
