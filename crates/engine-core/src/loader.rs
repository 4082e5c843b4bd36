//! Writes record pages to the destination with idempotent inserts.

use crate::{
    error::EtlError,
    observer::{EtlEvent, EtlObserver},
    transform::RecordPage,
};
use connectors::sql::base::{destination::PageSink, error::DbError, statement::PageStatement};
use engine_config::mapping::{ColumnMapping, ColumnTarget};
use futures_util::{Stream, TryStreamExt, pin_mut};
use model::{core::data_type::DataType, error::RecordError, registry::AnyRecord};
use planner::query::{
    ast::{common::TableRef, expr::Expr},
    builder::insert::InsertBuilder,
    dialect::{Dialect, Postgres},
    renderer::render_sql,
};

pub const CONFLICT_COLUMN: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded {
        pages: usize,
        rows: usize,
        inserted: u64,
    },
    /// The destination table is absent. Pages before the failing one stay
    /// committed; the rest were not attempted.
    DestinationMissing { pages_committed: usize },
}

pub struct Loader {
    namespace: String,
    mapping: ColumnMapping,
    dialect: Postgres,
}

impl Loader {
    pub fn new(namespace: &str, mapping: ColumnMapping) -> Self {
        Loader {
            namespace: namespace.to_string(),
            mapping,
            dialect: Postgres,
        }
    }

    /// Builds the single multi-row INSERT for one page.
    ///
    /// Columns come from the first record; every other record must carry the
    /// same fields in the same order.
    pub fn build_statement(&self, table: &str, page: RecordPage) -> Result<PageStatement, EtlError> {
        let rows = page.len();
        let mut records = page.into_iter().map(AnyRecord::into_fields);

        let Some(first) = records.next() else {
            return Err(EtlError::Record(RecordError::SchemaMismatch {
                table: table.to_string(),
                columns: Vec::new(),
            }));
        };

        let source_fields: Vec<String> = first.iter().map(|f| f.name.clone()).collect();
        let kept: Vec<(usize, &str)> = source_fields
            .iter()
            .enumerate()
            .filter_map(|(i, name)| match self.mapping.target(name) {
                ColumnTarget::Column(column) => Some((i, column)),
                ColumnTarget::Dropped => None,
            })
            .collect();
        let columns: Vec<&str> = kept.iter().map(|(_, column)| *column).collect();

        let mut builder = InsertBuilder::new(TableRef::qualified(&self.namespace, table))
            .columns(&columns)
            .on_conflict_do_nothing(&[CONFLICT_COLUMN]);
        let mut param_types: Vec<DataType> = Vec::with_capacity(rows * kept.len());

        for fields in std::iter::once(first).chain(records) {
            let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
            if names != source_fields {
                return Err(EtlError::Record(RecordError::SchemaMismatch {
                    table: table.to_string(),
                    columns: names.into_iter().map(str::to_string).collect(),
                }));
            }

            let mut fields: Vec<Option<_>> = fields.into_iter().map(Some).collect();
            let mut row = Vec::with_capacity(kept.len());
            for (index, _) in &kept {
                if let Some(field) = fields[*index].take() {
                    param_types.push(field.data_type);
                    row.push(Expr::Value(field.value));
                }
            }
            builder = builder.values(row);
        }

        let insert = builder.build();
        let limit = self.dialect.max_bind_params();
        let needed = insert.param_count();
        if needed > limit {
            return Err(EtlError::TooManyParameters {
                table: table.to_string(),
                params: needed,
                limit,
            });
        }

        let (sql, params) = render_sql(&insert, &self.dialect);
        Ok(PageStatement {
            table: format!("{}.{}", self.namespace, table),
            sql,
            params,
            param_types,
            rows,
        })
    }

    /// Loads pages in order, one statement and one transaction per page.
    ///
    /// A missing destination table ends the table with
    /// [`LoadOutcome::DestinationMissing`]; every other error is returned.
    pub async fn load<S, P>(
        &self,
        sink: &mut S,
        table: &str,
        pages: P,
        observer: &dyn EtlObserver,
    ) -> Result<LoadOutcome, EtlError>
    where
        S: PageSink + ?Sized,
        P: Stream<Item = Result<RecordPage, EtlError>>,
    {
        pin_mut!(pages);

        let mut committed = 0usize;
        let mut rows = 0usize;
        let mut inserted = 0u64;

        while let Some(page) = pages.try_next().await? {
            if page.is_empty() {
                continue;
            }

            let statement = self.build_statement(table, page)?;
            match sink.write_page(&statement).await {
                Ok(count) => {
                    committed += 1;
                    rows += statement.rows;
                    inserted += count;
                    observer.on_event(&EtlEvent::PageLoaded {
                        table: table.to_string(),
                        page: committed,
                        rows: statement.rows,
                        inserted: count,
                    });
                }
                Err(DbError::UndefinedTable { message, .. }) => {
                    observer.on_event(&EtlEvent::DestinationTableMissing {
                        table: table.to_string(),
                        pages_committed: committed,
                        message,
                    });
                    return Ok(LoadOutcome::DestinationMissing {
                        pages_committed: committed,
                    });
                }
                Err(err) => return Err(EtlError::Destination(err)),
            }
        }

        Ok(LoadOutcome::Loaded {
            pages: committed,
            rows,
            inserted,
        })
    }
}
