use crate::{
    error::MigrationError,
    execution::summary::{RunSummary, TableOutcome},
};
use connectors::sql::base::{
    destination::PageSink,
    source::{Extraction, Extractor},
};
use engine_config::settings::EtlSettings;
use engine_core::{
    error::EtlError,
    loader::{LoadOutcome, Loader},
    observer::{EtlEvent, EtlObserver},
    transform::transform,
};
use model::registry::RecordKind;
use std::{sync::Arc, time::Instant};

/// Moves the configured tables, in order, one page at a time.
pub struct Pipeline {
    tables: Vec<RecordKind>,
    batch_size: usize,
    loader: Loader,
    observer: Arc<dyn EtlObserver>,
}

impl Pipeline {
    pub fn new(settings: &EtlSettings, observer: Arc<dyn EtlObserver>) -> Self {
        Pipeline {
            tables: settings.tables.clone(),
            batch_size: settings.batch_size.get(),
            loader: Loader::new(&settings.postgres.schema, settings.mapping.clone()),
            observer,
        }
    }

    pub async fn execute<E, S>(
        &self,
        source: &mut E,
        sink: &mut S,
    ) -> Result<RunSummary, MigrationError>
    where
        E: Extractor + ?Sized,
        S: PageSink + ?Sized,
    {
        let started = Instant::now();
        self.observer.on_event(&EtlEvent::RunStarted {
            tables: self.tables.iter().map(|k| k.table().to_string()).collect(),
            batch_size: self.batch_size,
        });

        let mut summary = RunSummary::default();
        for kind in &self.tables {
            let outcome = self.execute_table(*kind, source, sink).await?;
            summary.push(kind.table(), outcome);
        }

        self.observer.on_event(&EtlEvent::RunFinished {
            tables: summary.tables.len(),
            duration_ms: started.elapsed().as_millis() as u64,
        });
        Ok(summary)
    }

    async fn execute_table<E, S>(
        &self,
        kind: RecordKind,
        source: &mut E,
        sink: &mut S,
    ) -> Result<TableOutcome, MigrationError>
    where
        E: Extractor + ?Sized,
        S: PageSink + ?Sized,
    {
        let table = kind.table();
        self.observer.on_event(&EtlEvent::TableStarted {
            table: table.to_string(),
        });

        let extraction = source
            .extract(table)
            .await
            .map_err(|e| MigrationError::table(table, EtlError::Source(e)))?;

        let pages = match extraction {
            Extraction::Missing => {
                self.observer.on_event(&EtlEvent::SourceTableMissing {
                    table: table.to_string(),
                });
                return Ok(TableOutcome::SourceMissing);
            }
            Extraction::Pages(pages) => pages,
        };

        let outcome = self
            .loader
            .load(sink, table, transform(pages, kind), self.observer.as_ref())
            .await
            .map_err(|e| MigrationError::table(table, e))?;

        if let LoadOutcome::Loaded {
            pages,
            rows,
            inserted,
        } = outcome
        {
            self.observer.on_event(&EtlEvent::TableFinished {
                table: table.to_string(),
                pages,
                rows,
                inserted,
            });
        }
        Ok(outcome.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use connectors::sql::base::{error::DbError, statement::PageStatement};
    use engine_config::{env::EnvManager, settings};
    use engine_core::observer::MemoryObserver;
    use futures_util::{StreamExt, stream};
    use model::{
        core::value::{FieldValue, Value},
        records::row::{Page, RowData},
    };
    use std::collections::HashMap;

    const GENRE_A: &str = "3d8d9bf5-0d90-4353-88ba-4ccc5d2c07ff";
    const GENRE_B: &str = "120a21cf-9097-479e-904a-13dd7198c1dd";
    const PERSON: &str = "b8531efb-c49d-4111-803f-725c3abc0f5e";

    struct FakeSource {
        tables: HashMap<&'static str, Vec<Page>>,
        fail_on: Option<&'static str>,
    }

    #[async_trait]
    impl Extractor for FakeSource {
        async fn extract<'a>(&'a mut self, table: &str) -> Result<Extraction<'a>, DbError> {
            if self.fail_on == Some(table) {
                return Err(DbError::QueryBuildError("scan failed".into()));
            }
            match self.tables.get(table) {
                Some(pages) => {
                    let pages: Vec<Result<Page, DbError>> =
                        pages.iter().cloned().map(Ok).collect();
                    Ok(Extraction::Pages(stream::iter(pages).boxed()))
                }
                None => Ok(Extraction::Missing),
            }
        }

        fn page_size(&self) -> usize {
            2
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        statements: Vec<PageStatement>,
        missing: Vec<&'static str>,
    }

    #[async_trait]
    impl PageSink for RecordingSink {
        async fn write_page(&mut self, statement: &PageStatement) -> Result<u64, DbError> {
            if self.missing.iter().any(|t| statement.table.ends_with(t)) {
                return Err(DbError::UndefinedTable {
                    table: statement.table.clone(),
                    message: format!("relation \"{}\" does not exist", statement.table),
                });
            }
            self.statements.push(statement.clone());
            Ok(statement.rows as u64)
        }
    }

    fn settings(tables: Vec<RecordKind>) -> EtlSettings {
        let env = EnvManager::from_pairs([
            (settings::SQLITE_DB, "db.sqlite"),
            (settings::POSTGRES_NAME, "movies_database"),
            (settings::POSTGRES_USER, "app"),
            (settings::POSTGRES_PASSWORD, "123qwe"),
            (settings::BATCH_SIZE, "2"),
        ]);
        EtlSettings::from_env(&env)
            .unwrap()
            .with_tables(tables)
            .unwrap()
    }

    fn text_row(table: &str, columns: &[(&str, &str)]) -> RowData {
        RowData::new(
            table,
            columns
                .iter()
                .map(|(name, value)| FieldValue::inferred(name, Value::String(value.to_string())))
                .collect(),
        )
    }

    fn genre(id: &str, name: &str) -> RowData {
        text_row("genre", &[("id", id), ("name", name)])
    }

    fn person(id: &str, name: &str) -> RowData {
        text_row("person", &[("id", id), ("full_name", name)])
    }

    #[tokio::test]
    async fn test_tables_load_in_order_with_source_gaps_skipped() {
        let mut source = FakeSource {
            tables: HashMap::from([
                (
                    "genre",
                    vec![
                        vec![genre(GENRE_A, "Action"), genre(GENRE_B, "Drama")],
                        vec![genre(GENRE_A, "Action")],
                    ],
                ),
                ("person", vec![vec![person(PERSON, "Ann")]]),
            ]),
            fail_on: None,
        };
        let mut sink = RecordingSink::default();
        let observer = Arc::new(MemoryObserver::new());
        let pipeline = Pipeline::new(
            &settings(vec![RecordKind::Genre, RecordKind::Person, RecordKind::FilmWork]),
            observer.clone(),
        );

        let summary = pipeline.execute(&mut source, &mut sink).await.unwrap();

        assert_eq!(
            summary.get("genre"),
            Some(&TableOutcome::Loaded {
                pages: 2,
                rows: 3,
                inserted: 3
            })
        );
        assert_eq!(summary.get("film_work"), Some(&TableOutcome::SourceMissing));
        assert_eq!(summary.total_rows(), 4);
        assert_eq!(summary.skipped().collect::<Vec<_>>(), vec!["film_work"]);

        let tables: Vec<&str> = sink.statements.iter().map(|s| s.table.as_str()).collect();
        assert_eq!(tables, vec!["content.genre", "content.genre", "content.person"]);

        let events = observer.events();
        assert!(matches!(events.first(), Some(EtlEvent::RunStarted { batch_size: 2, .. })));
        assert!(events.contains(&EtlEvent::SourceTableMissing {
            table: "film_work".into()
        }));
        assert!(matches!(events.last(), Some(EtlEvent::RunFinished { tables: 3, .. })));
    }

    #[tokio::test]
    async fn test_missing_destination_table_does_not_stop_the_run() {
        let mut source = FakeSource {
            tables: HashMap::from([
                ("genre", vec![vec![genre(GENRE_A, "Action")]]),
                ("person", vec![vec![person(PERSON, "Ann")]]),
            ]),
            fail_on: None,
        };
        let mut sink = RecordingSink {
            missing: vec!["genre"],
            ..Default::default()
        };
        let pipeline = Pipeline::new(
            &settings(vec![RecordKind::Genre, RecordKind::Person]),
            Arc::new(MemoryObserver::new()),
        );

        let summary = pipeline.execute(&mut source, &mut sink).await.unwrap();

        assert_eq!(
            summary.get("genre"),
            Some(&TableOutcome::DestinationMissing { pages_committed: 0 })
        );
        assert!(matches!(
            summary.get("person"),
            Some(TableOutcome::Loaded { rows: 1, .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_row_aborts_the_run() {
        let mut source = FakeSource {
            tables: HashMap::from([
                ("genre", vec![vec![genre("not-a-uuid", "Action")]]),
                ("person", vec![vec![person(PERSON, "Ann")]]),
            ]),
            fail_on: None,
        };
        let mut sink = RecordingSink::default();
        let pipeline = Pipeline::new(
            &settings(vec![RecordKind::Genre, RecordKind::Person]),
            Arc::new(MemoryObserver::new()),
        );

        let err = pipeline.execute(&mut source, &mut sink).await.unwrap_err();

        assert!(matches!(
            err,
            MigrationError::Table { ref table, source: EtlError::Record(_) } if table == "genre"
        ));
        assert!(sink.statements.is_empty());
    }

    #[tokio::test]
    async fn test_source_error_is_attributed_to_its_table() {
        let mut source = FakeSource {
            tables: HashMap::from([("genre", vec![vec![genre(GENRE_A, "Action")]])]),
            fail_on: Some("person"),
        };
        let mut sink = RecordingSink::default();
        let pipeline = Pipeline::new(
            &settings(vec![RecordKind::Genre, RecordKind::Person]),
            Arc::new(MemoryObserver::new()),
        );

        let err = pipeline.execute(&mut source, &mut sink).await.unwrap_err();

        assert!(matches!(
            err,
            MigrationError::Table { ref table, source: EtlError::Source(_) } if table == "person"
        ));
        assert_eq!(sink.statements.len(), 1);
    }
}
