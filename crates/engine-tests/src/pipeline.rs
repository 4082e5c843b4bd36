//! End-to-end runs over an in-memory SQLite catalogue and a recording sink.

#[cfg(test)]
mod tests {
    use crate::{
        TOTAL_SEED_ROWS, seeded_adapter, seeded_sqlite, test_settings,
        utils::{RecordingSink, inserted_columns, row_values},
    };
    use chrono::Utc;
    use connectors::sql::sqlite::{adapter::SqliteAdapter, source::SqliteExtractor};
    use engine_config::settings::EtlSettings;
    use engine_core::{
        error::EtlError,
        observer::{EtlEvent, MemoryObserver},
    };
    use engine_runtime::{
        error::MigrationError,
        execution::{pipeline::Pipeline, summary::TableOutcome},
    };
    use model::{
        core::value::Value, error::RecordError, registry::RecordKind,
        schema::coerce::parse_timestamp,
    };
    use sqlx::SqliteConnection;
    use std::{path::Path, sync::Arc};
    use tracing_test::traced_test;
    use verifier::{
        TableCheck, Verifier,
        report::{CODE_FIELD, TableStatus},
    };

    const EMPIRE: &str = "0312ed51-8833-413f-bff5-0e139c11264a";
    const NEW_HOPE: &str = "3d825f60-9fff-4dfe-b294-1a45fa1e115d";

    fn settings() -> EtlSettings {
        test_settings(Path::new("catalogue.sqlite"))
    }

    fn extractor(adapter: SqliteAdapter, settings: &EtlSettings) -> SqliteExtractor {
        SqliteExtractor::new(adapter, settings.batch_size.get())
    }

    async fn altered(sql: &str) -> SqliteAdapter {
        let mut conn: SqliteConnection = seeded_sqlite().await;
        sqlx::raw_sql(sql)
            .execute(&mut conn)
            .await
            .expect("alter sqlite fixture");
        SqliteAdapter::from_connection(conn)
    }

    // Scenario: every table exists on both sides; pages hold at most 2 rows.
    // Expected Outcome:
    // - Tables are loaded in dependency order, one statement per page.
    // - Renamed timestamp columns carry the source values and `file_path` is
    //   never sent.
    #[traced_test]
    #[tokio::test]
    async fn tc01_full_catalogue_in_pages() {
        let settings = settings();
        let mut source = extractor(seeded_adapter().await, &settings);
        let mut sink = RecordingSink::default();
        let observer = Arc::new(MemoryObserver::new());

        let summary = Pipeline::new(&settings, observer.clone())
            .execute(&mut source, &mut sink)
            .await
            .unwrap();

        assert_eq!(
            sink.tables(),
            vec![
                "content.genre",
                "content.genre",
                "content.person",
                "content.film_work",
                "content.film_work",
                "content.genre_film_work",
                "content.genre_film_work",
                "content.person_film_work",
            ]
        );
        assert!(sink.statements.iter().all(|s| s.rows <= 2 && s.rows > 0));
        assert_eq!(summary.total_rows(), TOTAL_SEED_ROWS);
        assert_eq!(
            summary.get("film_work"),
            Some(&TableOutcome::Loaded {
                pages: 2,
                rows: 3,
                inserted: 3
            })
        );

        let film_work = sink.statements_for("content.film_work");
        assert_eq!(
            inserted_columns(film_work[0]),
            vec![
                "id",
                "title",
                "type",
                "description",
                "creation_date",
                "rating",
                "created",
                "modified"
            ]
        );
        assert!(film_work.iter().all(|s| s.sql.ends_with(r#"ON CONFLICT ("id") DO NOTHING"#)));
        assert!(sink.statements.iter().all(|s| !s.sql.contains("file_path")));

        let new_hope_id = Value::Uuid(NEW_HOPE.parse().unwrap());
        let new_hope = film_work
            .iter()
            .find_map(|s| row_values(s, &new_hope_id))
            .expect("new hope row");
        assert_eq!(
            new_hope["created"],
            Value::Timestamp(parse_timestamp("2021-06-16 20:14:09.221838+00").unwrap())
        );
        assert_eq!(
            new_hope["modified"],
            Value::Timestamp(parse_timestamp("2021-06-16 20:14:09.221855+00").unwrap())
        );
        assert!(!new_hope.contains_key("created_at"));
        assert!(!new_hope.contains_key("updated_at"));

        let pages_loaded = observer
            .events()
            .iter()
            .filter(|e| matches!(e, EtlEvent::PageLoaded { .. }))
            .count();
        assert_eq!(pages_loaded, sink.statements.len());
    }

    // Scenario: the same catalogue is loaded twice into the same destination.
    // Expected Outcome: the second run sends every row again but inserts none.
    #[tokio::test]
    async fn tc02_rerun_inserts_nothing() {
        let settings = settings();
        let mut source = extractor(seeded_adapter().await, &settings);
        let mut sink = RecordingSink::default();
        let pipeline = Pipeline::new(&settings, Arc::new(MemoryObserver::new()));

        pipeline.execute(&mut source, &mut sink).await.unwrap();
        let rerun = pipeline.execute(&mut source, &mut sink).await.unwrap();

        assert_eq!(rerun.total_rows(), TOTAL_SEED_ROWS);
        for table in &rerun.tables {
            assert!(
                matches!(table.outcome, TableOutcome::Loaded { inserted: 0, .. }),
                "'{}' inserted rows on rerun: {:?}",
                table.table,
                table.outcome
            );
        }
    }

    // Scenario: the SQLite file has no `person_film_work` table.
    // Expected Outcome: the table is reported and skipped; the run succeeds.
    #[tokio::test]
    async fn tc03_missing_source_table_is_skipped() {
        let settings = settings();
        let mut source = extractor(altered("DROP TABLE person_film_work").await, &settings);
        let mut sink = RecordingSink::default();
        let observer = Arc::new(MemoryObserver::new());

        let summary = Pipeline::new(&settings, observer.clone())
            .execute(&mut source, &mut sink)
            .await
            .unwrap();

        assert_eq!(
            summary.get("person_film_work"),
            Some(&TableOutcome::SourceMissing)
        );
        assert_eq!(summary.total_rows(), TOTAL_SEED_ROWS - 2);
        assert!(sink.statements_for("content.person_film_work").is_empty());
        assert!(observer.events().contains(&EtlEvent::SourceTableMissing {
            table: "person_film_work".into(),
        }));
    }

    // Scenario: the destination namespace has no `genre` table.
    // Expected Outcome: `genre` is abandoned after its first page; later
    // tables still load.
    #[tokio::test]
    async fn tc04_missing_destination_table_is_skipped() {
        let settings = settings();
        let mut source = extractor(seeded_adapter().await, &settings);
        let mut sink = RecordingSink::missing(&["genre"]);
        let observer = Arc::new(MemoryObserver::new());

        let summary = Pipeline::new(&settings, observer.clone())
            .execute(&mut source, &mut sink)
            .await
            .unwrap();

        assert_eq!(
            summary.get("genre"),
            Some(&TableOutcome::DestinationMissing { pages_committed: 0 })
        );
        assert_eq!(sink.rows_for("content.person"), 2);
        assert_eq!(sink.rows_for("content.person_film_work"), 2);
        assert_eq!(summary.skipped().collect::<Vec<_>>(), vec!["genre"]);
        assert!(observer.events().iter().any(|e| matches!(
            e,
            EtlEvent::DestinationTableMissing { table, pages_committed: 0, .. } if table == "genre"
        )));
    }

    // Scenario: the `person` table carries a column no record declares.
    // Expected Outcome: the run stops at `person`; `genre` stays loaded and
    // later tables are never attempted.
    #[tokio::test]
    async fn tc05_unexpected_column_is_fatal() {
        let settings = settings();
        let mut source = extractor(
            altered("ALTER TABLE person ADD COLUMN nickname TEXT").await,
            &settings,
        );
        let mut sink = RecordingSink::default();

        let err = Pipeline::new(&settings, Arc::new(MemoryObserver::new()))
            .execute(&mut source, &mut sink)
            .await
            .unwrap_err();

        match err {
            MigrationError::Table {
                table,
                source: EtlError::Record(RecordError::SchemaMismatch { columns, .. }),
            } => {
                assert_eq!(table, "person");
                assert_eq!(columns, vec!["nickname".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(sink.rows_for("content.genre"), 3);
        assert!(sink.statements_for("content.film_work").is_empty());
    }

    // Scenario: a film work is rated outside the allowed range.
    // Expected Outcome: record construction fails and the run stops.
    #[tokio::test]
    async fn tc06_out_of_range_rating_is_fatal() {
        let settings = settings();
        let mut source = extractor(
            altered("UPDATE film_work SET rating = 11 WHERE type = 'tv_series'").await,
            &settings,
        );
        let mut sink = RecordingSink::default();

        let err = Pipeline::new(&settings, Arc::new(MemoryObserver::new()))
            .execute(&mut source, &mut sink)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            MigrationError::Table {
                ref table,
                source: EtlError::Record(RecordError::InvalidValue { ref field, .. }),
            } if table == "film_work" && field == "rating"
        ));
    }

    // Scenario: some rows have NULL timestamps.
    // Expected Outcome: the loader binds a UTC time taken during the run,
    // never NULL.
    #[tokio::test]
    async fn tc07_absent_timestamps_are_defaulted() {
        let settings = settings().with_tables(vec![RecordKind::FilmWork]).unwrap();
        let mut source = extractor(seeded_adapter().await, &settings);
        let mut sink = RecordingSink::default();
        let before = Utc::now();

        Pipeline::new(&settings, Arc::new(MemoryObserver::new()))
            .execute(&mut source, &mut sink)
            .await
            .unwrap();
        let after = Utc::now();

        let empire_id = Value::Uuid(EMPIRE.parse().unwrap());
        let statement = sink
            .statements_for("content.film_work")
            .into_iter()
            .find(|s| s.params.contains(&empire_id))
            .expect("statement with the empire row");
        let row = row_values(statement, &empire_id).unwrap();

        for name in ["created", "modified"] {
            match &row[name] {
                Value::Timestamp(ts) => assert!(*ts >= before && *ts <= after),
                other => panic!("{name} bound as {other:?}"),
            }
        }
    }

    // Scenario: two SQLite stores hold the same catalogue except one genre name.
    // Expected Outcome: only `genre` is reported, at the changed field.
    #[tokio::test]
    async fn tc08_verifier_pinpoints_changed_field() {
        let settings = settings();
        let mut left = extractor(seeded_adapter().await, &settings);
        let mut right = extractor(
            altered("UPDATE genre SET name = 'Sci-Fi' WHERE name = 'Fantasy'").await,
            &settings,
        );
        let verifier = Verifier::new(TableCheck::for_tables(&RecordKind::ALL)).unwrap();

        let report = verifier.verify(&mut left, &mut right).await.unwrap();

        let genre = report.get("genre").unwrap();
        assert_eq!(genre.status, TableStatus::Mismatch);
        assert_eq!(genre.findings.len(), 1);
        assert_eq!(genre.findings[0].code, CODE_FIELD);
        assert_eq!(genre.findings[0].field.as_deref(), Some("name"));
        assert_eq!(report.failed().count(), 1);
    }
}
