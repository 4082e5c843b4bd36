//! Compares what the source holds with what landed in the destination.

use crate::{
    check::TableCheck,
    error::VerifyError,
    report::{
        CODE_MISSING_ROW, CODE_ROW_COUNT, CODE_UNEXPECTED_ROW, Finding, TableReport,
        TableStatus, VerificationReport,
    },
};
use connectors::sql::base::{
    error::DbError,
    source::{Extraction, Extractor},
};
use engine_config::settings::EtlSettings;
use engine_runtime::execution::factory;
use futures_util::TryStreamExt;
use model::core::value::Value;
use std::collections::BTreeMap;
use tracing::{info, warn};

const SOURCE: &str = "source";
const DESTINATION: &str = "destination";

/// One store's view of a table.
#[derive(Default)]
struct Projection {
    /// Every row read, duplicates of an id included.
    rows: usize,
    /// Rows keyed by their normalized id; values follow the check's field order.
    by_id: BTreeMap<String, Vec<Value>>,
}

pub struct Verifier {
    checks: Vec<TableCheck>,
}

impl Verifier {
    pub fn new(checks: Vec<TableCheck>) -> Result<Self, VerifyError> {
        if let Some(empty) = checks.iter().find(|c| c.fields.is_empty()) {
            return Err(VerifyError::EmptyCheck(empty.table.clone()));
        }
        Ok(Verifier { checks })
    }

    pub async fn verify<A, B>(
        &self,
        source: &mut A,
        destination: &mut B,
    ) -> Result<VerificationReport, VerifyError>
    where
        A: Extractor + ?Sized,
        B: Extractor + ?Sized,
    {
        let mut report = VerificationReport::default();
        for check in &self.checks {
            let left = project(source, check)
                .await
                .map_err(|source| read_error(check, SOURCE, source))?;
            let right = project(destination, check)
                .await
                .map_err(|source| read_error(check, DESTINATION, source))?;

            let table = compare(check, left, right);
            match table.status {
                TableStatus::Match => info!(
                    table = %table.table,
                    rows = table.source_rows.unwrap_or_default(),
                    "Table consistent"
                ),
                status => warn!(
                    table = %table.table,
                    ?status,
                    findings = table.findings.len() + table.truncated,
                    "Table inconsistent"
                ),
            }
            report.tables.push(table);
        }
        Ok(report)
    }
}

fn read_error(check: &TableCheck, store: &'static str, source: DbError) -> VerifyError {
    VerifyError::Read {
        table: check.table.clone(),
        store,
        source,
    }
}

/// Verifies the configured tables of one run's stores.
pub async fn run(settings: &EtlSettings) -> Result<VerificationReport, VerifyError> {
    let verifier = Verifier::new(TableCheck::for_tables(&settings.tables))?;
    let mut source = factory::open_source(settings).await?;
    let mut destination = match factory::open_destination_reader(settings).await {
        Ok(destination) => destination,
        Err(err) => {
            if let Err(close_err) = source.close().await {
                warn!(error = %close_err, "Failed to close SQLite connection");
            }
            return Err(err.into());
        }
    };

    let result = verifier.verify(&mut source, &mut destination).await;

    if let Err(close_err) = source.close().await {
        warn!(error = %close_err, "Failed to close SQLite connection");
    }
    result
}

async fn project<E: Extractor + ?Sized>(
    store: &mut E,
    check: &TableCheck,
) -> Result<Option<Projection>, DbError> {
    let pages = match store.extract(&check.table).await? {
        Extraction::Missing => return Ok(None),
        Extraction::Pages(pages) => pages,
    };

    let projection = pages
        .try_fold(Projection::default(), |mut acc, page| async move {
            for row in page {
                let values: Vec<Value> = check
                    .fields
                    .iter()
                    .map(|field| row.get_value(field).normalized())
                    .collect();
                let id = values.first().map(id_key).unwrap_or_default();
                acc.rows += 1;
                acc.by_id.insert(id, values);
            }
            Ok(acc)
        })
        .await?;
    Ok(Some(projection))
}

fn id_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn compare(check: &TableCheck, source: Option<Projection>, destination: Option<Projection>) -> TableReport {
    let (source, destination) = match (source, destination) {
        (None, _) => return TableReport::new(&check.table, TableStatus::SourceMissing),
        (Some(source), None) => {
            let mut report = TableReport::new(&check.table, TableStatus::DestinationMissing);
            report.source_rows = Some(source.rows);
            return report;
        }
        (Some(source), Some(destination)) => (source, destination),
    };

    let mut report = TableReport::new(&check.table, TableStatus::Match);
    report.source_rows = Some(source.rows);
    report.destination_rows = Some(destination.rows);

    if source.rows != destination.rows {
        report.add(Finding::new(
            CODE_ROW_COUNT,
            format!(
                "source has {} rows, destination has {}",
                source.rows, destination.rows
            ),
        ));
    }

    let (source, destination) = (source.by_id, destination.by_id);
    for (id, left) in &source {
        let Some(right) = destination.get(id) else {
            report.add(Finding::row(
                CODE_MISSING_ROW,
                id,
                "row is absent from the destination".into(),
            ));
            continue;
        };
        for ((field, a), b) in check.fields.iter().zip(left).zip(right) {
            if !a.equal(b) {
                report.add(Finding::field(id, field, format!("source {a}, destination {b}")));
            }
        }
    }

    for id in destination.keys().filter(|id| !source.contains_key(*id)) {
        report.add(Finding::row(
            CODE_UNEXPECTED_ROW,
            id,
            "row is absent from the source".into(),
        ));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::CODE_FIELD;
    use async_trait::async_trait;
    use futures_util::{StreamExt, stream};
    use model::{
        core::value::FieldValue,
        records::row::{Page, RowData},
    };
    use std::collections::HashMap;

    const A: &str = "3d8d9bf5-0d90-4353-88ba-4ccc5d2c07ff";
    const B: &str = "120a21cf-9097-479e-904a-13dd7198c1dd";

    struct FakeStore {
        tables: HashMap<&'static str, Vec<Page>>,
    }

    #[async_trait]
    impl Extractor for FakeStore {
        async fn extract<'a>(&'a mut self, table: &str) -> Result<Extraction<'a>, DbError> {
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
            100
        }
    }

    fn genre(id: Value, name: &str, description: Value) -> RowData {
        RowData::new(
            "genre",
            vec![
                FieldValue::inferred("id", id),
                FieldValue::inferred("name", Value::String(name.into())),
                FieldValue::inferred("description", description),
                FieldValue::inferred("created", Value::Null),
            ],
        )
    }

    fn text(s: &str) -> Value {
        Value::String(s.into())
    }

    fn pg_uuid(s: &str) -> Value {
        Value::Uuid(s.parse().unwrap())
    }

    fn verifier() -> Verifier {
        Verifier::new(vec![TableCheck::new("genre", &["id", "name", "description"])]).unwrap()
    }

    #[tokio::test]
    async fn test_text_and_native_uuids_compare_equal_regardless_of_order() {
        let mut source = FakeStore {
            tables: HashMap::from([(
                "genre",
                vec![
                    vec![genre(text(A), "Action", Value::Null)],
                    vec![genre(text(B), "Drama", text("Serious"))],
                ],
            )]),
        };
        let mut destination = FakeStore {
            tables: HashMap::from([(
                "genre",
                vec![vec![
                    genre(pg_uuid(B), "Drama", text("Serious")),
                    genre(pg_uuid(A), "Action", Value::Null),
                ]],
            )]),
        };

        let report = verifier().verify(&mut source, &mut destination).await.unwrap();

        let genre = report.get("genre").unwrap();
        assert_eq!(genre.status, TableStatus::Match);
        assert_eq!(genre.source_rows, Some(2));
        assert!(report.passed());
    }

    #[tokio::test]
    async fn test_differences_are_reported_per_row_and_field() {
        let mut source = FakeStore {
            tables: HashMap::from([(
                "genre",
                vec![vec![
                    genre(text(A), "Action", Value::Null),
                    genre(text(B), "Drama", Value::Null),
                ]],
            )]),
        };
        let mut destination = FakeStore {
            tables: HashMap::from([("genre", vec![vec![genre(pg_uuid(A), "Comedy", Value::Null)]])]),
        };

        let report = verifier().verify(&mut source, &mut destination).await.unwrap();

        let genre = report.get("genre").unwrap();
        assert_eq!(genre.status, TableStatus::Mismatch);
        let codes: Vec<&str> = genre.findings.iter().map(|f| f.code.as_str()).collect();
        assert_eq!(codes, vec![CODE_ROW_COUNT, CODE_MISSING_ROW, CODE_FIELD]);
        assert_eq!(genre.findings[2].field.as_deref(), Some("name"));
        assert!(!report.passed());
    }

    #[tokio::test]
    async fn test_duplicate_source_ids_count_as_rows() {
        let mut source = FakeStore {
            tables: HashMap::from([(
                "genre",
                vec![vec![
                    genre(text(A), "Action", Value::Null),
                    genre(text(A), "Action", Value::Null),
                ]],
            )]),
        };
        let mut destination = FakeStore {
            tables: HashMap::from([("genre", vec![vec![genre(pg_uuid(A), "Action", Value::Null)]])]),
        };

        let report = verifier().verify(&mut source, &mut destination).await.unwrap();

        let genre = report.get("genre").unwrap();
        assert_eq!(genre.status, TableStatus::Mismatch);
        assert_eq!(genre.source_rows, Some(2));
        assert_eq!(genre.destination_rows, Some(1));
        assert_eq!(genre.findings.len(), 1);
        assert_eq!(genre.findings[0].code, CODE_ROW_COUNT);
    }

    #[tokio::test]
    async fn test_missing_tables_are_reported_not_raised() {
        let mut source = FakeStore {
            tables: HashMap::from([("genre", vec![vec![genre(text(A), "Action", Value::Null)]])]),
        };
        let mut destination = FakeStore {
            tables: HashMap::new(),
        };
        let verifier = Verifier::new(vec![
            TableCheck::new("genre", &["id", "name"]),
            TableCheck::new("person", &["id", "full_name"]),
        ])
        .unwrap();

        let report = verifier.verify(&mut source, &mut destination).await.unwrap();

        assert_eq!(report.get("genre").unwrap().status, TableStatus::DestinationMissing);
        assert_eq!(report.get("person").unwrap().status, TableStatus::SourceMissing);
        assert_eq!(report.failed().count(), 1);
    }

    #[test]
    fn test_check_without_fields_is_rejected() {
        assert!(matches!(
            Verifier::new(vec![TableCheck::new("genre", &[])]),
            Err(VerifyError::EmptyCheck(table)) if table == "genre"
        ));
    }
}
