//! Turns pages of source rows into pages of typed records.

use crate::error::EtlError;
use connectors::sql::base::source::PageStream;
use futures_util::{
    StreamExt, TryStreamExt, future,
    stream::BoxStream,
};
use model::{
    error::RecordError,
    records::row::Page,
    registry::{AnyRecord, RecordKind},
};

pub type RecordPage = Vec<AnyRecord>;

pub type RecordPageStream<'a> = BoxStream<'a, Result<RecordPage, EtlError>>;

/// Builds one record per row. The first failing row fails the whole page.
pub fn transform_page(kind: RecordKind, page: &Page) -> Result<RecordPage, RecordError> {
    page.iter().map(|row| kind.build(row)).collect()
}

/// Maps each source page one-to-one into a record page, keeping order.
///
/// The stream ends right after the first error, whether it came from the
/// source or from record construction.
pub fn transform(pages: PageStream<'_>, kind: RecordKind) -> RecordPageStream<'_> {
    pages
        .map_err(EtlError::Source)
        .and_then(move |page| future::ready(transform_page(kind, &page).map_err(EtlError::from)))
        .scan(false, |failed, item| {
            if *failed {
                return future::ready(None);
            }
            *failed = item.is_err();
            future::ready(Some(item))
        })
        .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use connectors::sql::base::error::DbError;
    use futures_util::stream;
    use model::{
        core::value::{FieldValue, Value},
        records::row::RowData,
    };

    fn genre_row(id: &str, name: Option<&str>) -> RowData {
        RowData::new(
            "genre",
            vec![
                FieldValue::inferred("id", Value::String(id.into())),
                FieldValue::inferred(
                    "name",
                    name.map_or(Value::Null, |n| Value::String(n.into())),
                ),
            ],
        )
    }

    const A: &str = "3d8d9bf5-0d90-4353-88ba-4ccc5d2c07ff";
    const B: &str = "120a21cf-9097-479e-904a-13dd7198c1dd";

    #[tokio::test]
    async fn test_page_boundaries_are_preserved() {
        let pages: PageStream = stream::iter(vec![
            Ok(vec![genre_row(A, Some("Action")), genre_row(B, Some("Drama"))]),
            Ok(vec![genre_row(A, Some("Comedy"))]),
        ])
        .boxed();

        let sizes: Vec<usize> = transform(pages, RecordKind::Genre)
            .map_ok(|page| page.len())
            .try_collect()
            .await
            .unwrap();
        assert_eq!(sizes, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_stream_ends_after_first_record_error() {
        let pages: PageStream = stream::iter(vec![
            Ok(vec![genre_row(A, Some("Action"))]),
            Ok(vec![genre_row(B, None)]),
            Ok(vec![genre_row(A, Some("Comedy"))]),
        ])
        .boxed();

        let results: Vec<_> = transform(pages, RecordKind::Genre).collect().await;
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(EtlError::Record(RecordError::MissingField { .. }))
        ));
    }

    #[tokio::test]
    async fn test_source_errors_are_tagged() {
        let pages: PageStream = stream::iter(vec![Err(DbError::QueryBuildError("boom".into()))]).boxed();
        let results: Vec<_> = transform(pages, RecordKind::Genre).collect().await;
        assert!(matches!(results[0], Err(EtlError::Source(_))));
    }
}
