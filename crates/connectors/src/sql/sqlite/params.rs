use model::core::value::Value;
use sqlx::{
    Sqlite,
    query::Query,
    sqlite::SqliteArguments,
};

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Binds values in placeholder order. Types SQLite has no storage class for
/// are bound as text.
pub(crate) fn bind_values(mut query: SqliteQuery<'_>, values: Vec<Value>) -> SqliteQuery<'_> {
    for value in values {
        query = match value {
            Value::Int(v) => query.bind(v),
            Value::Float(v) => query.bind(v),
            Value::String(v) => query.bind(v),
            Value::Boolean(v) => query.bind(v),
            Value::Uuid(v) => query.bind(v.hyphenated().to_string()),
            Value::Bytes(v) => query.bind(v),
            Value::Date(v) => query.bind(v.format("%Y-%m-%d").to_string()),
            Value::Timestamp(v) => query.bind(v.to_rfc3339()),
            Value::Null => query.bind(Option::<String>::None),
        };
    }
    query
}
