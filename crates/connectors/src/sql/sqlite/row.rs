use crate::sql::base::error::DbError;
use model::{
    core::{
        data_type::DataType,
        value::{FieldValue, Value},
    },
    records::row::RowData,
};
use sqlx::{Column, Row, TypeInfo, ValueRef, sqlite::SqliteRow};

/// Converts one SQLite row into `RowData`, keeping column order.
///
/// SQLite is dynamically typed, so each value is decoded by the storage
/// class it actually holds rather than by the column's declared type.
pub fn to_row_data(row: &SqliteRow, table: &str) -> Result<RowData, DbError> {
    let mut fields = Vec::with_capacity(row.columns().len());
    for (index, column) in row.columns().iter().enumerate() {
        let value = decode_value(row, index).map_err(|reason| DbError::Decode {
            table: table.to_string(),
            column: column.name().to_string(),
            reason,
        })?;
        fields.push(FieldValue::inferred(column.name(), value));
    }
    Ok(RowData::new(table, fields))
}

fn decode_value(row: &SqliteRow, index: usize) -> Result<Value, String> {
    let raw = row.try_get_raw(index).map_err(|e| e.to_string())?;
    if raw.is_null() {
        return Ok(Value::Null);
    }

    let storage = raw.type_info().name().to_string();
    let value = match DataType::from_sqlite_storage(&storage)? {
        DataType::Int => Value::Int(row.try_get_unchecked::<i64, _>(index).map_err(|e| e.to_string())?),
        DataType::Float => {
            Value::Float(row.try_get_unchecked::<f64, _>(index).map_err(|e| e.to_string())?)
        }
        DataType::String => Value::String(
            row.try_get_unchecked::<String, _>(index)
                .map_err(|e| e.to_string())?,
        ),
        DataType::Bytea => Value::Bytes(
            row.try_get_unchecked::<Vec<u8>, _>(index)
                .map_err(|e| e.to_string())?,
        ),
        DataType::Null => Value::Null,
        other => return Err(format!("unexpected storage class {other}")),
    };
    Ok(value)
}
