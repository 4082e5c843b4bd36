use crate::sql::base::error::DbError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use model::{
    core::{
        data_type::DataType,
        value::{FieldValue, Value},
    },
    records::row::RowData,
};
use tokio_postgres::{Row as PgRow, types::Type};
use uuid::Uuid;

/// Converts one Postgres row into `RowData`, keeping column order.
pub fn to_row_data(row: &PgRow, table: &str) -> Result<RowData, DbError> {
    let mut fields = Vec::with_capacity(row.columns().len());
    for (index, column) in row.columns().iter().enumerate() {
        let decode_err = |reason: String| DbError::Decode {
            table: table.to_string(),
            column: column.name().to_string(),
            reason,
        };

        let data_type = DataType::from_postgres_type(column.type_().name()).map_err(decode_err)?;
        let value = get_value(row, index, column.type_(), data_type)?;
        fields.push(FieldValue::new(column.name(), value, data_type));
    }
    Ok(RowData::new(table, fields))
}

fn get_value(row: &PgRow, index: usize, ty: &Type, data_type: DataType) -> Result<Value, DbError> {
    let value = match data_type {
        DataType::Uuid => row.try_get::<_, Option<Uuid>>(index)?.map(Value::Uuid),
        DataType::String => row.try_get::<_, Option<String>>(index)?.map(Value::String),
        DataType::Int => match *ty {
            Type::INT2 => row
                .try_get::<_, Option<i16>>(index)?
                .map(|v| Value::Int(v as i64)),
            Type::INT4 => row
                .try_get::<_, Option<i32>>(index)?
                .map(|v| Value::Int(v as i64)),
            _ => row.try_get::<_, Option<i64>>(index)?.map(Value::Int),
        },
        DataType::Float => match *ty {
            Type::FLOAT4 => row
                .try_get::<_, Option<f32>>(index)?
                .map(|v| Value::Float(v as f64)),
            _ => row.try_get::<_, Option<f64>>(index)?.map(Value::Float),
        },
        DataType::Boolean => row.try_get::<_, Option<bool>>(index)?.map(Value::Boolean),
        DataType::Date => row.try_get::<_, Option<NaiveDate>>(index)?.map(Value::Date),
        DataType::Timestamp => match *ty {
            Type::TIMESTAMP => row
                .try_get::<_, Option<NaiveDateTime>>(index)?
                .map(|v| Value::Timestamp(v.and_utc())),
            _ => row
                .try_get::<_, Option<DateTime<Utc>>>(index)?
                .map(Value::Timestamp),
        },
        DataType::Bytea => row.try_get::<_, Option<Vec<u8>>>(index)?.map(Value::Bytes),
        DataType::Null => None,
    };
    Ok(value.unwrap_or(Value::Null))
}
