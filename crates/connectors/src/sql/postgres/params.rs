use crate::sql::base::statement::PageStatement;
use chrono::{DateTime, NaiveDate, Utc};
use model::core::{data_type::DataType, value::Value};
use tokio_postgres::types::ToSql;
use uuid::Uuid;

pub struct PgParam(Box<dyn ToSql + Sync + Send>);

impl PgParam {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Int(v) => PgParam(Box::new(v)),
            Value::Float(v) => PgParam(Box::new(v)),
            Value::String(v) => PgParam(Box::new(v)),
            Value::Boolean(v) => PgParam(Box::new(v)),
            Value::Uuid(v) => PgParam(Box::new(v)),
            Value::Bytes(v) => PgParam(Box::new(v)),
            Value::Date(v) => PgParam(Box::new(v)),
            Value::Timestamp(v) => PgParam(Box::new(v)),
            Value::Null => PgParam(Box::new(Option::<String>::None)),
        }
    }

    /// Like [`PgParam::from_value`], but a NULL is bound with the Rust type
    /// matching `data_type` so the server accepts it for typed columns.
    pub fn typed(value: Value, data_type: DataType) -> Self {
        if !value.is_null() {
            return PgParam::from_value(value);
        }

        match data_type {
            DataType::Uuid => PgParam(Box::new(Option::<Uuid>::None)),
            DataType::Int => PgParam(Box::new(Option::<i64>::None)),
            DataType::Float => PgParam(Box::new(Option::<f64>::None)),
            DataType::Boolean => PgParam(Box::new(Option::<bool>::None)),
            DataType::Date => PgParam(Box::new(Option::<NaiveDate>::None)),
            DataType::Timestamp => PgParam(Box::new(Option::<DateTime<Utc>>::None)),
            DataType::Bytea => PgParam(Box::new(Option::<Vec<u8>>::None)),
            DataType::String | DataType::Null => PgParam(Box::new(Option::<String>::None)),
        }
    }
}

impl AsRef<dyn ToSql + Sync> for PgParam {
    fn as_ref(&self) -> &(dyn ToSql + Sync + 'static) {
        &*self.0
    }
}

pub struct PgParamStore {
    pub params: Vec<PgParam>,
}

impl PgParamStore {
    pub fn from_values(values: Vec<Value>) -> Self {
        Self {
            params: values.into_iter().map(PgParam::from_value).collect(),
        }
    }

    pub fn from_statement(statement: &PageStatement) -> Self {
        Self {
            params: statement
                .typed_params()
                .map(|(value, data_type)| PgParam::typed(value.clone(), data_type))
                .collect(),
        }
    }

    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|param| param.as_ref())
            .collect::<Vec<_>>()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
