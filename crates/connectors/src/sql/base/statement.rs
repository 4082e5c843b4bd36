use model::core::{data_type::DataType, value::Value};

/// One rendered, parameterized statement covering a whole page.
///
/// `param_types` runs parallel to `params` so that NULLs can be bound with
/// the column's declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct PageStatement {
    pub table: String,
    pub sql: String,
    pub params: Vec<Value>,
    pub param_types: Vec<DataType>,
    pub rows: usize,
}

impl PageStatement {
    pub fn typed_params(&self) -> impl Iterator<Item = (&Value, DataType)> {
        self.params.iter().zip(self.param_types.iter().copied())
    }
}
