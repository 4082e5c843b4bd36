//! Table schema descriptors.
//!
//! Each record shape is described by an ordered list of [`ColumnSpec`]s.
//! Construction of a record from a source row is checked against this
//! descriptor instead of relying on whatever columns the row happens to carry.

use crate::{core::data_type::DataType, error::RegistryError};
use std::collections::HashSet;

pub mod coerce;

/// How a column behaves when it is absent (or NULL) in the source row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultRule {
    /// Absence is an error.
    Required,
    /// Absence yields NULL.
    Optional,
    /// Absence yields the current UTC time, taken when the record is built.
    NowUtc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub data_type: DataType,
    pub rule: DefaultRule,
}

impl ColumnSpec {
    pub const fn required(name: &'static str, data_type: DataType) -> Self {
        Self {
            name,
            data_type,
            rule: DefaultRule::Required,
        }
    }

    pub const fn optional(name: &'static str, data_type: DataType) -> Self {
        Self {
            name,
            data_type,
            rule: DefaultRule::Optional,
        }
    }

    pub const fn now_utc(name: &'static str) -> Self {
        Self {
            name,
            data_type: DataType::Timestamp,
            rule: DefaultRule::NowUtc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub table: &'static str,
    pub columns: &'static [ColumnSpec],
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.name)
    }

    /// Checks the descriptor is usable for record construction.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.columns.is_empty() {
            return Err(RegistryError::EmptySchema(self.table.to_string()));
        }

        let mut seen = HashSet::new();
        for column in self.columns {
            if !seen.insert(column.name) {
                return Err(RegistryError::DuplicateColumn {
                    table: self.table.to_string(),
                    column: column.name.to_string(),
                });
            }
            if column.rule == DefaultRule::NowUtc && column.data_type != DataType::Timestamp {
                return Err(RegistryError::InvalidDefault {
                    table: self.table.to_string(),
                    column: column.name.to_string(),
                });
            }
        }

        match self.column("id") {
            Some(id) if id.data_type == DataType::Uuid && id.rule == DefaultRule::Required => {
                Ok(())
            }
            _ => Err(RegistryError::MissingIdentity(self.table.to_string())),
        }
    }
}
