#![allow(dead_code)]

use async_trait::async_trait;
use connectors::sql::base::{destination::PageSink, error::DbError, statement::PageStatement};
use model::core::value::Value;
use std::collections::{HashMap, HashSet};

/// A `PageSink` that keeps every statement instead of executing it.
///
/// Tables named in `missing` answer like Postgres does for an undefined
/// relation. Every id already seen counts as a conflict, so `inserted`
/// mirrors `ON CONFLICT DO NOTHING`.
#[derive(Default)]
pub struct RecordingSink {
    pub statements: Vec<PageStatement>,
    pub missing: HashSet<String>,
    seen_ids: HashSet<String>,
}

impl RecordingSink {
    pub fn missing(tables: &[&str]) -> Self {
        RecordingSink {
            missing: tables.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn tables(&self) -> Vec<&str> {
        self.statements.iter().map(|s| s.table.as_str()).collect()
    }

    pub fn statements_for(&self, table: &str) -> Vec<&PageStatement> {
        self.statements.iter().filter(|s| s.table == table).collect()
    }

    pub fn rows_for(&self, table: &str) -> usize {
        self.statements_for(table).iter().map(|s| s.rows).sum()
    }
}

#[async_trait]
impl PageSink for RecordingSink {
    async fn write_page(&mut self, statement: &PageStatement) -> Result<u64, DbError> {
        let bare = statement
            .table
            .rsplit('.')
            .next()
            .unwrap_or(statement.table.as_str());
        if self.missing.contains(bare) {
            return Err(DbError::UndefinedTable {
                table: statement.table.clone(),
                message: format!("relation \"{}\" does not exist", statement.table),
            });
        }

        let columns = column_count(statement);
        let mut inserted = 0;
        for row in statement.params.chunks(columns.max(1)) {
            let id = row.first().map(Value::to_string).unwrap_or_default();
            if self.seen_ids.insert(format!("{}:{id}", statement.table)) {
                inserted += 1;
            }
        }
        self.statements.push(statement.clone());
        Ok(inserted)
    }
}

/// Columns per row of a rendered multi-row insert.
pub fn column_count(statement: &PageStatement) -> usize {
    statement.params.len() / statement.rows.max(1)
}

/// The quoted column list of a rendered insert.
pub fn inserted_columns(statement: &PageStatement) -> Vec<String> {
    statement
        .sql
        .split_once(" (")
        .and_then(|(_, rest)| rest.split_once(") VALUES"))
        .map(|(columns, _)| {
            columns
                .split(", ")
                .map(|c| c.trim_matches('"').to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// The bound values of the row whose first column is `id`, by column name.
pub fn row_values(statement: &PageStatement, id: &Value) -> Option<HashMap<String, Value>> {
    let row = statement
        .params
        .chunks(column_count(statement).max(1))
        .find(|row| row.first() == Some(id))?;
    Some(inserted_columns(statement).into_iter().zip(row.iter().cloned()).collect())
}
