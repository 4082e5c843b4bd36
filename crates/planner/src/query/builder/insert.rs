//! Provides a fluent builder for constructing `Insert` ASTs.

use crate::query::ast::{
    common::TableRef,
    expr::Expr,
    insert::{ConflictAction, Insert, OnConflict},
};

#[derive(Debug, Clone)]
pub struct InsertBuilder {
    ast: Insert,
}

impl InsertBuilder {
    pub fn new(table: TableRef) -> Self {
        Self {
            ast: Insert {
                table,
                ..Default::default()
            },
        }
    }

    pub fn columns<S: AsRef<str>>(mut self, columns: &[S]) -> Self {
        self.ast.columns = columns.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    /// Adds a row of values to the insert statement.
    /// This can be called multiple times for a batch insert.
    pub fn values(mut self, values: Vec<Expr>) -> Self {
        self.ast.values.push(values);
        self
    }

    /// Skips rows whose `columns` collide with an existing row.
    pub fn on_conflict_do_nothing(mut self, columns: &[&str]) -> Self {
        self.ast.on_conflict = Some(OnConflict {
            columns: columns.iter().map(|s| s.to_string()).collect(),
            action: ConflictAction::DoNothing,
        });
        self
    }

    pub fn build(self) -> Insert {
        self.ast
    }
}
