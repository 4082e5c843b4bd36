//! Defines the AST for an INSERT statement.

use crate::query::ast::{common::TableRef, expr::Expr};

/// Represents a complete INSERT statement.
///
/// Multi-row inserts are expressed through `values`, one inner vector per row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Insert {
    pub table: TableRef,
    pub columns: Vec<String>,
    pub values: Vec<Vec<Expr>>,
    /// Optional ON CONFLICT clause for handling conflicts.
    pub on_conflict: Option<OnConflict>,
}

impl Insert {
    /// Number of placeholders the rendered statement will carry.
    pub fn param_count(&self) -> usize {
        self.values
            .iter()
            .flatten()
            .filter(|expr| matches!(expr, Expr::Value(_)))
            .count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OnConflict {
    pub columns: Vec<String>,
    pub action: ConflictAction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConflictAction {
    DoNothing,
}
