//! Defines the AST for SQL expressions.

use model::core::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A column or table identifier, e.g., `genre` or `genre.id`.
    Identifier(Ident),

    /// A bound value. Always rendered as a placeholder, never inlined.
    Value(Value),

    /// A binary operation, e.g., `name = $1`.
    BinaryOp(Box<BinaryOp>),

    /// The `*` projection.
    Wildcard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub qualifier: Option<String>, // e.g., the 'genre' in 'genre.id'
    pub name: String,              // e.g., the 'id' in 'genre.id'
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub left: Expr,
    pub op: BinaryOperator,
    pub right: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    Eq,
    And,
}

impl Expr {
    pub fn eq(left: Expr, right: Expr) -> Self {
        Expr::BinaryOp(Box::new(BinaryOp {
            left,
            op: BinaryOperator::Eq,
            right,
        }))
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::BinaryOp(Box::new(BinaryOp {
            left,
            op: BinaryOperator::And,
            right,
        }))
    }
}
