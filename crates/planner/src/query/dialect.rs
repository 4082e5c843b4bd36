//! Defines the `Dialect` trait for database-specific SQL syntax.

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (like a table or column name) in the correct
    /// quotation marks for the dialect. Embedded quotes are doubled.
    fn quote_identifier(&self, ident: &str) -> String;

    /// Returns the placeholder for a parameterized query.
    ///
    /// - PostgreSQL uses `$1`, `$2`, etc.
    /// - SQLite uses `?`
    fn get_placeholder(&self, index: usize) -> String;

    /// Largest number of bind parameters a single statement may carry.
    fn max_bind_params(&self) -> usize;
}

fn double_quoted(ident: &str) -> String {
    format!(r#""{}""#, ident.replace('"', r#""""#))
}

#[derive(Debug, Clone)]
pub struct Postgres;

impl Dialect for Postgres {
    fn quote_identifier(&self, ident: &str) -> String {
        double_quoted(ident)
    }

    fn get_placeholder(&self, index: usize) -> String {
        // PostgreSQL uses $1, $2, etc.
        format!("${}", index + 1)
    }

    fn max_bind_params(&self) -> usize {
        // The bind message carries the parameter count in 16 bits.
        u16::MAX as usize
    }
}

#[derive(Debug, Clone)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn quote_identifier(&self, ident: &str) -> String {
        double_quoted(ident)
    }

    fn get_placeholder(&self, _index: usize) -> String {
        "?".into()
    }

    fn max_bind_params(&self) -> usize {
        32_766
    }
}
