//! Error types for ssqlt-sql

use thiserror::Error;

/// SQL parsing errors
#[derive(Error, Debug)]
pub enum SqlError {
    /// SQL parse error (S001)
    #[error("[S001] SQL parse error at line {line}, column {column}: {message}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    /// Empty SQL (S002)
    #[error("[S002] SQL is empty")]
    EmptySql,

    /// Unsupported SQL statement (S003)
    #[error("[S003] Unsupported SQL statement type: {0}")]
    UnsupportedStatement(String),

    /// More than one statement where exactly one is expected (S004)
    #[error("[S004] Expected a single statement, found {0}")]
    MultipleStatements(usize),
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
