//! Error types for ssqlt-codegen

use ssqlt_core::{CoreError, Side};
use ssqlt_jinja::JinjaError;
use ssqlt_sql::SqlError;
use thiserror::Error;

/// Compilation errors. Every variant aborts the run before any output.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// Operation the engine does not generate (G001)
    #[error("[G001] Unsupported operation: {operation}")]
    Unsupported { operation: String },

    /// CREATE TABLE file could not be parsed (G002)
    #[error("[G002] Failed to parse '{path}': {source}")]
    SqlWithPath { path: String, source: SqlError },

    /// A side has no tables to propagate from (G003)
    #[error("[G003] The {side} schema declares no tables")]
    EmptySide { side: Side },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Sql(#[from] SqlError),

    #[error(transparent)]
    Jinja(#[from] JinjaError),
}

/// Result type alias for CodegenError
pub type CodegenResult<T> = Result<T, CodegenError>;
