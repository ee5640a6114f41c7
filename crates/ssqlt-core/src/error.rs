//! Error types for ssqlt-core

use thiserror::Error;

/// Core error type for ssqlt
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E003: Project directory not found
    #[error("[E003] Project directory not found: {path}")]
    ProjectNotFound { path: String },

    /// E004: Required input directory missing
    #[error("[E004] Required directory not found: {path}")]
    MissingDirectory { path: String },

    /// E005: CREATE TABLE definition has the wrong shape
    #[error("[E005] Malformed schema for table '{table}': {reason}")]
    MalformedSchema { table: String, reason: String },

    /// E006: Constraint file phase token is neither insert nor delete
    #[error("[E006] Unknown phase '{phase}' in constraint file {file}. Expected 'insert' or 'delete'")]
    UnknownPhase { file: String, phase: String },

    /// E007: Foreign-key graph has a cycle
    #[error("[E007] Circular dependency detected at table '{node}'")]
    CircularDependency { node: String },

    /// E008: Tables on one side disagree on their schema name
    #[error("[E008] Schema mismatch: expected '{expected}', found '{found}'")]
    SchemaMismatch { expected: String, found: String },

    /// E009: Input file name does not follow its encoding
    #[error("[E009] Malformed file name '{file}': {reason}")]
    MalformedFileName { file: String, reason: String },

    /// E010: The same table is declared twice
    #[error("[E010] Duplicate table '{name}'")]
    DuplicateTable { name: String },

    /// E011: A reference names a table that was never declared
    #[error("[E011] Unknown table '{name}' referenced by {context}")]
    UnknownTable { name: String, context: String },

    /// E012: Line in the canonical attributes file is not `name,type`
    #[error("[E012] Malformed attribute on line {line}: '{content}'. Expected 'name,type'")]
    MalformedAttribute { line: usize, content: String },

    /// E013: IO error
    #[error("[E013] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E014: IO error with file path context
    #[error("[E014] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E015: YAML parse error
    #[error("[E015] Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
