//! Error types for ssqlt-jinja

use ssqlt_core::CoreError;
use thiserror::Error;

/// Mapping template errors
#[derive(Error, Debug)]
pub enum JinjaError {
    /// Template render error (J001)
    #[error("[J001] Jinja render error: {0}")]
    RenderError(String),

    /// Template uses a name outside the placeholder vocabulary (J002)
    #[error("[J002] Unresolved placeholder '{name}' in template {template}. Valid placeholders: schema, universal_tablename, primary_suffix, secondary_suffix, select_preamble")]
    UnresolvedPlaceholder { name: String, template: String },

    /// A table has no complete to/from mapping pair (J003)
    #[error("[J003] Missing universal mapping for table '{table}': {reason}")]
    MissingMapping { table: String, reason: String },

    /// Two mapping files claim the same table and direction (J004)
    #[error("[J004] Duplicate {direction} mapping for table '{table}'")]
    DuplicateMapping { table: String, direction: String },

    /// Canonical attribute space declares a name twice (J005)
    #[error("[J005] Canonical attribute '{name}' declared twice")]
    DuplicateAttribute { name: String },

    /// Error from the core model (file names, attribute file)
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for JinjaError
pub type JinjaResult<T> = Result<T, JinjaError>;

impl From<minijinja::Error> for JinjaError {
    fn from(err: minijinja::Error) -> Self {
        JinjaError::RenderError(err.to_string())
    }
}
