//! ssqlt-jinja - Universal mapping layer for ssqlt
//!
//! This crate compiles the per-table mapping templates that translate rows
//! between a table's native shape and the canonical attribute space. Templates
//! are minijinja sources restricted to a closed set of placeholders:
//! `schema`, `universal_tablename`, `primary_suffix`, `secondary_suffix` and
//! `select_preamble`.

pub mod error;
pub mod template;
pub mod universal;

pub use error::{JinjaError, JinjaResult};
pub use template::{MappingTemplate, Placeholder, TemplateParams};
pub use universal::{Universal, UniversalMapping};
