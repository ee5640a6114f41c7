//! ssqlt-core - Core library for the schema transducer
//!
//! This crate provides the schema and constraint models, the foreign-key
//! dependency resolver, per-side schema contexts, configuration parsing, and
//! project discovery shared by the other ssqlt crates.

pub mod config;
pub mod constraint;
pub mod context;
pub mod dag;
pub mod error;
pub mod file_name;
pub mod project;
pub mod table;

pub use config::Config;
pub use constraint::{Constraint, Phase};
pub use context::{parse_ordering, SchemaContext, Side};
pub use dag::DependencyGraph;
pub use error::{CoreError, CoreResult};
pub use file_name::{CreateFileName, MappingFileName};
pub use project::{Project, SideFiles, SqlFile, UniversalFiles};
pub use table::{
    dedup_attributes, normalize_ident, split_qualified, Attribute, ColumnDefinition,
    ConstraintDefinition, ForeignKey, PrimaryKey, Table, TableDefinition,
};
