//! ssqlt-codegen - PL/pgSQL generation for the schema transducer
//!
//! This crate assembles the validated compilation context and emits the
//! trigger code that keeps the source and target schemas synchronized:
//! per-table staging and join shadows, the loop-marker protocol, and the
//! cross-schema insert propagation.

pub mod context;
pub mod error;
pub mod generator;
pub mod join;
pub mod loop_table;
pub mod propagation;
pub mod scratch;
pub mod shadow;
pub mod staging;

#[cfg(test)]
mod test_fixtures;

pub use context::CompilationContext;
pub use error::{CodegenError, CodegenResult};
pub use generator::{compile, Generator};
pub use join::JoinTable;
pub use loop_table::LoopTable;
pub use propagation::Propagation;
pub use scratch::Scratch;
pub use shadow::Shadow;
pub use staging::StagingTable;
