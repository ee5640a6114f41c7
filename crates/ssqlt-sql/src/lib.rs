//! ssqlt-sql - SQL parsing layer for ssqlt
//!
//! This crate wraps sqlparser-rs with the PostgreSQL dialect to turn CREATE
//! TABLE text into the structured definitions consumed by the schema model,
//! and to read the output columns of rendered mapping queries.

pub mod ddl;
pub mod dialect;
pub mod error;
pub mod parser;
pub mod query;

pub use ddl::parse_create_table;
pub use dialect::PostgresDialect;
pub use error::{SqlError, SqlResult};
pub use parser::SqlParser;
pub use query::projection_columns;
