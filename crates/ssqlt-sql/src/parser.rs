//! SQL parser wrapper

use crate::dialect::PostgresDialect;
use crate::error::{SqlError, SqlResult};
use sqlparser::ast::Statement;

/// SQL parser that wraps sqlparser-rs with the PostgreSQL dialect
#[derive(Debug, Clone, Copy)]
pub struct SqlParser {
    dialect: PostgresDialect,
}

impl SqlParser {
    /// Create a new parser with PostgreSQL dialect
    pub fn postgres() -> Self {
        Self {
            dialect: PostgresDialect::new(),
        }
    }

    /// Parse SQL into AST statements
    pub fn parse(&self, sql: &str) -> SqlResult<Vec<Statement>> {
        let sql = sql.trim();
        if sql.is_empty() {
            return Err(SqlError::EmptySql);
        }

        self.dialect.parse(sql)
    }

    /// Parse SQL that must hold exactly one statement
    pub fn parse_single(&self, sql: &str) -> SqlResult<Statement> {
        let mut stmts = self.parse(sql)?;
        match stmts.len() {
            0 => Err(SqlError::EmptySql),
            1 => Ok(stmts.remove(0)),
            n => Err(SqlError::MultipleStatements(n)),
        }
    }
}

impl Default for SqlParser {
    fn default() -> Self {
        Self::postgres()
    }
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
