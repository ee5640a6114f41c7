//! Output-column extraction for rendered mapping queries

use crate::error::SqlResult;
use crate::parser::SqlParser;
use sqlparser::ast::{Expr, SelectItem, SetExpr, Statement};

/// Names of the output columns of a plain `SELECT`.
///
/// Returns `Ok(None)` when the statement is not a single `SELECT` or any
/// projection item lacks a name (wildcards, unaliased expressions), since
/// the column list cannot then be bound by name.
pub fn projection_columns(parser: &SqlParser, sql: &str) -> SqlResult<Option<Vec<String>>> {
    let Statement::Query(query) = parser.parse_single(sql)? else {
        return Ok(None);
    };
    let SetExpr::Select(select) = query.body.as_ref() else {
        return Ok(None);
    };

    let mut columns = Vec::with_capacity(select.projection.len());
    for item in &select.projection {
        let name = match item {
            SelectItem::UnnamedExpr(expr) => expr_column_name(expr),
            SelectItem::ExprWithAlias { alias, .. } => Some(alias.value.clone()),
            _ => None,
        };
        match name {
            Some(name) => columns.push(name),
            None => {
                log::debug!("Projection item '{}' has no column name", item);
                return Ok(None);
            }
        }
    }
    Ok(Some(columns))
}

fn expr_column_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Identifier(ident) => Some(ident.value.clone()),
        Expr::CompoundIdentifier(idents) => idents.last().map(|i| i.value.clone()),
        Expr::Nested(inner) => expr_column_name(inner),
        _ => None,
    }
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
