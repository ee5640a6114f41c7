//! CREATE TABLE tokenization into the structured definition the schema model consumes

use crate::error::{SqlError, SqlResult};
use crate::parser::SqlParser;
use sqlparser::ast::{ColumnDef, ColumnOption, CreateTable, Statement, TableConstraint};
use ssqlt_core::{ColumnDefinition, ConstraintDefinition, TableDefinition};

/// Parse one CREATE TABLE statement.
///
/// Column-level `PRIMARY KEY` and `REFERENCES` options are lifted into
/// table-level constraint blocks so the schema model sees a single shape.
/// Column-level `UNIQUE` and `CHECK` become [`ConstraintDefinition::Other`]
/// like their table-level forms.
pub fn parse_create_table(parser: &SqlParser, sql: &str) -> SqlResult<TableDefinition> {
    match parser.parse_single(sql)? {
        Statement::CreateTable(create) => Ok(table_definition(&create)),
        other => Err(SqlError::UnsupportedStatement(statement_kind(&other))),
    }
}

fn statement_kind(stmt: &Statement) -> String {
    stmt.to_string()
        .split_whitespace()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
}

fn table_definition(create: &CreateTable) -> TableDefinition {
    let mut columns = Vec::with_capacity(create.columns.len());
    let mut constraints = Vec::new();

    for column in &create.columns {
        let (definition, inline) = column_definition(column);
        columns.push(definition);
        constraints.extend(inline);
    }
    constraints.extend(create.constraints.iter().map(constraint_definition));

    TableDefinition {
        name: create.name.to_string(),
        columns,
        constraints,
    }
}

fn column_definition(column: &ColumnDef) -> (ColumnDefinition, Vec<ConstraintDefinition>) {
    let name = column.name.value.clone();
    let mut nullable = true;
    let mut inline = Vec::new();

    for def in &column.options {
        match &def.option {
            ColumnOption::NotNull => nullable = false,
            ColumnOption::Null => nullable = true,
            ColumnOption::PrimaryKey(_) => {
                nullable = false;
                inline.push(ConstraintDefinition::PrimaryKey {
                    columns: vec![name.clone()],
                });
            }
            ColumnOption::ForeignKey(fk) => inline.push(ConstraintDefinition::ForeignKey {
                columns: vec![name.clone()],
                references: fk.foreign_table.to_string(),
                referred_columns: fk.referred_columns.iter().map(|c| c.to_string()).collect(),
            }),
            ColumnOption::Unique(_) | ColumnOption::Check(_) => {
                inline.push(ConstraintDefinition::Other {
                    definition: format!("{} on column {}", def.option, name),
                })
            }
            _ => {}
        }
    }

    (
        ColumnDefinition {
            name,
            data_type: column.data_type.to_string(),
            nullable,
        },
        inline,
    )
}

fn constraint_definition(constraint: &TableConstraint) -> ConstraintDefinition {
    match constraint {
        TableConstraint::PrimaryKey(pk) => ConstraintDefinition::PrimaryKey {
            columns: pk.columns.iter().map(|c| c.to_string()).collect(),
        },
        TableConstraint::ForeignKey(fk) => ConstraintDefinition::ForeignKey {
            columns: fk.columns.iter().map(|c| c.to_string()).collect(),
            references: fk.foreign_table.to_string(),
            referred_columns: fk.referred_columns.iter().map(|c| c.to_string()).collect(),
        },
        other => ConstraintDefinition::Other {
            definition: other.to_string(),
        },
    }
}

#[cfg(test)]
#[path = "ddl_test.rs"]
mod tests;
