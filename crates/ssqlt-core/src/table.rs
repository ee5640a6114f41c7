//! Schema model: tables, attributes, and keys parsed from CREATE TABLE definitions

use crate::error::{CoreError, CoreResult};
use std::collections::HashSet;
use std::fmt::Write;

/// Normalize an identifier for case-insensitive lookups.
///
/// Strips surrounding double quotes and lower-cases. Idempotent.
pub fn normalize_ident(ident: &str) -> String {
    ident.trim().trim_matches('"').to_lowercase()
}

/// Split a `schema.table` reference into its two normalized parts.
///
/// Returns `None` unless the reference has exactly two non-empty parts.
pub fn split_qualified(name: &str) -> Option<(String, String)> {
    let mut parts = name.split('.').map(normalize_ident);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(schema), Some(table), None) if !schema.is_empty() && !table.is_empty() => {
            Some((schema, table))
        }
        _ => None,
    }
}

/// A typed column of a table or of the canonical attribute space
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    /// Lower-cased column name
    pub name: String,

    /// Upper-cased type, including parameters such as `VARCHAR(100)`
    pub data_type: String,

    /// Whether the column accepts NULL
    pub nullable: bool,
}

impl Attribute {
    /// Create an attribute, normalizing name and type
    pub fn new(name: &str, data_type: &str, nullable: bool) -> Self {
        Self {
            name: normalize_ident(name),
            data_type: data_type.trim().to_uppercase(),
            nullable,
        }
    }

    /// Render as a column definition line (`name TYPE [NOT NULL]`)
    pub fn column_sql(&self) -> String {
        if self.nullable {
            format!("{} {}", self.name, self.data_type)
        } else {
            format!("{} {} NOT NULL", self.name, self.data_type)
        }
    }

    /// Parse a canonical attributes file of `name,type` lines.
    ///
    /// Blank lines are skipped. Canonical attributes are always nullable:
    /// the scratch table must hold partially joined rows before they are
    /// filtered.
    pub fn parse_list(content: &str) -> CoreResult<Vec<Attribute>> {
        let mut attributes = Vec::new();
        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let Some((name, data_type)) = line.split_once(',') else {
                return Err(CoreError::MalformedAttribute {
                    line: idx + 1,
                    content: line.to_string(),
                });
            };
            if name.trim().is_empty() || data_type.trim().is_empty() {
                return Err(CoreError::MalformedAttribute {
                    line: idx + 1,
                    content: line.to_string(),
                });
            }
            attributes.push(Attribute::new(name, data_type, true));
        }
        Ok(dedup_attributes(attributes))
    }
}

/// Remove duplicate attributes, keeping the first occurrence of each
/// `(name, type, nullable)` triple in input order.
pub fn dedup_attributes(attributes: impl IntoIterator<Item = Attribute>) -> Vec<Attribute> {
    let mut seen = HashSet::new();
    attributes
        .into_iter()
        .filter(|attr| seen.insert(attr.clone()))
        .collect()
}

/// Primary key constraint block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    /// Key columns in declaration order
    pub columns: Vec<String>,
}

/// Foreign key constraint block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Referencing columns on the declaring table
    pub columns: Vec<String>,

    /// Schema of the referenced table
    pub ref_schema: String,

    /// Name of the referenced table
    pub ref_table: String,

    /// Referenced columns
    pub ref_columns: Vec<String>,
}

/// A column as produced by the DDL tokenizer, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
}

/// A table-level constraint as produced by the DDL tokenizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintDefinition {
    PrimaryKey {
        columns: Vec<String>,
    },
    ForeignKey {
        columns: Vec<String>,
        /// `schema.table` reference token
        references: String,
        referred_columns: Vec<String>,
    },
    /// Any other constraint kind (UNIQUE, CHECK, ...), kept as source text
    Other { definition: String },
}

/// Structured parse result of one CREATE TABLE statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    /// Table name as written, expected to be `schema.table`
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
    pub constraints: Vec<ConstraintDefinition>,
}

/// A native table of the source or target schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub schema: String,
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub primary_keys: Vec<PrimaryKey>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl Table {
    /// Build a table from a parsed CREATE TABLE definition.
    ///
    /// Fails with [`CoreError::MalformedSchema`] when the name lacks a schema
    /// qualifier, a column is declared twice, a key names an undeclared
    /// column, or a constraint block is neither a primary nor a foreign key.
    pub fn from_definition(def: &TableDefinition) -> CoreResult<Self> {
        let (schema, name) =
            split_qualified(&def.name).ok_or_else(|| CoreError::MalformedSchema {
                table: def.name.clone(),
                reason: "table name must be qualified as schema.table".to_string(),
            })?;

        let malformed = |reason: String| CoreError::MalformedSchema {
            table: format!("{schema}.{name}"),
            reason,
        };

        let mut attributes: Vec<Attribute> = Vec::with_capacity(def.columns.len());
        for col in &def.columns {
            let attr = Attribute::new(&col.name, &col.data_type, col.nullable);
            if attributes.iter().any(|a| a.name == attr.name) {
                return Err(malformed(format!("column '{}' declared twice", attr.name)));
            }
            attributes.push(attr);
        }

        let declared = |column: &str| attributes.iter().any(|a| a.name == column);

        let mut primary_keys = Vec::new();
        let mut foreign_keys = Vec::new();
        for constraint in &def.constraints {
            match constraint {
                ConstraintDefinition::PrimaryKey { columns } => {
                    let columns: Vec<String> = columns.iter().map(|c| normalize_ident(c)).collect();
                    if let Some(missing) = columns.iter().find(|c| !declared(c)) {
                        return Err(malformed(format!(
                            "primary key column '{missing}' is not declared"
                        )));
                    }
                    primary_keys.push(PrimaryKey { columns });
                }
                ConstraintDefinition::ForeignKey {
                    columns,
                    references,
                    referred_columns,
                } => {
                    let (ref_schema, ref_table) = split_qualified(references).ok_or_else(|| {
                        malformed(format!(
                            "foreign key reference '{references}' must be qualified as schema.table"
                        ))
                    })?;
                    let columns: Vec<String> = columns.iter().map(|c| normalize_ident(c)).collect();
                    let ref_columns: Vec<String> =
                        referred_columns.iter().map(|c| normalize_ident(c)).collect();
                    if let Some(missing) = columns.iter().find(|c| !declared(c)) {
                        return Err(malformed(format!(
                            "foreign key column '{missing}' is not declared"
                        )));
                    }
                    if !ref_columns.is_empty() && ref_columns.len() != columns.len() {
                        return Err(malformed(format!(
                            "foreign key to {ref_schema}.{ref_table} has {} columns but references {}",
                            columns.len(),
                            ref_columns.len()
                        )));
                    }
                    foreign_keys.push(ForeignKey {
                        columns,
                        ref_schema,
                        ref_table,
                        ref_columns,
                    });
                }
                ConstraintDefinition::Other { definition } => {
                    return Err(malformed(format!(
                        "unsupported constraint '{definition}': only PRIMARY KEY and FOREIGN KEY are allowed"
                    )));
                }
            }
        }

        Ok(Self {
            schema,
            name,
            attributes,
            primary_keys,
            foreign_keys,
        })
    }

    /// `schema.table`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }

    /// Columns of the first declared primary key, in declaration order
    pub fn primary_key_columns(&self) -> &[String] {
        self.primary_keys
            .first()
            .map(|pk| pk.columns.as_slice())
            .unwrap_or(&[])
    }

    /// Render the table as PostgreSQL DDL
    pub fn create_sql(&self) -> String {
        let mut lines: Vec<String> = self
            .attributes
            .iter()
            .map(|attr| format!("    {}", attr.column_sql()))
            .collect();
        for pk in &self.primary_keys {
            lines.push(format!("    PRIMARY KEY ({})", pk.columns.join(", ")));
        }
        for fk in &self.foreign_keys {
            let mut line = format!(
                "    FOREIGN KEY ({}) REFERENCES {}.{}",
                fk.columns.join(", "),
                fk.ref_schema,
                fk.ref_table
            );
            if !fk.ref_columns.is_empty() {
                let _ = write!(line, " ({})", fk.ref_columns.join(", "));
            }
            lines.push(line);
        }
        format!(
            "CREATE TABLE {} (\n{}\n);",
            self.qualified_name(),
            lines.join(",\n")
        )
    }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
