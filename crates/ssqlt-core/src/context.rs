//! Per-side schema context: tables, constraints, and dependency order

use crate::constraint::Constraint;
use crate::dag;
use crate::error::{CoreError, CoreResult};
use crate::table::{normalize_ident, Table};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Which of the two synchronized schemas a context describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Source,
    Target,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Source => "source",
            Side::Target => "target",
        }
    }

    /// The other side
    pub fn opposite(self) -> Self {
        match self {
            Side::Source => Side::Target,
            Side::Target => Side::Source,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The validated model of one side. Read-only once built.
#[derive(Debug, Clone)]
pub struct SchemaContext {
    pub side: Side,

    /// Schema shared by every table of this side
    pub schema: String,

    pub tables: BTreeMap<String, Table>,

    /// Constraints per table, ordered by phase then sequence index
    pub constraints: BTreeMap<String, Vec<Constraint>>,

    /// Referenced tables first
    pub dependency_order: Vec<String>,
}

impl SchemaContext {
    /// Build a context from every table and constraint of one side.
    ///
    /// `ordering`, when given, is used as the dependency order instead of
    /// resolving foreign keys; it must list every table exactly once.
    pub fn build(
        side: Side,
        tables: Vec<Table>,
        constraints: Vec<Constraint>,
        ordering: Option<Vec<String>>,
    ) -> CoreResult<Self> {
        let Some(first) = tables.first() else {
            return Err(CoreError::ConfigInvalid {
                message: format!("no tables declared for the {side} schema"),
            });
        };
        let schema = first.schema.clone();

        let mut table_map = BTreeMap::new();
        for table in tables {
            if table.schema != schema {
                return Err(CoreError::SchemaMismatch {
                    expected: schema,
                    found: table.schema,
                });
            }
            if table_map.contains_key(&table.name) {
                return Err(CoreError::DuplicateTable { name: table.name });
            }
            table_map.insert(table.name.clone(), table);
        }

        let mut constraint_map: BTreeMap<String, Vec<Constraint>> = BTreeMap::new();
        for constraint in constraints {
            if constraint.schema != schema {
                return Err(CoreError::SchemaMismatch {
                    expected: schema,
                    found: constraint.schema,
                });
            }
            if !table_map.contains_key(&constraint.table) {
                return Err(CoreError::UnknownTable {
                    name: constraint.table.clone(),
                    context: format!("constraint '{}'", constraint.name()),
                });
            }
            constraint_map
                .entry(constraint.table.clone())
                .or_default()
                .push(constraint);
        }
        for list in constraint_map.values_mut() {
            list.sort_by(|a, b| (a.phase, a.index, &a.kind).cmp(&(b.phase, b.index, &b.kind)));
        }

        let dependency_order = match ordering {
            Some(ordering) => Self::check_ordering(side, &table_map, ordering)?,
            None => dag::resolve(&table_map)?,
        };
        log::debug!("{} dependency order: {:?}", side, dependency_order);

        Ok(Self {
            side,
            schema,
            tables: table_map,
            constraints: constraint_map,
            dependency_order,
        })
    }

    /// Validate an explicit ordering against the declared tables
    fn check_ordering(
        side: Side,
        tables: &BTreeMap<String, Table>,
        ordering: Vec<String>,
    ) -> CoreResult<Vec<String>> {
        let ordering: Vec<String> = ordering.iter().map(|t| normalize_ident(t)).collect();
        let mut seen = HashSet::new();
        for name in &ordering {
            if !tables.contains_key(name) {
                return Err(CoreError::UnknownTable {
                    name: name.clone(),
                    context: format!("the {side} ordering file"),
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(CoreError::ConfigInvalid {
                    message: format!("table '{name}' listed twice in the {side} ordering file"),
                });
            }
        }
        if let Some(missing) = tables.keys().find(|t| !seen.contains(t.as_str())) {
            return Err(CoreError::ConfigInvalid {
                message: format!("the {side} ordering file does not list table '{missing}'"),
            });
        }
        Ok(ordering)
    }

    /// Tables in dependency order
    pub fn ordered_tables(&self) -> impl Iterator<Item = &Table> {
        self.dependency_order
            .iter()
            .filter_map(|name| self.tables.get(name))
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Constraints of a table, in firing order
    pub fn constraints_for(&self, table: &str) -> &[Constraint] {
        self.constraints
            .get(table)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The table fired last during fan-out
    pub fn last_table(&self) -> Option<&Table> {
        self.dependency_order
            .last()
            .and_then(|name| self.tables.get(name))
    }
}

/// Parse an ordering file: one table per line, blank lines and `--`/`#`
/// comments ignored.
pub fn parse_ordering(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("--") && !line.starts_with('#'))
        .map(normalize_ident)
        .collect()
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
