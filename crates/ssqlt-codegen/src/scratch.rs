//! Function-scoped scratch tables over the canonical attributes

use ssqlt_jinja::Universal;
use ssqlt_sql::{projection_columns, SqlParser};

/// `INSERT INTO <table> [(<columns>)] <query>`, without the terminating
/// semicolon.
///
/// Columns are bound by name when the query's output columns can be read,
/// so a query may supply a subset of the table's columns in any order.
/// Otherwise the insert is positional.
pub(crate) fn insert_select(parser: &SqlParser, table: &str, query: &str) -> String {
    match projection_columns(parser, query) {
        Ok(Some(columns)) => format!("INSERT INTO {} ({})\n{}", table, columns.join(", "), query),
        Ok(None) => {
            log::warn!("Output columns of the query filling {table} cannot be named; inserting by position");
            format!("INSERT INTO {table}\n{query}")
        }
        Err(e) => {
            log::warn!("Cannot parse the query filling {table} ({e}); inserting by position");
            format!("INSERT INTO {table}\n{query}")
        }
    }
}

/// A temporary table created, filled and dropped inside one trigger function
#[derive(Debug, Clone, Copy)]
pub struct Scratch<'a> {
    name: &'a str,
    universal: &'a Universal,
}

impl<'a> Scratch<'a> {
    pub fn new(name: &'a str, universal: &'a Universal) -> Self {
        Self { name, universal }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn create_sql(&self) -> String {
        self.universal.create_scratch_sql(self.name)
    }

    /// Insert the rows of a rendered `to` query
    pub fn fill_sql(&self, parser: &SqlParser, query: &str) -> String {
        if let Ok(Some(columns)) = projection_columns(parser, query) {
            let canonical = self.universal.attribute_names();
            for column in columns {
                if !canonical.contains(&column.to_lowercase().as_str()) {
                    log::warn!(
                        "Column '{}' written to {} is not a canonical attribute",
                        column,
                        self.name
                    );
                }
            }
        }
        format!("{};", insert_select(parser, self.name, query))
    }

    /// Condition true when the scratch table holds no rows
    pub fn empty_condition(&self) -> String {
        format!("NOT EXISTS (SELECT 1 FROM {})", self.name)
    }

    /// Drop rows any canonical attribute of which is NULL
    pub fn delete_incomplete_sql(&self) -> String {
        let conditions: Vec<String> = self
            .universal
            .attribute_names()
            .iter()
            .map(|name| format!("{name} IS NULL"))
            .collect();
        format!(
            "DELETE FROM {}\nWHERE {};",
            self.name,
            conditions.join(" OR ")
        )
    }

    pub fn drop_sql(&self) -> String {
        format!("DROP TABLE {};", self.name)
    }
}

#[cfg(test)]
#[path = "scratch_test.rs"]
mod tests;
