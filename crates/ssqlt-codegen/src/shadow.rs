//! Shadow tables: zero-row copies of a native table's shape

use ssqlt_core::{Phase, Table};

/// The four shadows kept for every native table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shadow {
    /// Rows just inserted, not yet propagated
    Insert,
    /// Rows just deleted, not yet propagated
    Delete,
    /// Inserted rows after translation through the canonical space
    InsertJoin,
    /// Deleted rows after translation through the canonical space
    DeleteJoin,
}

impl Shadow {
    pub const ALL: [Shadow; 4] = [
        Shadow::Insert,
        Shadow::Delete,
        Shadow::InsertJoin,
        Shadow::DeleteJoin,
    ];

    pub fn staging(phase: Phase) -> Self {
        match phase {
            Phase::Insert => Shadow::Insert,
            Phase::Delete => Shadow::Delete,
        }
    }

    pub fn join(phase: Phase) -> Self {
        match phase {
            Phase::Insert => Shadow::InsertJoin,
            Phase::Delete => Shadow::DeleteJoin,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Shadow::Insert => "_INSERT",
            Shadow::Delete => "_DELETE",
            Shadow::InsertJoin => "_INSERT_JOIN",
            Shadow::DeleteJoin => "_DELETE_JOIN",
        }
    }

    /// Unqualified shadow table name
    pub fn name(self, table: &Table) -> String {
        format!("{}{}", table.name, self.suffix())
    }

    pub fn qualified_name(self, table: &Table) -> String {
        format!("{}.{}", table.schema, self.name(table))
    }

    /// Same columns as the native table, no rows, no constraints
    pub fn create_sql(self, table: &Table) -> String {
        format!(
            "CREATE TABLE {} AS\nSELECT * FROM {}\nWHERE 1<>1;",
            self.qualified_name(table),
            table.qualified_name()
        )
    }
}

/// Wrap statements in a PL/pgSQL trigger function
pub(crate) fn trigger_function(name: &str, body: &[String]) -> String {
    let mut sql = format!(
        "CREATE OR REPLACE FUNCTION {name}()\n   RETURNS TRIGGER LANGUAGE PLPGSQL AS $$\nBEGIN\n"
    );
    for line in body.iter().flat_map(|stmt| stmt.lines()) {
        if !line.is_empty() {
            sql.push_str("   ");
            sql.push_str(line);
        }
        sql.push('\n');
    }
    sql.push_str("END;  $$;");
    sql
}

/// `AFTER <phase>` row trigger running `function`
pub(crate) fn after_row_trigger(trigger: &str, phase: Phase, table: &str, function: &str) -> String {
    format!(
        "CREATE TRIGGER {trigger}\nAFTER {} ON {table}\nFOR EACH ROW\nEXECUTE FUNCTION {function}();",
        phase.as_sql()
    )
}

/// Indent every line of `sql` by `depth` levels
pub(crate) fn indent(sql: &str, depth: usize) -> String {
    let pad = "   ".repeat(depth);
    sql.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "shadow_test.rs"]
mod tests;
