//! Per-table staging: the first hop of every change

use crate::loop_table::LoopTable;
use crate::shadow::{after_row_trigger, indent, trigger_function, Shadow};
use ssqlt_core::{Phase, Table};

/// The insert or delete staging shadow of one native table.
///
/// Its trigger fires after the change on the native table. An empty loop
/// table means the change originated here: record a marker and stage the
/// row. Otherwise the change is the echo of a propagated row and is
/// absorbed.
#[derive(Debug, Clone, Copy)]
pub struct StagingTable<'a> {
    table: &'a Table,
    phase: Phase,
    loop_table: &'a LoopTable,
}

impl<'a> StagingTable<'a> {
    pub fn new(table: &'a Table, phase: Phase, loop_table: &'a LoopTable) -> Self {
        Self {
            table,
            phase,
            loop_table,
        }
    }

    pub fn shadow(&self) -> Shadow {
        Shadow::staging(self.phase)
    }

    /// Unqualified shadow table name (`<table>_INSERT`)
    pub fn name(&self) -> String {
        self.shadow().name(self.table)
    }

    pub fn qualified_name(&self) -> String {
        self.shadow().qualified_name(self.table)
    }

    pub fn create_sql(&self) -> String {
        self.shadow().create_sql(self.table)
    }

    pub fn function_name(&self) -> String {
        format!("{}_fn", self.qualified_name())
    }

    pub fn trigger_name(&self) -> String {
        format!("{}_trigger", self.name())
    }

    pub fn generate_function(&self) -> String {
        let shadow = self.qualified_name();
        let absorb = [
            self.loop_table.clear_absorb_sql(),
            format!("DELETE FROM {shadow};"),
            "RETURN NULL;".to_string(),
        ]
        .join("\n");
        let emit = [
            self.loop_table.emit_sql(),
            format!(
                "INSERT INTO {shadow} VALUES ({}.*);",
                self.phase.row_variable()
            ),
            format!("RETURN {};", self.phase.row_variable()),
        ]
        .join("\n");

        let body = format!(
            "IF {} THEN\n{}\nELSE\n{}\nEND IF;",
            self.loop_table.active_condition(),
            indent(&absorb, 1),
            indent(&emit, 1)
        );
        trigger_function(&self.function_name(), &[body])
    }

    pub fn generate_trigger(&self) -> String {
        after_row_trigger(
            &self.trigger_name(),
            self.phase,
            &self.table.qualified_name(),
            &self.function_name(),
        )
    }
}

#[cfg(test)]
#[path = "staging_test.rs"]
mod tests;
