//! Join staging: translating staged rows across one side's tables
//!
//! The join function of a table runs once its staging shadow receives a
//! row. It maps the staged rows into the canonical space, joined with the
//! table's partners, and writes them back out into the join shadow of every
//! table on the same side. The last table in dependency order is written
//! after the fan-out sentinel, so its join trigger finds the round complete.

use crate::context::CompilationContext;
use crate::error::{CodegenError, CodegenResult};
use crate::loop_table::LoopTable;
use crate::scratch::{insert_select, Scratch};
use crate::shadow::{after_row_trigger, indent, trigger_function, Shadow};
use ssqlt_core::{CoreError, Phase, Side, Table};
use ssqlt_sql::SqlParser;

#[derive(Debug, Clone, Copy)]
pub struct JoinTable<'a> {
    ctx: &'a CompilationContext,
    side: Side,
    table: &'a Table,
    phase: Phase,
    loop_table: &'a LoopTable,
    parser: &'a SqlParser,
}

impl<'a> JoinTable<'a> {
    pub fn new(
        ctx: &'a CompilationContext,
        side: Side,
        table: &'a Table,
        phase: Phase,
        loop_table: &'a LoopTable,
        parser: &'a SqlParser,
    ) -> Self {
        Self {
            ctx,
            side,
            table,
            phase,
            loop_table,
            parser,
        }
    }

    pub fn shadow(&self) -> Shadow {
        Shadow::join(self.phase)
    }

    /// Unqualified join shadow name (`<table>_INSERT_JOIN`)
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

    /// Function-scoped scratch table (`<table>_insert_scratch`)
    pub fn scratch_name(&self) -> String {
        format!("{}_{}_scratch", self.table.name, self.phase.as_str())
    }

    pub fn generate_function(&self) -> CodegenResult<String> {
        let side = self.ctx.side(self.side);
        let Some((last, rest)) = side.dependency_order.split_last() else {
            return Err(CodegenError::EmptySide { side: self.side });
        };

        let staging = Shadow::staging(self.phase);
        let mapping = self.ctx.universal.mapping(&self.table.name)?;
        let query = mapping.to_sql("", staging.suffix(), "", false)?;

        let scratch_name = self.scratch_name();
        let scratch = Scratch::new(&scratch_name, &self.ctx.universal);

        // a change with no counterpart yet ends the round here
        let finish_empty = [
            format!("DELETE FROM {};", staging.qualified_name(self.table)),
            self.loop_table.clear_sql(),
            scratch.drop_sql(),
            "RETURN NULL;".to_string(),
        ]
        .join("\n");

        let mut body = vec![
            scratch.create_sql(),
            scratch.fill_sql(self.parser, &query),
            format!(
                "IF {} THEN\n{}\nEND IF;",
                scratch.empty_condition(),
                indent(&finish_empty, 1)
            ),
        ];
        for name in rest {
            body.push(self.write_join_shadow(name, &scratch)?);
        }
        body.push(self.loop_table.sentinel_sql());
        body.push(self.write_join_shadow(last, &scratch)?);
        body.push(scratch.drop_sql());
        body.push("RETURN NULL;".to_string());

        Ok(trigger_function(&self.function_name(), &body))
    }

    /// Fires when the staging shadow receives a row, for either phase
    pub fn generate_trigger(&self) -> String {
        after_row_trigger(
            &self.trigger_name(),
            Phase::Insert,
            &Shadow::staging(self.phase).qualified_name(self.table),
            &self.function_name(),
        )
    }

    fn write_join_shadow(&self, name: &str, scratch: &Scratch<'_>) -> CodegenResult<String> {
        let table = self
            .ctx
            .side(self.side)
            .table(name)
            .ok_or_else(|| CoreError::UnknownTable {
                name: name.to_string(),
                context: format!("the {} dependency order", self.side),
            })?;
        let query = self.ctx.universal.mapping(name)?.from_sql(scratch.name())?;
        Ok(format!(
            "{};",
            insert_select(
                self.parser,
                &self.shadow().qualified_name(table),
                &query
            )
        ))
    }
}

#[cfg(test)]
#[path = "join_test.rs"]
mod tests;
