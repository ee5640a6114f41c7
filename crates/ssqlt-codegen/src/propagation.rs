//! Cross-schema propagation: the last hop of a round
//!
//! Once the last table of the originating side receives a join row and the
//! loop table shows a complete fan-out, the merged canonical rows are
//! translated into every table of the other side. Inserting into the other
//! side fires its staging triggers, which see the round in flight and absorb
//! the echo instead of emitting a new round.

use crate::context::CompilationContext;
use crate::error::{CodegenError, CodegenResult};
use crate::join::JoinTable;
use crate::loop_table::LoopTable;
use crate::scratch::{insert_select, Scratch};
use crate::shadow::{after_row_trigger, indent, trigger_function, Shadow};
use crate::staging::StagingTable;
use ssqlt_core::{Phase, Side, Table};
use ssqlt_sql::SqlParser;

/// The propagation engine over one compilation context
#[derive(Debug)]
pub struct Propagation<'a> {
    ctx: &'a CompilationContext,
    parser: SqlParser,
    loop_table: LoopTable,
}

impl<'a> Propagation<'a> {
    pub fn new(ctx: &'a CompilationContext) -> Self {
        Self {
            ctx,
            parser: SqlParser::postgres(),
            loop_table: LoopTable::new(&ctx.schema),
        }
    }

    pub fn loop_table(&self) -> &LoopTable {
        &self.loop_table
    }

    pub fn staging_table(&self, table: &'a Table, phase: Phase) -> StagingTable<'_> {
        StagingTable::new(table, phase, &self.loop_table)
    }

    pub fn join_table(&self, side: Side, table: &'a Table, phase: Phase) -> JoinTable<'_> {
        JoinTable::new(self.ctx, side, table, phase, &self.loop_table, &self.parser)
    }

    /// Source to target insert propagation
    pub fn generate_target_insert(&self) -> CodegenResult<String> {
        self.generate_insert(Side::Source)
    }

    pub fn generate_target_insert_trigger(&self) -> CodegenResult<String> {
        self.generate_insert_trigger(Side::Source)
    }

    /// Target to source insert propagation
    pub fn generate_source_insert(&self) -> CodegenResult<String> {
        self.generate_insert(Side::Target)
    }

    pub fn generate_source_insert_trigger(&self) -> CodegenResult<String> {
        self.generate_insert_trigger(Side::Target)
    }

    pub fn generate_target_delete(&self) -> CodegenResult<String> {
        Err(CodegenError::Unsupported {
            operation: "delete propagation from source to target".to_string(),
        })
    }

    pub fn generate_source_delete(&self) -> CodegenResult<String> {
        Err(CodegenError::Unsupported {
            operation: "delete propagation from target to source".to_string(),
        })
    }

    /// `<loop schema>.<destination>_insert_fn`
    pub fn insert_function_name(&self, origin: Side) -> String {
        format!("{}.{}_insert_fn", self.ctx.schema, origin.opposite())
    }

    pub fn insert_trigger_name(&self, origin: Side) -> String {
        format!("{}_insert_trigger", origin.opposite())
    }

    fn last_table(&self, side: Side) -> CodegenResult<&'a Table> {
        self.ctx
            .side(side)
            .last_table()
            .ok_or(CodegenError::EmptySide { side })
    }

    fn generate_insert(&self, origin: Side) -> CodegenResult<String> {
        let from = self.ctx.side(origin);
        let to = self.ctx.side(origin.opposite());
        let last = self.last_table(origin)?;

        let join_suffix = Shadow::InsertJoin.suffix();
        let merged = self
            .ctx
            .universal
            .mapping(&last.name)?
            .to_sql("", join_suffix, join_suffix, true)?;

        let scratch_name = format!("{}_insert_scratch", origin.opposite());
        let scratch = Scratch::new(&scratch_name, &self.ctx.universal);

        let mut body = vec![
            format!(
                "IF {} THEN\n{}\nEND IF;",
                self.loop_table.waiting_condition(),
                indent("RETURN NULL;", 1)
            ),
            scratch.create_sql(),
            scratch.fill_sql(&self.parser, &merged),
            scratch.delete_incomplete_sql(),
        ];

        for (i, table) in to.ordered_tables().enumerate() {
            let query = self
                .ctx
                .universal
                .mapping(&table.name)?
                .from_sql(scratch.name())?;
            body.push(format!(
                "{}\n{};",
                insert_select(&self.parser, &table.qualified_name(), &query),
                on_conflict(table)
            ));
            if i == 0 {
                body.push(self.loop_table.absorb_sql());
            }
        }

        for table in from.ordered_tables() {
            for shadow in [Shadow::Insert, Shadow::InsertJoin] {
                body.push(format!("DELETE FROM {};", shadow.qualified_name(table)));
            }
        }
        body.push(self.loop_table.clear_sql());
        body.push(scratch.drop_sql());
        body.push("RETURN NULL;".to_string());

        log::debug!(
            "Generated {} propagation from {}",
            origin.opposite(),
            last.qualified_name()
        );
        Ok(trigger_function(&self.insert_function_name(origin), &body))
    }

    fn generate_insert_trigger(&self, origin: Side) -> CodegenResult<String> {
        let last = self.last_table(origin)?;
        Ok(after_row_trigger(
            &self.insert_trigger_name(origin),
            Phase::Insert,
            &Shadow::InsertJoin.qualified_name(last),
            &self.insert_function_name(origin),
        ))
    }
}

/// Re-inserting a row whose key already exists is a no-op
fn on_conflict(table: &Table) -> String {
    let keys = table.primary_key_columns();
    if keys.is_empty() {
        "ON CONFLICT DO NOTHING".to_string()
    } else {
        format!("ON CONFLICT ({}) DO NOTHING", keys.join(", "))
    }
}

#[cfg(test)]
#[path = "propagation_test.rs"]
mod tests;
