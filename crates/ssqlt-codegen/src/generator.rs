//! Document assembly: every statement of the transducer in dependency order

use crate::context::CompilationContext;
use crate::error::CodegenResult;
use crate::propagation::Propagation;
use crate::shadow::Shadow;
use ssqlt_core::{Phase, SchemaContext, Side};

/// Emits the whole document for one compilation context.
///
/// Sections, in order: schemas, source tables with their constraints,
/// target tables with their constraints, shadow tables, the loop table,
/// per-table staging and join triggers, cross-schema propagation.
#[derive(Debug)]
pub struct Generator<'a> {
    ctx: &'a CompilationContext,
    engine: Propagation<'a>,
}

impl<'a> Generator<'a> {
    pub fn new(ctx: &'a CompilationContext) -> Self {
        Self {
            ctx,
            engine: Propagation::new(ctx),
        }
    }

    pub fn generate(&self) -> CodegenResult<String> {
        let sections = [
            self.schema_section(),
            self.table_section(&self.ctx.source),
            self.table_section(&self.ctx.target),
            self.shadow_section(),
            self.loop_section(),
            self.trigger_section()?,
            self.propagation_section()?,
        ];
        log::debug!(
            "Generated {} source and {} target tables",
            self.ctx.source.tables.len(),
            self.ctx.target.tables.len()
        );

        let mut document = sections.join("\n\n");
        document.push('\n');
        Ok(document)
    }

    fn schema_section(&self) -> String {
        let mut parts = vec![banner("SCHEMAS")];
        for schema in self.ctx.schemas() {
            parts.push(format!(
                "DROP SCHEMA IF EXISTS {schema} CASCADE;\nCREATE SCHEMA {schema};"
            ));
        }
        parts.join("\n\n")
    }

    fn table_section(&self, side: &SchemaContext) -> String {
        let mut parts = vec![banner(&format!(
            "{} TABLE DEFINITIONS",
            side.side.as_str().to_uppercase()
        ))];
        for table in side.ordered_tables() {
            let mut lines = vec![format!("-- {}", table.qualified_name()), table.create_sql()];
            let constraints = side.constraints_for(&table.name);
            if constraints.is_empty() {
                lines.push("-- no constraints".to_string());
            }
            for (i, constraint) in constraints.iter().enumerate() {
                lines.push(format!("-- constraint {} of {}", i + 1, constraints.len()));
                lines.push(constraint.generate_function());
                lines.push(constraint.generate_trigger());
            }
            parts.push(lines.join("\n"));
        }
        parts.join("\n\n")
    }

    fn shadow_section(&self) -> String {
        let mut parts = vec![banner("STAGING TABLES")];
        for side in [&self.ctx.source, &self.ctx.target] {
            for table in side.ordered_tables() {
                let shadows: Vec<String> = Shadow::ALL.iter().map(|s| s.create_sql(table)).collect();
                parts.push(shadows.join("\n"));
            }
        }
        parts.join("\n\n")
    }

    fn loop_section(&self) -> String {
        format!(
            "{}\n\n{}",
            banner("LOOP PREVENTION"),
            self.engine.loop_table().create_sql()
        )
    }

    fn trigger_section(&self) -> CodegenResult<String> {
        let mut parts = vec![banner("STAGING AND JOIN TRIGGERS")];
        for side in [Side::Source, Side::Target] {
            for table in self.ctx.side(side).ordered_tables() {
                let staging = self.engine.staging_table(table, Phase::Insert);
                let join = self.engine.join_table(side, table, Phase::Insert);
                parts.push(
                    [
                        staging.generate_function(),
                        staging.generate_trigger(),
                        join.generate_function()?,
                        join.generate_trigger(),
                    ]
                    .join("\n\n"),
                );
            }
        }
        Ok(parts.join("\n\n"))
    }

    fn propagation_section(&self) -> CodegenResult<String> {
        Ok([
            banner("CROSS-SCHEMA PROPAGATION"),
            "-- source -> target".to_string(),
            self.engine.generate_target_insert()?,
            self.engine.generate_target_insert_trigger()?,
            "-- target -> source".to_string(),
            self.engine.generate_source_insert()?,
            self.engine.generate_source_insert_trigger()?,
        ]
        .join("\n\n"))
    }
}

/// Compile a validated context into one SQL document
pub fn compile(ctx: &CompilationContext) -> CodegenResult<String> {
    Generator::new(ctx).generate()
}

fn banner(title: &str) -> String {
    let rule = format!("/*{}*/", "*".repeat(title.len() + 2));
    format!("{rule}\n/* {title} */\n{rule}")
}

#[cfg(test)]
#[path = "generator_test.rs"]
mod tests;
