//! Validate command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, ValidateArgs};
use crate::commands::common::load_context;

/// Execute the validate command.
///
/// Builds the full model and renders the document without writing it, so
/// every terminal error a compile would hit is reported here.
pub(crate) fn execute(args: &ValidateArgs, global: &GlobalArgs) -> Result<()> {
    let (project, ctx) = load_context(global)?;
    ssqlt_codegen::compile(&ctx).context("Failed to generate triggers")?;

    println!("Project '{}' is valid", project.config.name);
    if args.summary {
        for side in [&ctx.source, &ctx.target] {
            println!(
                "  {}: {} tables in schema {}",
                side.side,
                side.tables.len(),
                side.schema
            );
        }
        println!(
            "  universal: {} attributes, {} mappings",
            ctx.universal.canonical_attributes.len(),
            ctx.universal.mappings.len()
        );
    }
    Ok(())
}
