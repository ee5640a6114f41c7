//! Compile command implementation

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::cli::{CompileArgs, GlobalArgs};
use crate::commands::common::load_context;

/// Execute the compile command
pub(crate) fn execute(args: &CompileArgs, global: &GlobalArgs) -> Result<()> {
    let (project, ctx) = load_context(global)?;
    let document = ssqlt_codegen::compile(&ctx).context("Failed to generate triggers")?;

    if args.stdout {
        print!("{document}");
        return Ok(());
    }

    let output = args
        .output
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| project.output_path());
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(&output, &document)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Compiled {} source and {} target tables into {}",
        ctx.source.tables.len(),
        ctx.target.tables.len(),
        output.display()
    );
    Ok(())
}
