//! Shared helpers for CLI commands

use anyhow::{Context, Result};
use ssqlt_codegen::CompilationContext;
use ssqlt_core::Project;
use std::path::Path;

use crate::cli::GlobalArgs;

/// Load the project named by the global arguments
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    let project_path = Path::new(&global.project_dir);
    let project = Project::load(project_path).context("Failed to load project")?;
    log::debug!("Loaded project '{}' from {}", project.config.name, project.root.display());
    Ok(project)
}

/// Load the project and build its validated compilation context
pub(crate) fn load_context(global: &GlobalArgs) -> Result<(Project, CompilationContext)> {
    let project = load_project(global)?;
    let ctx = CompilationContext::from_project(&project)
        .with_context(|| format!("Invalid project '{}'", project.config.name))?;
    Ok((project, ctx))
}
