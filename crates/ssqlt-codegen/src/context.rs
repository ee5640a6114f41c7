//! The validated model of a whole compilation run

use crate::error::{CodegenError, CodegenResult};
use ssqlt_core::{
    parse_ordering, Constraint, CoreError, CreateFileName, Project, SchemaContext, Side, SideFiles,
    Table, UniversalFiles,
};
use ssqlt_jinja::Universal;
use ssqlt_sql::{parse_create_table, SqlParser};

/// Both sides plus the universal layer between them
#[derive(Debug, Clone)]
pub struct CompilationContext {
    /// Schema holding the loop-marker table and cross-schema functions
    pub schema: String,

    pub source: SchemaContext,

    pub target: SchemaContext,

    pub universal: Universal,
}

impl CompilationContext {
    /// Assemble a context, checking the sides against each other and
    /// against the universal layer.
    pub fn new(
        schema: &str,
        source: SchemaContext,
        target: SchemaContext,
        universal: Universal,
    ) -> CodegenResult<Self> {
        if let Some(shared) = source
            .tables
            .keys()
            .find(|name| target.tables.contains_key(*name))
        {
            return Err(CoreError::DuplicateTable {
                name: shared.clone(),
            }
            .into());
        }

        for side in [&source, &target] {
            for name in &side.dependency_order {
                let mapping = universal.mapping(name)?;
                if mapping.schema != side.schema {
                    return Err(CoreError::SchemaMismatch {
                        expected: side.schema.clone(),
                        found: mapping.schema.clone(),
                    }
                    .into());
                }
            }
        }

        Ok(Self {
            schema: schema.to_string(),
            source,
            target,
            universal,
        })
    }

    /// Parse and validate every input of a loaded project
    pub fn from_project(project: &Project) -> CodegenResult<Self> {
        Self::from_files(
            &project.config.schema,
            &project.source,
            &project.target,
            &project.universal,
        )
    }

    /// Parse and validate input files already read into memory
    pub fn from_files(
        schema: &str,
        source: &SideFiles,
        target: &SideFiles,
        universal: &UniversalFiles,
    ) -> CodegenResult<Self> {
        let parser = SqlParser::postgres();
        let source = build_side(&parser, source)?;
        let target = build_side(&parser, target)?;

        let universal = Universal::compile_templates(
            &universal.attributes,
            &universal.from_files,
            &universal.to_files,
            source.dependency_order.clone(),
            target.dependency_order.clone(),
        )?;

        Self::new(schema, source, target, universal)
    }

    pub fn side(&self, side: Side) -> &SchemaContext {
        match side {
            Side::Source => &self.source,
            Side::Target => &self.target,
        }
    }

    /// Distinct schemas the document creates, loop schema first
    pub fn schemas(&self) -> Vec<&str> {
        let mut schemas: Vec<&str> = Vec::with_capacity(3);
        for schema in [&self.schema, &self.source.schema, &self.target.schema] {
            if !schemas.contains(&schema.as_str()) {
                schemas.push(schema);
            }
        }
        schemas
    }
}

/// Parse one side's create and constraint files into its schema context
fn build_side(parser: &SqlParser, files: &SideFiles) -> CodegenResult<SchemaContext> {
    let mut tables = Vec::with_capacity(files.creates.len());
    for file in &files.creates {
        let expected = CreateFileName::parse(&file.name)?;
        let definition =
            parse_create_table(parser, &file.content).map_err(|e| CodegenError::SqlWithPath {
                path: file.path.display().to_string(),
                source: e,
            })?;
        let table = Table::from_definition(&definition)?;
        if table.schema != expected.schema || table.name != expected.table {
            return Err(CoreError::MalformedFileName {
                file: file.name.clone(),
                reason: format!("file declares table {}", table.qualified_name()),
            }
            .into());
        }
        log::debug!("Parsed {} table {}", files.side, table.qualified_name());
        tables.push(table);
    }

    if tables.is_empty() {
        return Err(CodegenError::EmptySide { side: files.side });
    }

    let constraints = files
        .constraints
        .iter()
        .map(|file| Constraint::parse(&file.name, &file.content))
        .collect::<Result<Vec<_>, _>>()?;

    let ordering = files.ordering.as_deref().map(parse_ordering);

    Ok(SchemaContext::build(files.side, tables, constraints, ordering)?)
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
