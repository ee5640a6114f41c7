//! The universal (canonical) attribute space and per-table mappings into it

use crate::error::{JinjaError, JinjaResult};
use crate::template::{MappingTemplate, TemplateParams};
use ssqlt_core::{Attribute, CoreError, MappingFileName, SqlFile};
use std::collections::{BTreeMap, HashSet};

/// Translation of one table between its native shape and the canonical shape
#[derive(Debug, Clone)]
pub struct UniversalMapping {
    pub table_name: String,

    /// Schema named by the mapping files
    pub schema: String,

    /// Tables the `to_template` joins with this one
    pub partner_tables: Vec<String>,

    /// Native row to canonical row: a `SELECT` over the table's shadow
    pub to_template: MappingTemplate,

    /// Canonical row to native row: a `SELECT` over the scratch table
    pub from_template: MappingTemplate,
}

impl UniversalMapping {
    /// Render the native to canonical query
    pub fn to_sql(
        &self,
        universal_tablename: &str,
        primary_suffix: &str,
        secondary_suffix: &str,
        distinct: bool,
    ) -> JinjaResult<String> {
        self.to_template.render(
            &TemplateParams::new(&self.schema)
                .universal_tablename(universal_tablename)
                .suffixes(primary_suffix, secondary_suffix)
                .distinct(distinct),
        )
    }

    /// Render the canonical to native query reading from `universal_tablename`
    pub fn from_sql(&self, universal_tablename: &str) -> JinjaResult<String> {
        self.from_template
            .render(&TemplateParams::new(&self.schema).universal_tablename(universal_tablename))
    }
}

/// Canonical attribute space plus every table's mapping
#[derive(Debug, Clone)]
pub struct Universal {
    /// Column set of the scratch table, in declaration order
    pub canonical_attributes: Vec<Attribute>,

    pub mappings: BTreeMap<String, UniversalMapping>,

    pub source_order: Vec<String>,

    pub target_order: Vec<String>,
}

/// Partially assembled mapping while files of both directions are read
#[derive(Default)]
struct Pending {
    schema: String,
    partners: Vec<String>,
    to_template: Option<MappingTemplate>,
    from_template: Option<MappingTemplate>,
}

impl Universal {
    /// Build the universal layer from the attributes file and the mapping
    /// templates of both directions.
    ///
    /// Each table needs exactly one `to/` and one `from/` file, and every
    /// table named in `source_order` or `target_order` needs a mapping.
    pub fn compile_templates(
        attribute_file: &str,
        from_files: &[SqlFile],
        to_files: &[SqlFile],
        source_order: Vec<String>,
        target_order: Vec<String>,
    ) -> JinjaResult<Self> {
        let canonical_attributes = Attribute::parse_list(attribute_file)?;
        let mut names = HashSet::new();
        for attr in &canonical_attributes {
            if !names.insert(attr.name.as_str()) {
                return Err(JinjaError::DuplicateAttribute {
                    name: attr.name.clone(),
                });
            }
        }

        let mut pending: BTreeMap<String, Pending> = BTreeMap::new();
        for file in to_files {
            let name = MappingFileName::parse(&file.name)?;
            let entry = pending.entry(name.target_table.clone()).or_default();
            if entry.to_template.is_some() {
                return Err(JinjaError::DuplicateMapping {
                    table: name.target_table,
                    direction: "to".to_string(),
                });
            }
            entry.to_template = Some(MappingTemplate::new(
                &format!("to/{}", file.name),
                &file.content,
            )?);
            entry.schema = name.schema;
            entry.partners = name.source_tables;
        }
        for file in from_files {
            let name = MappingFileName::parse(&file.name)?;
            let entry = pending.entry(name.target_table.clone()).or_default();
            if entry.from_template.is_some() {
                return Err(JinjaError::DuplicateMapping {
                    table: name.target_table,
                    direction: "from".to_string(),
                });
            }
            if entry.to_template.is_some() && entry.schema != name.schema {
                return Err(CoreError::SchemaMismatch {
                    expected: entry.schema.clone(),
                    found: name.schema,
                }
                .into());
            }
            entry.from_template = Some(MappingTemplate::new(
                &format!("from/{}", file.name),
                &file.content,
            )?);
            entry.schema = name.schema;
        }

        let mut mappings = BTreeMap::new();
        for (table, entry) in pending {
            let (Some(to_template), Some(from_template)) = (entry.to_template, entry.from_template)
            else {
                return Err(JinjaError::MissingMapping {
                    table,
                    reason: "both a to/ and a from/ template are required".to_string(),
                });
            };
            mappings.insert(
                table.clone(),
                UniversalMapping {
                    table_name: table,
                    schema: entry.schema,
                    partner_tables: entry.partners,
                    to_template,
                    from_template,
                },
            );
        }

        let universal = Self {
            canonical_attributes,
            mappings,
            source_order,
            target_order,
        };
        universal.validate()?;
        Ok(universal)
    }

    /// Check that every ordered table has a mapping and that partners are known
    fn validate(&self) -> JinjaResult<()> {
        for table in self.source_order.iter().chain(&self.target_order) {
            if !self.mappings.contains_key(table) {
                return Err(JinjaError::MissingMapping {
                    table: table.clone(),
                    reason: "table is ordered but has no mapping files".to_string(),
                });
            }
        }

        let ordered: HashSet<&str> = self
            .source_order
            .iter()
            .chain(&self.target_order)
            .map(String::as_str)
            .collect();
        for mapping in self.mappings.values() {
            if !ordered.contains(mapping.table_name.as_str()) {
                log::warn!(
                    "Mapping for table '{}' is not used by either side",
                    mapping.table_name
                );
            }
            if let Some(partner) = mapping
                .partner_tables
                .iter()
                .find(|p| !ordered.contains(p.as_str()))
            {
                return Err(CoreError::UnknownTable {
                    name: partner.clone(),
                    context: format!("the mapping of '{}'", mapping.table_name),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Mapping of a table
    pub fn mapping(&self, table: &str) -> JinjaResult<&UniversalMapping> {
        self.mappings
            .get(table)
            .ok_or_else(|| JinjaError::MissingMapping {
                table: table.to_string(),
                reason: "no mapping files".to_string(),
            })
    }

    pub fn attribute_names(&self) -> Vec<&str> {
        self.canonical_attributes
            .iter()
            .map(|a| a.name.as_str())
            .collect()
    }

    /// DDL of a function-scoped scratch table over the canonical attributes
    pub fn create_scratch_sql(&self, name: &str) -> String {
        let columns: Vec<String> = self
            .canonical_attributes
            .iter()
            .map(|attr| format!("    {}", attr.column_sql()))
            .collect();
        format!(
            "CREATE TEMPORARY TABLE {} (\n{}\n);",
            name,
            columns.join(",\n")
        )
    }
}

#[cfg(test)]
#[path = "universal_test.rs"]
mod tests;
