//! Parsing of the dot-separated file name encodings used by input files

use crate::error::{CoreError, CoreResult};
use crate::table::normalize_ident;

/// Split a file name into its dot-separated tokens, dropping a trailing `.sql`.
pub(crate) fn tokens(file_name: &str) -> Vec<String> {
    let stem = file_name.strip_suffix(".sql").unwrap_or(file_name);
    stem.split('.').map(normalize_ident).collect()
}

fn malformed(file_name: &str, reason: impl Into<String>) -> CoreError {
    CoreError::MalformedFileName {
        file: file_name.to_string(),
        reason: reason.into(),
    }
}

/// `<schema>.<table>.sql` name of a CREATE TABLE file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFileName {
    pub schema: String,
    pub table: String,
}

impl CreateFileName {
    pub fn parse(file_name: &str) -> CoreResult<Self> {
        match tokens(file_name).as_slice() {
            [schema, table] if !schema.is_empty() && !table.is_empty() => Ok(Self {
                schema: schema.clone(),
                table: table.clone(),
            }),
            _ => Err(malformed(file_name, "expected <schema>.<table>.sql")),
        }
    }
}

/// `<schema>.<partner>....<table>.sql` name of a mapping template file.
///
/// The last token names the table the mapping belongs to; the tokens between
/// the schema and that table name its partner tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingFileName {
    pub schema: String,
    pub source_tables: Vec<String>,
    pub target_table: String,
}

impl MappingFileName {
    pub fn parse(file_name: &str) -> CoreResult<Self> {
        let tokens = tokens(file_name);
        if tokens.len() < 2 || tokens.iter().any(String::is_empty) {
            return Err(malformed(
                file_name,
                "expected <schema>[.<partner>...].<table>.sql",
            ));
        }
        let schema = tokens[0].clone();
        let target_table = tokens[tokens.len() - 1].clone();
        let source_tables = tokens[1..tokens.len() - 1].to_vec();
        Ok(Self {
            schema,
            source_tables,
            target_table,
        })
    }
}

#[cfg(test)]
#[path = "file_name_test.rs"]
mod tests;
