//! Integrity-check constraints attached to native tables
//!
//! A constraint file `<schema>.<table>.<kind>.<index>.<phase>.sql` holds the
//! body of a PL/pgSQL trigger function. The constraint is installed as a
//! `BEFORE <phase>` row trigger so it polices rows before they land, ahead of
//! the `AFTER` hooks that drive propagation.

use crate::error::{CoreError, CoreResult};
use crate::file_name;
use std::fmt;

/// Row event a constraint or staging table reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    Insert,
    Delete,
}

impl Phase {
    /// Parse a phase token (case-insensitive)
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "insert" => Some(Phase::Insert),
            "delete" => Some(Phase::Delete),
            _ => None,
        }
    }

    /// SQL event keyword (`INSERT` / `DELETE`)
    pub fn as_sql(self) -> &'static str {
        match self {
            Phase::Insert => "INSERT",
            Phase::Delete => "DELETE",
        }
    }

    /// Lower-case token used in file and object names
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Insert => "insert",
            Phase::Delete => "delete",
        }
    }

    /// Trigger row variable carrying the changed row
    pub fn row_variable(self) -> &'static str {
        match self {
            Phase::Insert => "NEW",
            Phase::Delete => "OLD",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Largest sequence index that fits the three-digit padding of [`Constraint::name`]
const MAX_CONSTRAINT_INDEX: u32 = 999;

/// A named, sequenced integrity-check trigger for one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub schema: String,
    pub table: String,
    /// Free-form tag such as `fd`, `cfd`, `mvd`
    pub kind: String,
    /// Position within the table's constraints for the same phase, at most 999
    pub index: u32,
    pub phase: Phase,
    /// PL/pgSQL statements placed between `BEGIN` and `END`
    pub body: String,
}

impl Constraint {
    /// Parse a constraint from its file name and body.
    ///
    /// Fails with [`CoreError::MalformedFileName`] when the name does not have
    /// five parts or the index is not a number below 1000, and with
    /// [`CoreError::UnknownPhase`] when the phase token is not `insert` or
    /// `delete`.
    pub fn parse(file_name: &str, body: &str) -> CoreResult<Self> {
        let tokens = file_name::tokens(file_name);
        let [schema, table, kind, index, phase] = tokens.as_slice() else {
            return Err(CoreError::MalformedFileName {
                file: file_name.to_string(),
                reason: "expected <schema>.<table>.<kind>.<index>.<phase>.sql".to_string(),
            });
        };

        let index = index
            .parse::<u32>()
            .map_err(|_| CoreError::MalformedFileName {
                file: file_name.to_string(),
                reason: format!("constraint index '{index}' is not a number"),
            })?;
        if index > MAX_CONSTRAINT_INDEX {
            return Err(CoreError::MalformedFileName {
                file: file_name.to_string(),
                reason: format!(
                    "constraint index {index} exceeds {MAX_CONSTRAINT_INDEX}; trigger names would no longer sort by index"
                ),
            });
        }

        let phase = Phase::parse(phase).ok_or_else(|| CoreError::UnknownPhase {
            file: file_name.to_string(),
            phase: phase.clone(),
        })?;

        Ok(Self {
            schema: schema.clone(),
            table: table.clone(),
            kind: kind.clone(),
            index,
            phase,
            body: body.trim().to_string(),
        })
    }

    /// Base object name. The zero-padded index makes alphabetical order,
    /// which PostgreSQL uses to fire same-event triggers, match sequence order.
    pub fn name(&self) -> String {
        format!(
            "{}_{}_{:03}_{}",
            self.table,
            self.phase.as_str(),
            self.index,
            self.kind
        )
    }

    /// Schema-qualified trigger function name
    pub fn function_name(&self) -> String {
        format!("{}.{}_fn", self.schema, self.name())
    }

    /// Trigger name (PostgreSQL trigger names are never schema-qualified)
    pub fn trigger_name(&self) -> String {
        format!("{}_trigger", self.name())
    }

    pub fn generate_function(&self) -> String {
        format!(
            "CREATE OR REPLACE FUNCTION {}()\n   RETURNS TRIGGER LANGUAGE PLPGSQL AS $$\nBEGIN\n{}\nEND;  $$;",
            self.function_name(),
            self.body
        )
    }

    pub fn generate_trigger(&self) -> String {
        format!(
            "CREATE TRIGGER {}\nBEFORE {} ON {}.{}\nFOR EACH ROW\nEXECUTE FUNCTION {}();",
            self.trigger_name(),
            self.phase.as_sql(),
            self.schema,
            self.table,
            self.function_name()
        )
    }
}

#[cfg(test)]
#[path = "constraint_test.rs"]
mod tests;
