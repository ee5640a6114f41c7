//! Mapping templates with a closed placeholder vocabulary

use crate::error::{JinjaError, JinjaResult};
use minijinja::{context, Environment, UndefinedBehavior};
use std::collections::BTreeSet;
use std::fmt;

/// A name a mapping template may substitute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Placeholder {
    /// Schema of the table the template belongs to
    Schema,
    /// Scratch table holding canonical rows
    UniversalTablename,
    /// Shadow suffix of the table the row is read from (`_INSERT`, `_INSERT_JOIN`, ...)
    PrimarySuffix,
    /// Shadow suffix of the partner tables joined in
    SecondarySuffix,
    /// `SELECT` or `SELECT DISTINCT`
    SelectPreamble,
}

impl Placeholder {
    pub const ALL: [Placeholder; 5] = [
        Placeholder::Schema,
        Placeholder::UniversalTablename,
        Placeholder::PrimarySuffix,
        Placeholder::SecondarySuffix,
        Placeholder::SelectPreamble,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Placeholder::Schema => "schema",
            Placeholder::UniversalTablename => "universal_tablename",
            Placeholder::PrimarySuffix => "primary_suffix",
            Placeholder::SecondarySuffix => "secondary_suffix",
            Placeholder::SelectPreamble => "select_preamble",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values substituted into a mapping template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateParams {
    pub schema: String,
    pub universal_tablename: String,
    pub primary_suffix: String,
    pub secondary_suffix: String,
    /// Render `select_preamble` as `SELECT DISTINCT`
    pub distinct: bool,
}

impl TemplateParams {
    pub fn new(schema: &str) -> Self {
        Self {
            schema: schema.to_string(),
            ..Self::default()
        }
    }

    pub fn universal_tablename(mut self, name: &str) -> Self {
        self.universal_tablename = name.to_string();
        self
    }

    pub fn suffixes(mut self, primary: &str, secondary: &str) -> Self {
        self.primary_suffix = primary.to_string();
        self.secondary_suffix = secondary.to_string();
        self
    }

    pub fn distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    pub fn select_preamble(&self) -> &'static str {
        if self.distinct {
            "SELECT DISTINCT"
        } else {
            "SELECT"
        }
    }
}

/// A compiled mapping template.
///
/// Every variable the template reads is checked against [`Placeholder`] when
/// the template is built, and rendering runs with strict undefined behavior,
/// so an unknown name never renders as empty text.
#[derive(Debug, Clone)]
pub struct MappingTemplate {
    name: String,
    env: Environment<'static>,
}

impl MappingTemplate {
    pub fn new(name: &str, source: &str) -> JinjaResult<Self> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_template_owned(name.to_string(), source.trim().to_string())?;

        // sorted so the reported name does not depend on hash order
        let variables: BTreeSet<String> = env
            .get_template(name)?
            .undeclared_variables(false)
            .into_iter()
            .collect();

        if let Some(unknown) = variables
            .into_iter()
            .find(|v| Placeholder::parse(v).is_none())
        {
            return Err(JinjaError::UnresolvedPlaceholder {
                name: unknown,
                template: name.to_string(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            env,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn render(&self, params: &TemplateParams) -> JinjaResult<String> {
        let template = self.env.get_template(&self.name)?;
        let rendered = template.render(context! {
            schema => params.schema.as_str(),
            universal_tablename => params.universal_tablename.as_str(),
            primary_suffix => params.primary_suffix.as_str(),
            secondary_suffix => params.secondary_suffix.as_str(),
            select_preamble => params.select_preamble(),
        })?;
        Ok(rendered.trim().to_string())
    }
}

#[cfg(test)]
#[path = "template_test.rs"]
mod tests;
