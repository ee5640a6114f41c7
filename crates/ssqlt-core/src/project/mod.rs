//! Project discovery and loading

mod loading;

use crate::config::Config;
use crate::context::Side;
use std::path::PathBuf;

/// A SQL input file read from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlFile {
    /// Full path, for error reporting
    pub path: PathBuf,

    /// File name, which encodes the file's meaning
    pub name: String,

    pub content: String,
}

/// Input files of one side (source or target)
#[derive(Debug, Clone)]
pub struct SideFiles {
    pub side: Side,

    /// Directory the files were read from
    pub root: PathBuf,

    /// `create/<schema>.<table>.sql`, sorted by file name
    pub creates: Vec<SqlFile>,

    /// `constraints/<schema>.<table>.<kind>.<index>.<phase>.sql`, sorted by file name
    pub constraints: Vec<SqlFile>,

    /// Contents of `ordering.txt`, when present
    pub ordering: Option<String>,
}

/// Input files of the universal mapping layer
#[derive(Debug, Clone)]
pub struct UniversalFiles {
    pub root: PathBuf,

    /// Contents of `attributes.csv`
    pub attributes: String,

    /// `to/` templates: native shape to canonical attributes
    pub to_files: Vec<SqlFile>,

    /// `from/` templates: canonical attributes to native shape
    pub from_files: Vec<SqlFile>,
}

/// Represents a transducer project
#[derive(Debug)]
pub struct Project {
    /// Project root directory
    pub root: PathBuf,

    /// Project configuration
    pub config: Config,

    pub source: SideFiles,

    pub target: SideFiles,

    pub universal: UniversalFiles,
}

impl Project {
    /// Files of the given side
    pub fn side(&self, side: Side) -> &SideFiles {
        match side {
            Side::Source => &self.source,
            Side::Target => &self.target,
        }
    }

    /// Where the compiled document goes unless overridden
    pub fn output_path(&self) -> PathBuf {
        self.config.output_path_absolute(&self.root)
    }
}

#[cfg(test)]
#[path = "project_test.rs"]
mod tests;
