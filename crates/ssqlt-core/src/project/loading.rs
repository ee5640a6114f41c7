//! Reading a project's input directories

use crate::config::Config;
use crate::context::Side;
use crate::error::{CoreError, CoreResult};
use std::path::Path;

use super::{Project, SideFiles, SqlFile, UniversalFiles};

const CREATE_DIR: &str = "create";
const CONSTRAINTS_DIR: &str = "constraints";
const ORDERING_FILE: &str = "ordering.txt";
const ATTRIBUTES_FILE: &str = "attributes.csv";
const TO_DIR: &str = "to";
const FROM_DIR: &str = "from";

fn read_file(path: &Path) -> CoreResult<String> {
    std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
        path: path.display().to_string(),
        source: e,
    })
}

/// Read every `.sql` file directly inside `dir`, sorted by file name.
///
/// A missing directory is an error only when `required` is set.
fn read_sql_dir(dir: &Path, required: bool) -> CoreResult<Vec<SqlFile>> {
    if !dir.is_dir() {
        if required {
            return Err(CoreError::MissingDirectory {
                path: dir.display().to_string(),
            });
        }
        log::debug!("Optional directory {} not present", dir.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| CoreError::IoWithPath {
        path: dir.display().to_string(),
        source: e,
    })? {
        let entry = entry.map_err(|e| CoreError::IoWithPath {
            path: dir.display().to_string(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() || !path.extension().is_some_and(|e| e == "sql") {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            log::warn!("Skipping non UTF-8 file name {}", path.display());
            continue;
        };
        let content = read_file(&path)?;
        files.push(SqlFile {
            path,
            name,
            content,
        });
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

impl SideFiles {
    /// Read `create/`, `constraints/` and `ordering.txt` under `root`
    pub fn load(side: Side, root: &Path) -> CoreResult<Self> {
        let creates = read_sql_dir(&root.join(CREATE_DIR), true)?;
        let constraints = read_sql_dir(&root.join(CONSTRAINTS_DIR), false)?;
        let ordering_path = root.join(ORDERING_FILE);
        let ordering = if ordering_path.is_file() {
            Some(read_file(&ordering_path)?)
        } else {
            None
        };
        log::debug!(
            "Loaded {} side: {} create files, {} constraint files",
            side,
            creates.len(),
            constraints.len()
        );
        Ok(Self {
            side,
            root: root.to_path_buf(),
            creates,
            constraints,
            ordering,
        })
    }
}

impl UniversalFiles {
    /// Read `attributes.csv`, `to/` and `from/` under `root`
    pub fn load(root: &Path) -> CoreResult<Self> {
        if !root.is_dir() {
            return Err(CoreError::MissingDirectory {
                path: root.display().to_string(),
            });
        }
        let attributes = read_file(&root.join(ATTRIBUTES_FILE))?;
        let to_files = read_sql_dir(&root.join(TO_DIR), true)?;
        let from_files = read_sql_dir(&root.join(FROM_DIR), true)?;
        Ok(Self {
            root: root.to_path_buf(),
            attributes,
            to_files,
            from_files,
        })
    }
}

impl Project {
    /// Load a project from a directory
    pub fn load(path: &Path) -> CoreResult<Self> {
        let root = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };

        if !root.exists() {
            return Err(CoreError::ProjectNotFound {
                path: root.display().to_string(),
            });
        }

        let config = Config::load_from_dir(&root)?;

        let source = SideFiles::load(Side::Source, &config.source_path_absolute(&root))?;
        let target = SideFiles::load(Side::Target, &config.target_path_absolute(&root))?;
        let universal = UniversalFiles::load(&config.universal_path_absolute(&root))?;

        Ok(Self {
            root,
            config,
            source,
            target,
            universal,
        })
    }
}
