//! Configuration types and parsing for transducer.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names, in lookup order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["transducer.yml", "transducer.yaml"];

/// Main project configuration from transducer.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Schema holding the loop-marker table and the cross-schema functions
    #[serde(default = "default_schema")]
    pub schema: String,

    /// Directory with the source side's create/ and constraints/ files
    #[serde(default = "default_source_path")]
    pub source_path: String,

    /// Directory with the target side's create/ and constraints/ files
    #[serde(default = "default_target_path")]
    pub target_path: String,

    /// Directory with attributes.csv and the to/ and from/ mapping templates
    #[serde(default = "default_universal_path")]
    pub universal_path: String,

    /// File the compiled document is written to
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

fn default_schema() -> String {
    "transducer".to_string()
}

fn default_source_path() -> String {
    "source".to_string()
}

fn default_target_path() -> String {
    "target".to_string()
}

fn default_universal_path() -> String {
    "universal".to_string()
}

fn default_output_path() -> String {
    "build/transducer.sql".to_string()
}

/// Whether `name` can be used unquoted as a PostgreSQL identifier
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory.
    /// Looks for transducer.yml or transducer.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
            .map(|path| Self::load(&path))
            .unwrap_or_else(|| {
                Err(CoreError::ConfigNotFound {
                    path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
                })
            })
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Project name cannot be empty".to_string(),
            });
        }

        if !is_identifier(&self.schema) {
            return Err(CoreError::ConfigInvalid {
                message: format!("schema '{}' is not a valid identifier", self.schema),
            });
        }

        let paths = [
            ("source_path", &self.source_path),
            ("target_path", &self.target_path),
            ("universal_path", &self.universal_path),
        ];
        for (i, (key, path)) in paths.iter().enumerate() {
            if path.trim().is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: format!("{key} cannot be empty"),
                });
            }
            if let Some((other, _)) = paths[..i].iter().find(|(_, p)| p == path) {
                return Err(CoreError::ConfigInvalid {
                    message: format!("{key} and {other} both point to '{path}'"),
                });
            }
        }

        Ok(())
    }

    pub fn source_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.source_path)
    }

    pub fn target_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.target_path)
    }

    pub fn universal_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.universal_path)
    }

    pub fn output_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.output_path)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
