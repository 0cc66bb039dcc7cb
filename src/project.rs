//! Project configuration handling.
//! Reads and writes `ironconfig.json`, the record every command starts from.

use crate::constants::{LANG_DIR, PROJECT_CONFIG_FILE};
use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Kind of Foundry VTT package a project builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Module,
    System,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Module => "module",
            ProjectType::System => "system",
        }
    }

    /// File name of the manifest source, e.g. `module.yml`.
    pub fn manifest_source(&self) -> String {
        format!("{}.yml", self.as_str())
    }

    /// File name of the rendered manifest, e.g. `module.json`.
    pub fn manifest_output(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Persisted project configuration (`ironconfig.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub canonical_name: String,
    pub root_path: PathBuf,
    /// Foundry VTT user data directory
    #[serde(alias = "externalDataPath")]
    pub foundry_data: PathBuf,
    /// Build output directory, relative to `root_path` unless absolute
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "outputPath")]
    pub dist_path: Option<PathBuf>,
}

impl ProjectConfig {
    /// Directory the build writes into. Defaults to the project root.
    pub fn output_dir(&self) -> PathBuf {
        match &self.dist_path {
            Some(dist) => self.root_path.join(dist),
            None => self.root_path.clone(),
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root_path.join(self.project_type.manifest_source())
    }

    pub fn lang_dir(&self) -> PathBuf {
        self.root_path.join(LANG_DIR)
    }

    /// Source file for the language `code`, e.g. `lang/en.yml`.
    pub fn lang_path(&self, code: &str) -> PathBuf {
        self.lang_dir().join(format!("{code}.yml"))
    }

    /// Whether `id` is this project's canonical name. A missing id never is.
    pub fn matches_id(&self, id: Option<&str>) -> bool {
        id == Some(self.canonical_name.as_str())
    }

    /// Where `iron link` places the symlink inside the Foundry data directory.
    pub fn link_target(&self) -> PathBuf {
        self.foundry_data
            .join("Data")
            .join(format!("{}s", self.project_type))
            .join(&self.canonical_name)
    }
}

/// Checks that a canonical name can be used as a Foundry package id.
pub fn validate_canonical_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::ValidationError("canonical name cannot be empty".to_string()));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(Error::ValidationError(format!(
            "canonical name '{name}' cannot contain whitespace"
        )));
    }
    Ok(())
}

/// Loads `ironconfig.json` from `project_dir`.
pub fn load_project_config<P: AsRef<Path>>(project_dir: P) -> Result<ProjectConfig> {
    let path = project_dir.as_ref().join(PROJECT_CONFIG_FILE);
    debug!("Loading project configuration from {}", path.display());
    if !path.is_file() {
        return Err(Error::ConfigNotFound {
            file: PROJECT_CONFIG_FILE.to_string(),
            hint: ". Please run `iron init` first".to_string(),
        });
    }
    let content = std::fs::read_to_string(&path)?;
    serde_json::from_str(&content).map_err(|e| Error::parse(PROJECT_CONFIG_FILE, e))
}

/// Writes `config` to `<root_path>/ironconfig.json`, replacing any existing file.
pub fn save_project_config(config: &ProjectConfig) -> Result<()> {
    let path = config.root_path.join(PROJECT_CONFIG_FILE);
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| Error::parse(PROJECT_CONFIG_FILE, e))?;
    std::fs::write(&path, content)?;
    debug!("Wrote {}", path.display());
    Ok(())
}
