//! Manifest store.
//! Loads and saves the `<type>.yml` manifest source of a project.

use crate::error::{Error, Result};
use crate::project::ProjectConfig;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

/// Foundry version compatibility range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Compatibility {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<String>,
}

/// A language registered in the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageEntry {
    /// Language code, e.g. `fr`
    pub lang: String,
    /// Display name, e.g. `Français`
    pub name: String,
    /// Path of the built file relative to the output directory
    pub path: String,
}

/// Manifest source of a module or system.
///
/// Keys iron does not know about are kept in `extra` and written back as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<Compatibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub esmodules: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<LanguageEntry>>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Manifest {
    /// Adds `entry` to `esmodules`. Returns false if it was already listed.
    pub fn add_esmodule<S: Into<String>>(&mut self, entry: S) -> bool {
        let entry = entry.into();
        let esmodules = self.esmodules.get_or_insert_with(Vec::new);
        if esmodules.contains(&entry) {
            return false;
        }
        esmodules.push(entry);
        true
    }

    pub fn has_language(&self, code: &str) -> bool {
        self.languages
            .as_ref()
            .is_some_and(|languages| languages.iter().any(|l| l.lang == code))
    }

    /// Whether the manifest id drifted from the project's canonical name.
    pub fn id_mismatch(&self, config: &ProjectConfig) -> bool {
        !config.matches_id(Some(&self.id))
    }
}

/// Loads the manifest source named after the project type.
///
/// # Errors
/// * `Error::ConfigNotFound` if the file is missing
/// * `Error::ParseError` if the file is malformed
pub fn load_manifest(config: &ProjectConfig) -> Result<Manifest> {
    let file = config.project_type.manifest_source();
    let path = config.manifest_path();
    if !path.is_file() {
        return Err(Error::not_found(file));
    }
    debug!("Loading manifest from {}", path.display());
    let content = std::fs::read_to_string(&path)?;
    serde_yaml::from_str(&content).map_err(|e| Error::parse(file, e))
}

/// Writes `manifest` back to the manifest source, replacing its content.
pub fn save_manifest(config: &ProjectConfig, manifest: &Manifest) -> Result<()> {
    let file = config.project_type.manifest_source();
    let content = serde_yaml::to_string(manifest).map_err(|e| Error::parse(file, e))?;
    std::fs::write(config.manifest_path(), content)?;
    debug!("Saved manifest to {}", config.manifest_path().display());
    Ok(())
}
