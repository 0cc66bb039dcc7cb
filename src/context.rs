//! Render context construction.
//! Builds the fully-resolved value templates are rendered against.

use crate::constants::PACKAGE_DESCRIPTOR_FILE;
use crate::error::{Error, Result};
use crate::project::ProjectConfig;
use indexmap::IndexMap;
use log::{debug, warn};
use std::path::Path;

/// Snapshot of environment variables, taken once by the caller.
pub type Environment = IndexMap<String, String>;

/// Reads the package descriptor (`package.json`) of the project at `root`.
///
/// # Errors
/// * `Error::ConfigNotFound` if the file is missing
/// * `Error::ParseError` if it is not valid JSON
pub fn read_package_descriptor<P: AsRef<Path>>(root: P) -> Result<serde_json::Value> {
    let path = root.as_ref().join(PACKAGE_DESCRIPTOR_FILE);
    if !path.is_file() {
        return Err(Error::not_found(PACKAGE_DESCRIPTOR_FILE));
    }
    let content = std::fs::read_to_string(&path)?;
    serde_json::from_str(&content).map_err(|e| Error::parse(PACKAGE_DESCRIPTOR_FILE, e))
}

/// Returns the package descriptor, or an empty mapping when it cannot be read.
pub fn package_descriptor_or_empty<P: AsRef<Path>>(root: P) -> serde_json::Value {
    match read_package_descriptor(root) {
        Ok(descriptor) => descriptor,
        Err(Error::ConfigNotFound { .. }) => {
            debug!("No {PACKAGE_DESCRIPTOR_FILE}, rendering without package metadata");
            serde_json::Value::Object(serde_json::Map::new())
        }
        Err(e) => {
            warn!("Ignoring package metadata: {e}");
            serde_json::Value::Object(serde_json::Map::new())
        }
    }
}

/// Builds the render context.
///
/// Environment variables are available by name, the package descriptor as
/// `pkg`, and the project configuration fields (`type`, `canonicalName`,
/// `rootPath`, ...) by name. Project fields win over both other sources.
pub fn build_context(
    config: &ProjectConfig,
    package: serde_json::Value,
    env: &Environment,
) -> Result<serde_json::Value> {
    let mut context = serde_json::Map::new();
    for (key, value) in env {
        context.insert(key.clone(), serde_json::Value::String(value.clone()));
    }
    context.insert("pkg".to_string(), package);

    let project = serde_json::to_value(config).map_err(|e| Error::ContextEvaluationError {
        file: crate::constants::PROJECT_CONFIG_FILE.to_string(),
        reason: e.to_string(),
    })?;
    if let serde_json::Value::Object(fields) = project {
        context.extend(fields);
    }
    Ok(serde_json::Value::Object(context))
}
