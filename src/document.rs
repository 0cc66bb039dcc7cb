//! Reading YAML sources and writing JSON artifacts.

use crate::error::{Error, Result};
use log::debug;
use serde::Serialize;
use std::path::Path;

/// Reads a YAML file into a JSON document.
///
/// # Errors
/// * `Error::ConfigNotFound` if `path` does not exist
/// * `Error::ParseError` if the content is not valid YAML, or uses keys that
///   cannot be represented in JSON
pub fn read_yaml<P: AsRef<Path>>(path: P) -> Result<serde_json::Value> {
    let path = path.as_ref();
    let name = display_name(path);
    if !path.is_file() {
        return Err(Error::not_found(name));
    }
    debug!("Reading {}", path.display());
    let content = std::fs::read_to_string(path)?;
    parse_yaml(&content, &name)
}

/// Parses YAML text into a JSON document. An empty text is an empty mapping.
pub fn parse_yaml(content: &str, name: &str) -> Result<serde_json::Value> {
    let value: Option<serde_json::Value> =
        serde_yaml::from_str(content).map_err(|e| Error::parse(name, e))?;
    Ok(value.unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new())))
}

/// Serializes `value` as JSON indented with four spaces.
pub fn to_json_pretty<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Writes `value` as pretty JSON to `path`, creating parent directories.
pub fn write_json<P: AsRef<Path>>(path: P, value: &serde_json::Value) -> Result<()> {
    let path = path.as_ref();
    let content = to_json_pretty(value).map_err(|e| Error::parse(display_name(path), e))?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Reads the YAML file at `source` and writes it unchanged as JSON to `target`.
pub fn transcode<P: AsRef<Path>, Q: AsRef<Path>>(source: P, target: Q) -> Result<()> {
    let document = read_yaml(source)?;
    write_json(target, &document)
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
