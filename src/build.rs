//! Build pipeline.
//! Turns the human-editable YAML sources of a project into the JSON files
//! Foundry VTT reads, inside the project's output directory.

use crate::constants::{LANG_DIR, LANG_SOURCE_GLOB, TEMPLATE_SCHEMA_FILE, TEMPLATE_SCHEMA_OUTPUT};
use crate::document::{read_yaml, transcode, write_json};
use crate::error::{Error, Result};
use crate::project::{ProjectConfig, ProjectType};
use crate::renderer::{render_document, TemplateRenderer};
use globset::{Glob, GlobMatcher};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files written by a build, in the order they were written.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub written: Vec<PathBuf>,
}

/// Builds the project described by `config`.
///
/// # Flow
/// 1. Creates the output directory
/// 2. Loads `<type>.yml`
/// 3. Renders it against `context` into `<output>/<type>.json`
/// 4. For systems, transcodes `template.yml` into `<output>/template.json`
/// 5. Transcodes every `lang/*.yml` into `<output>/lang/*.json`
///
/// Steps are not rolled back: a failure leaves the files of earlier steps in place.
pub fn build(
    engine: &dyn TemplateRenderer,
    config: &ProjectConfig,
    context: &serde_json::Value,
) -> Result<BuildReport> {
    let mut report = BuildReport::default();
    let output_dir = config.output_dir();
    std::fs::create_dir_all(&output_dir)?;

    let manifest_source = config.project_type.manifest_source();
    let manifest = read_yaml(config.manifest_path())?;
    if !config.matches_id(manifest.get("id").and_then(|id| id.as_str())) {
        warn!(
            "{} id does not match canonical name '{}'",
            manifest_source, config.canonical_name
        );
    }

    let rendered = render_document(engine, &manifest_source, &manifest, context)?;
    let manifest_target = output_dir.join(config.project_type.manifest_output());
    write_json(&manifest_target, &rendered)?;
    report.written.push(manifest_target);

    if config.project_type == ProjectType::System {
        let schema_target = output_dir.join(TEMPLATE_SCHEMA_OUTPUT);
        transcode(config.root_path.join(TEMPLATE_SCHEMA_FILE), &schema_target)?;
        report.written.push(schema_target);
    }

    report.written.extend(build_languages(&config.lang_dir(), &output_dir.join(LANG_DIR))?);
    Ok(report)
}

/// Lists the language sources directly inside `lang_dir`, sorted by name.
pub fn language_sources<P: AsRef<Path>>(lang_dir: P) -> Result<Vec<PathBuf>> {
    let lang_dir = lang_dir.as_ref();
    if !lang_dir.is_dir() {
        debug!("No {} directory, skipping languages", lang_dir.display());
        return Ok(Vec::new());
    }
    let matcher = language_matcher()?;
    let mut sources = Vec::new();
    for entry in WalkDir::new(lang_dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::IoError(e.into()))?;
        if entry.file_type().is_file() && matcher.is_match(entry.file_name()) {
            sources.push(entry.into_path());
        }
    }
    Ok(sources)
}

fn language_matcher() -> Result<GlobMatcher> {
    Glob::new(LANG_SOURCE_GLOB)
        .map(|glob| glob.compile_matcher())
        .map_err(|e| Error::ValidationError(e.to_string()))
}

fn build_languages(lang_dir: &Path, target_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for source in language_sources(lang_dir)? {
        let Some(stem) = source.file_stem() else {
            continue;
        };
        let target = target_dir.join(format!("{}.json", stem.to_string_lossy()));
        transcode(&source, &target)?;
        written.push(target);
    }
    Ok(written)
}
