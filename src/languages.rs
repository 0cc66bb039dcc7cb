//! Localization file management.
//! Creates language files, registers them in the manifest and fills the keys a
//! translation is missing compared to a base language.

use crate::constants::{DEFAULT_LANG_FILE, LANG_DIR};
use crate::document::display_name;
use crate::error::{Error, Result};
use crate::manifest::{load_manifest, save_manifest, LanguageEntry, Manifest};
use crate::project::ProjectConfig;
use crate::prompt::Prompter;
use indexmap::{IndexMap, IndexSet};
use log::debug;
use std::path::Path;

/// Translation table of one language, in file order. Values keep their YAML
/// form, so numbers and nested tables survive a rewrite.
pub type Translations = IndexMap<String, serde_yaml::Value>;

/// Returns the keys of `base` that `target` lacks, in `base` order.
pub fn diff_keys(base: &Translations, target: &Translations) -> IndexSet<String> {
    base.keys().filter(|key| !target.contains_key(*key)).cloned().collect()
}

/// Adds every key of `missing` to `target`.
///
/// Interactive merges ask for each scalar key, offering the base value; an
/// empty answer keeps the base value. Otherwise base values are copied unchanged.
/// Keys of `missing` that are not in `base` are skipped.
pub fn merge(
    mut target: Translations,
    base: &Translations,
    missing: &IndexSet<String>,
    interactive: bool,
    prompter: &dyn Prompter,
) -> Result<Translations> {
    for key in missing {
        let Some(default) = base.get(key) else {
            continue;
        };
        let value = match prompt_text(default) {
            Some(text) if interactive => {
                let answer = prompter.input(key, &text)?;
                if answer.is_empty() {
                    default.clone()
                } else {
                    serde_yaml::Value::String(answer)
                }
            }
            _ => default.clone(),
        };
        target.insert(key.clone(), value);
    }
    Ok(target)
}

// Scalars are offered for translation; nested tables are copied as they are.
fn prompt_text(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(text) => Some(text.clone()),
        serde_yaml::Value::Number(number) => Some(number.to_string()),
        serde_yaml::Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Appends a language entry to `manifest`.
///
/// # Errors
/// * `Error::ValidationError` if `code` is already registered
pub fn register_language(
    mut manifest: Manifest,
    code: &str,
    name: &str,
    path: &str,
) -> Result<Manifest> {
    if manifest.has_language(code) {
        return Err(Error::ValidationError(format!("language '{code}' is already registered")));
    }
    manifest.languages.get_or_insert_with(Vec::new).push(LanguageEntry {
        lang: code.to_string(),
        name: name.to_string(),
        path: path.to_string(),
    });
    Ok(manifest)
}

/// Reads a language file.
pub fn read_translations<P: AsRef<Path>>(path: P) -> Result<Translations> {
    let path = path.as_ref();
    let name = display_name(path);
    if !path.is_file() {
        return Err(Error::not_found(format!("{LANG_DIR}/{name}")));
    }
    let content = std::fs::read_to_string(path)?;
    let translations: Option<Translations> =
        serde_yaml::from_str(&content).map_err(|e| Error::parse(&name, e))?;
    Ok(translations.unwrap_or_default())
}

/// Writes a language file, replacing its content.
pub fn write_translations<P: AsRef<Path>>(path: P, translations: &Translations) -> Result<()> {
    let path = path.as_ref();
    let content =
        serde_yaml::to_string(translations).map_err(|e| Error::parse(display_name(path), e))?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Creates `lang/<code>.yml` and registers it in the manifest.
///
/// The file is a copy of `base` when that language exists, the default
/// skeleton otherwise. A language that is its own base keeps its file. The
/// file is written before the manifest is touched, so a failed write never
/// leaves a manifest entry without a file.
pub fn create_language(
    config: &ProjectConfig,
    code: &str,
    name: &str,
    base: Option<&str>,
) -> Result<()> {
    let manifest = load_manifest(config)?;
    if manifest.has_language(code) {
        return Err(Error::ValidationError(format!("language '{code}' is already registered")));
    }

    std::fs::create_dir_all(config.lang_dir())?;
    let lang_path = config.lang_path(code);
    match base.map(|base| config.lang_path(base)).filter(|path| path.is_file()) {
        Some(base_path) if base_path == lang_path => {
            debug!("Keeping existing {}", lang_path.display());
        }
        Some(base_path) => {
            debug!("Copying {} to {}", base_path.display(), lang_path.display());
            std::fs::copy(&base_path, &lang_path)?;
        }
        None => {
            debug!("Writing default language file {}", lang_path.display());
            std::fs::write(&lang_path, DEFAULT_LANG_FILE)?;
        }
    }

    let manifest = register_language(manifest, code, name, &format!("{LANG_DIR}/{code}.json"))?;
    save_manifest(config, &manifest)
}

/// Fills the keys `lang/<code>.yml` lacks compared to `lang/<base>.yml`.
///
/// Returns the keys that were added. The target file is rewritten once, at the end;
/// interactive runs ask before writing and add nothing when declined.
pub fn update_language(
    config: &ProjectConfig,
    code: &str,
    base: &str,
    interactive: bool,
    prompter: &dyn Prompter,
) -> Result<IndexSet<String>> {
    let lang_path = config.lang_path(code);
    let target = read_translations(&lang_path)?;
    let base = read_translations(config.lang_path(base))?;

    let missing = diff_keys(&base, &target);
    if missing.is_empty() {
        debug!("{} is up to date", lang_path.display());
        return Ok(missing);
    }
    let merged = merge(target, &base, &missing, interactive, prompter)?;
    let question =
        format!("Write {} new key(s) to {LANG_DIR}/{}?", missing.len(), display_name(&lang_path));
    if !prompter.confirm(!interactive, &question)? {
        debug!("Left {} unchanged", lang_path.display());
        return Ok(IndexSet::new());
    }
    write_translations(&lang_path, &merged)?;
    Ok(missing)
}
