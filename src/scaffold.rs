//! Project scaffolding.
//! The `init` flow, the entry script and the `.gitignore` entries iron manages.

use crate::constants::{
    DEFAULT_TEMPLATE_SCHEMA, INITIAL_VERSION, MAIN_SCRIPT, PACKAGE_DESCRIPTOR_FILE,
    PROJECT_CONFIG_FILE, TEMPLATE_SCHEMA_FILE,
};
use crate::document::to_json_pretty;
use crate::error::{Error, Result};
use crate::languages::create_language;
use crate::manifest::{load_manifest, save_manifest, Compatibility, Manifest};
use crate::project::{save_project_config, validate_canonical_name, ProjectConfig, ProjectType};
use crate::prompt::Prompter;
use log::debug;
use std::path::{Path, PathBuf};

const GITIGNORE_FILE: &str = ".gitignore";
const GITIGNORE_HEADER: &str = "# iron build output";
const TS_ENTRY: &str = "src/main.ts";
const TS_ESMODULE: &str = "main.js";
const JS_ENTRY: &str = "scripts/main.js";
const DEFAULT_DIST: &str = "dist";

/// Answers to the init questions. Anything left `None` is asked for.
#[derive(Debug, Default, Clone)]
pub struct InitOptions {
    pub root: PathBuf,
    pub project_type: Option<ProjectType>,
    pub title: Option<String>,
    pub canonical_name: Option<String>,
    pub foundry_data: Option<PathBuf>,
    /// Build output directory; an empty path means the project root
    pub dist_path: Option<PathBuf>,
    /// Offered when `foundry_data` has to be asked for
    pub default_foundry_data: Option<PathBuf>,
    /// Take the offered default instead of asking
    pub accept_defaults: bool,
}

/// Derives a package id from a title: `My Cool Module` -> `my-cool-module`.
pub fn to_kebab_case(title: &str) -> String {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn resolve_answers(
    options: InitOptions,
    prompter: &dyn Prompter,
) -> Result<(ProjectConfig, String)> {
    let accept_defaults = options.accept_defaults;
    let ask = |prompt: &str, default: &str| -> Result<String> {
        if accept_defaults {
            Ok(default.to_string())
        } else {
            prompter.input(prompt, default)
        }
    };

    let project_type = match options.project_type {
        Some(project_type) => project_type,
        None if accept_defaults => ProjectType::Module,
        None => {
            let types = [ProjectType::Module, ProjectType::System];
            let labels = [types[0].as_str(), types[1].as_str()];
            let choice = prompter.select("Project type", &labels, 0)?;
            types.get(choice).copied().ok_or_else(|| {
                Error::PromptError(format!("no project type at index {choice}"))
            })?
        }
    };

    let title = match options.title {
        Some(title) => title,
        None => {
            let default = options
                .root
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            ask("Title", &default)?
        }
    };

    let canonical_name = match options.canonical_name {
        Some(name) => name,
        None => ask("Canonical name", &to_kebab_case(&title))?,
    };
    validate_canonical_name(&canonical_name)?;

    let foundry_data = match options.foundry_data {
        Some(path) => path,
        None => {
            let default = options
                .default_foundry_data
                .map(|path| path.display().to_string())
                .unwrap_or_default();
            PathBuf::from(ask("Foundry VTT data path", &default)?)
        }
    };
    if foundry_data.as_os_str().is_empty() {
        return Err(Error::ValidationError("Foundry VTT data path cannot be empty".to_string()));
    }

    let dist_path = match options.dist_path {
        Some(path) => path,
        None => PathBuf::from(ask("Build output directory", DEFAULT_DIST)?),
    };
    let dist_path = (!dist_path.as_os_str().is_empty()).then_some(dist_path);

    let config = ProjectConfig {
        project_type,
        canonical_name,
        root_path: options.root,
        foundry_data,
        dist_path,
    };
    Ok((config, title))
}

/// Initializes a project in `options.root`.
///
/// Writes `ironconfig.json`, the manifest source, an English language file and,
/// for systems, a `template.yml` skeleton.
///
/// # Errors
/// * `Error::ValidationError` if the directory already holds a project, or the
///   canonical name is invalid
pub fn init(options: InitOptions, prompter: &dyn Prompter) -> Result<ProjectConfig> {
    if options.root.join(PROJECT_CONFIG_FILE).exists() {
        return Err(Error::ValidationError(format!(
            "{PROJECT_CONFIG_FILE} already exists in {}",
            options.root.display()
        )));
    }
    let (config, title) = resolve_answers(options, prompter)?;
    std::fs::create_dir_all(&config.root_path)?;

    let manifest = Manifest {
        id: config.canonical_name.clone(),
        title,
        version: INITIAL_VERSION.to_string(),
        compatibility: Some(Compatibility {
            minimum: Some("12".to_string()),
            verified: Some("13".to_string()),
            maximum: None,
        }),
        ..Manifest::default()
    };
    save_manifest(&config, &manifest)?;

    if config.project_type == ProjectType::System {
        let schema_path = config.root_path.join(TEMPLATE_SCHEMA_FILE);
        if !schema_path.exists() {
            std::fs::write(&schema_path, DEFAULT_TEMPLATE_SCHEMA)?;
        }
    }

    create_language(&config, "en", "English", None)?;
    save_project_config(&config)?;
    Ok(config)
}

/// Lines iron wants ignored for `config`.
pub fn gitignore_entries(config: &ProjectConfig) -> Vec<String> {
    let mut entries = vec!["node_modules/".to_string()];
    if let Some(dist) = &config.dist_path {
        entries.push(format!("{}/", dist.display()));
    }
    entries
}

/// Appends `entries` missing from `<root>/.gitignore`, creating the file.
///
/// Returns whether the file changed. Callers treat failures as non-fatal.
pub fn update_gitignore<P: AsRef<Path>>(root: P, entries: &[String]) -> Result<bool> {
    let path = root.as_ref().join(GITIGNORE_FILE);
    let mut content = if path.exists() { std::fs::read_to_string(&path)? } else { String::new() };

    let missing: Vec<&String> = entries
        .iter()
        .filter(|entry| !content.lines().any(|line| line.trim() == entry.as_str()))
        .collect();
    if missing.is_empty() {
        return Ok(false);
    }

    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    if !content.lines().any(|line| line == GITIGNORE_HEADER) {
        if !content.is_empty() {
            content.push('\n');
        }
        content.push_str(GITIGNORE_HEADER);
        content.push('\n');
    }
    for entry in missing {
        content.push_str(entry);
        content.push('\n');
    }
    std::fs::write(&path, content)?;
    Ok(true)
}

/// Writes the entry script of `config` and registers it in the manifest.
///
/// Plain projects get `scripts/main.js`. TypeScript projects get
/// `tsconfig.json`, `package.json` and `src/main.ts`, and register the compiled
/// `main.js`; installing the npm dependencies is left to the user. Existing
/// files are kept. Returns whether the script was newly registered.
pub fn create_main_script(config: &ProjectConfig, typescript: bool) -> Result<bool> {
    let mut manifest = load_manifest(config)?;
    let esmodule = if typescript {
        write_typescript_project(config, &manifest)?;
        TS_ESMODULE
    } else {
        write_text_if_missing(&config.root_path.join(JS_ENTRY), MAIN_SCRIPT)?;
        JS_ENTRY
    };

    let added = manifest.add_esmodule(esmodule);
    if added {
        save_manifest(config, &manifest)?;
    }
    Ok(added)
}

fn write_typescript_project(config: &ProjectConfig, manifest: &Manifest) -> Result<()> {
    let out_dir = config
        .dist_path
        .as_ref()
        .map(|dist| dist.display().to_string())
        .unwrap_or_else(|| ".".to_string());

    let tsconfig = serde_json::json!({
        "compilerOptions": {
            "target": "es2022",
            "module": "es2022",
            "rootDir": "src",
            "outDir": out_dir,
            "moduleResolution": "node",
            "sourceMap": true,
            "esModuleInterop": true,
            "strict": true,
            "skipLibCheck": true,
            "types": ["@league-of-foundry-developers/foundry-vtt-types"]
        }
    });
    write_if_missing(&config.root_path.join("tsconfig.json"), &tsconfig)?;

    let package = serde_json::json!({
        "name": manifest.id,
        "version": manifest.version,
        "private": true,
        "scripts": { "build": "npx tsc" },
        "devDependencies": {
            "typescript": "^5.4.0",
            "@league-of-foundry-developers/foundry-vtt-types":
                "github:League-of-Foundry-Developers/foundry-vtt-types#main"
        }
    });
    write_if_missing(&config.root_path.join(PACKAGE_DESCRIPTOR_FILE), &package)?;

    write_text_if_missing(&config.root_path.join(TS_ENTRY), MAIN_SCRIPT)
}

fn write_text_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        debug!("Keeping existing {}", path.display());
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    debug!("Wrote {}", path.display());
    Ok(())
}

fn write_if_missing(path: &Path, value: &serde_json::Value) -> Result<()> {
    let content = to_json_pretty(value)
        .map_err(|e| Error::parse(crate::document::display_name(path), e))?;
    write_text_if_missing(path, &content)
}
