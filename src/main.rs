//! iron's main application entry point.
//! Parses the command line, snapshots the process environment and dispatches
//! to the library operations.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use colored::Colorize;
use iron::{
    build::build,
    cli::{get_args, Args, Command, FoundryCommand, InitArgs, LangCommand},
    constants::FOUNDRY_VERSIONS_DIR,
    context::{build_context, package_descriptor_or_empty, Environment},
    error::{default_error_handler, Error, Result},
    foundry::{latest_version, launch, link, list_versions, validate_timed_url},
    languages::{create_language, update_language},
    logger::init_logger,
    manifest::load_manifest,
    project::{load_project_config, ProjectConfig},
    prompt::DialoguerPrompter,
    renderer::MiniJinjaRenderer,
    scaffold::{create_main_script, gitignore_entries, init, update_gitignore, InitOptions},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    let project_dir = std::path::absolute(&args.project)?;
    match args.command {
        Command::Init(init_args) => run_init(&project_dir, init_args),
        Command::Build => run_build(&project_dir),
        Command::Link => run_link(&project_dir),
        Command::Script { typescript } => {
            let config = load_project_config(&project_dir)?;
            run_script(&config, typescript)
        }
        Command::Lang(command) => run_lang(&project_dir, command),
        Command::Foundry(command) => run_foundry(&project_dir, command),
    }
}

fn run_init(project_dir: &Path, init_args: InitArgs) -> Result<()> {
    let prompt = DialoguerPrompter::new();
    let options = InitOptions {
        root: project_dir.to_path_buf(),
        project_type: init_args.project_type.map(Into::into),
        title: init_args.title,
        canonical_name: init_args.name,
        foundry_data: init_args.foundry_data,
        dist_path: init_args.dist,
        default_foundry_data: dirs::data_local_dir().map(|dir| dir.join("FoundryVTT")),
        accept_defaults: init_args.yes,
    };
    let config = init(options, &prompt)?;
    let message = format!("Initialized {} '{}'", config.project_type, config.canonical_name);
    println!("{}", message.green());

    if let Err(e) = update_gitignore(&config.root_path, &gitignore_entries(&config)) {
        log::warn!("Could not update .gitignore: {e}");
    }
    if init_args.typescript {
        run_script(&config, true)?;
    }
    Ok(())
}

fn run_build(project_dir: &Path) -> Result<()> {
    let config = load_project_config(project_dir)?;
    println!("{}", "Building...".green());

    let env: Environment = std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect();
    let package = package_descriptor_or_empty(&config.root_path);
    let context = build_context(&config, package, &env)?;
    let engine = MiniJinjaRenderer::for_json();

    match build(&engine, &config, &context) {
        Ok(report) => {
            for target in report.written {
                println!("Wrote: '{}'", target.display());
            }
            println!("{}", "Built!".green());
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", "Build failed, fix the error below and run `iron build` again.".red());
            Err(e)
        }
    }
}

fn run_link(project_dir: &Path) -> Result<()> {
    let config = load_project_config(project_dir)?;
    warn_on_id_mismatch(&config);
    println!("{}", format!("Linking {}...", config.project_type).green());
    let target = link(&config)?;
    println!("{}", format!("Linked {} to '{}'", config.project_type, target.display()).green());
    Ok(())
}

fn run_script(config: &ProjectConfig, typescript: bool) -> Result<()> {
    if create_main_script(config, typescript)? {
        println!("{}", "Registered the entry script in the manifest".green());
    }
    if typescript {
        println!("Run `npm install` and `npm run build` to compile the entry script.");
    }
    Ok(())
}

fn run_lang(project_dir: &Path, command: LangCommand) -> Result<()> {
    let config = load_project_config(project_dir)?;
    match command {
        LangCommand::Create { code, name, base } => {
            create_language(&config, &code, &name, base.as_deref())?;
            println!("{}", format!("Created language '{code}'").green());
        }
        LangCommand::Update { code, base, interactive } => {
            let prompt = DialoguerPrompter::new();
            let added = update_language(&config, &code, &base, interactive, &prompt)?;
            println!("{}", format!("Added {} key(s) to '{code}'", added.len()).green());
        }
    }
    Ok(())
}

fn run_foundry(project_dir: &Path, command: FoundryCommand) -> Result<()> {
    let versions_dir = versions_dir()?;
    match command {
        FoundryCommand::Versions => {
            let versions = list_versions(&versions_dir)?;
            let latest = latest_version(&versions).cloned();
            for version in versions {
                if Some(&version) == latest.as_ref() {
                    println!("{}", format!("{version} (latest)").green().bold());
                } else {
                    println!("{}", version.green());
                }
            }
        }
        FoundryCommand::CheckUrl { url } => {
            let now =
                SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
            let timed = validate_timed_url(&url, now)?;
            let message = format!(
                "Timed URL for Foundry VTT {} is valid for {}s",
                timed.version,
                timed.expires - now
            );
            println!("{}", message.green());
        }
        FoundryCommand::Launch { release, port } => {
            let config = load_project_config(project_dir)?;
            let version = match release {
                Some(version) => version,
                None => latest_version(&list_versions(&versions_dir)?)
                    .cloned()
                    .ok_or_else(|| {
                        Error::LaunchError("no Foundry VTT version installed".to_string())
                    })?,
            };
            println!("{}", format!("Starting Foundry VTT {version} on port {port}").green());
            launch(versions_dir.join(&version), &config.foundry_data, port)?;
        }
    }
    Ok(())
}

fn versions_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(FOUNDRY_VERSIONS_DIR))
        .ok_or_else(|| Error::ValidationError("cannot determine the home directory".to_string()))
}

fn warn_on_id_mismatch(config: &ProjectConfig) {
    match load_manifest(config) {
        Ok(manifest) if manifest.id_mismatch(config) => println!(
            "{}",
            format!(
                "Warning: manifest id '{}' differs from canonical name '{}'",
                manifest.id, config.canonical_name
            )
            .yellow()
        ),
        Ok(_) => {}
        Err(e) => log::debug!("Skipping id check: {e}"),
    }
}
