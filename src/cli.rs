//! Command-line interface implementation for iron.
//! Provides argument parsing and help text formatting using clap.

use crate::constants::FOUNDRY_DEFAULT_PORT;
use crate::project::ProjectType;
use clap::{error::ErrorKind, Args as ClapArgs, CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments structure for iron.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "iron: build tooling for Foundry VTT modules and systems",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding ironconfig.json
    #[arg(short, long, global = true, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create ironconfig.json, the manifest and an English language file
    Init(InitArgs),
    /// Render the manifest and language files into the output directory
    Build,
    /// Symlink the output directory into the Foundry VTT data directory
    Link,
    /// Create the entry script and register it in the manifest
    Script {
        /// Create a TypeScript project compiling to main.js instead of scripts/main.js
        #[arg(long)]
        typescript: bool,
    },
    /// Manage language files
    #[command(subcommand)]
    Lang(LangCommand),
    /// Manage Foundry VTT installs
    #[command(subcommand)]
    Foundry(FoundryCommand),
}

#[derive(ClapArgs, Debug, Default)]
pub struct InitArgs {
    /// Project type
    #[arg(long = "type", value_enum)]
    pub project_type: Option<ProjectTypeArg>,

    /// Title shown in Foundry VTT
    #[arg(long)]
    pub title: Option<String>,

    /// Package id, defaults to the kebab-cased title
    #[arg(long)]
    pub name: Option<String>,

    /// Foundry VTT user data directory
    #[arg(long, value_name = "DIR")]
    pub foundry_data: Option<PathBuf>,

    /// Build output directory, relative to the project
    #[arg(long, value_name = "DIR")]
    pub dist: Option<PathBuf>,

    /// Also create the TypeScript entry script
    #[arg(long)]
    pub typescript: bool,

    /// Accept the default answer of every question not given as a flag
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectTypeArg {
    Module,
    System,
}

impl From<ProjectTypeArg> for ProjectType {
    fn from(value: ProjectTypeArg) -> Self {
        match value {
            ProjectTypeArg::Module => ProjectType::Module,
            ProjectTypeArg::System => ProjectType::System,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum LangCommand {
    /// Create lang/<CODE>.yml and register it in the manifest
    Create {
        /// Language code, e.g. fr
        code: String,
        /// Display name, e.g. Français
        name: String,
        /// Language to copy the keys from
        #[arg(short, long)]
        base: Option<String>,
    },
    /// Add the keys lang/<CODE>.yml is missing compared to the base language
    Update {
        /// Language code to update
        code: String,
        /// Language to take the missing keys from
        #[arg(short, long, default_value = "en")]
        base: String,
        /// Ask for a translation of every missing key
        #[arg(short, long)]
        interactive: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum FoundryCommand {
    /// List installed Foundry VTT versions
    Versions,
    /// Check a Foundry VTT timed download URL
    CheckUrl {
        /// Timed URL from the Foundry VTT website
        url: String,
    },
    /// Start an installed Foundry VTT version with the project's data directory
    Launch {
        /// Version to start, defaults to the latest installed one.
        /// Named `--release` because `--version` prints iron's version.
        #[arg(long)]
        release: Option<String>,
        /// Port Foundry VTT listens on
        #[arg(long, default_value_t = FOUNDRY_DEFAULT_PORT)]
        port: u16,
    },
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if no subcommand is given, after printing the help
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingSubcommand
                || e.kind() == ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
