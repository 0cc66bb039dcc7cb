//! iron is a build tool for Foundry VTT modules and systems.
//! It scaffolds projects, renders manifest templates into the JSON files Foundry
//! reads, keeps language files in sync and links builds into Foundry.

/// Build pipeline turning YAML sources into JSON artifacts
pub mod build;

/// Command-line interface module for the iron application
pub mod cli;

/// File names and default file contents
pub mod constants;

/// Render context construction
pub mod context;

/// YAML reading and JSON writing helpers
pub mod document;

/// Error types and handling for the iron application
pub mod error;

/// Foundry VTT installs, launching and linking
pub mod foundry;

/// Language file creation, diffing and merging
pub mod languages;

/// Logger initialization
pub mod logger;

/// Manifest store for `module.yml` / `system.yml`
pub mod manifest;

/// Project configuration (`ironconfig.json`)
pub mod project;

/// User input and interaction handling
pub mod prompt;

/// Template rendering of declarative documents
pub mod renderer;

/// Project initialization and file scaffolding
pub mod scaffold;
