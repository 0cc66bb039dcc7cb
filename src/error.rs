//! Error handling for the iron application.
//! Defines the error taxonomy and result type used throughout the crate.

use colored::Colorize;
use std::io;
use thiserror::Error;

/// Errors that can occur while running an iron command.
///
/// Every variant is fatal for the command that produced it. Tolerated failures
/// (package descriptor lookup, `.gitignore` update) are returned as `Err` too, but
/// their callers log them instead of propagating.
#[derive(Error, Debug)]
pub enum Error {
    /// A required source file is missing
    #[error("{file} not found{hint}")]
    ConfigNotFound { file: String, hint: String },

    /// A declarative document (YAML or JSON) could not be parsed
    #[error("Invalid {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// The serialized document is not a valid template, or the rendered text
    /// could not be read back as a document
    #[error("Template syntax error in {file}: {reason}")]
    TemplateSyntaxError { file: String, reason: String },

    /// A placeholder failed while being evaluated against the render context
    #[error("Failed to evaluate {file}: {reason}")]
    ContextEvaluationError { file: String, reason: String },

    /// Represents errors that occur during file system operations
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Represents validation failures in user input or data
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Represents errors raised by the interactive prompt provider
    #[error("Prompt error: {0}")]
    PromptError(String),

    /// Represents failures to start the Foundry VTT process
    #[error("Launch error: {0}")]
    LaunchError(String),
}

impl Error {
    /// Builds a [`Error::ConfigNotFound`] for `file`, without a hint.
    pub fn not_found<S: Into<String>>(file: S) -> Self {
        Error::ConfigNotFound { file: file.into(), hint: String::new() }
    }

    /// Builds a [`Error::ParseError`] for `file`.
    pub fn parse<S: Into<String>, R: ToString>(file: S, reason: R) -> Self {
        Error::ParseError { file: file.into(), reason: reason.to_string() }
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// Prints the error message in red to stderr and exits with status code 1.
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err.to_string().red());
    std::process::exit(1);
}
