//! User input and interaction handling.
//! Interactive commands talk to the user only through [`Prompter`], so tests
//! can replace the terminal with scripted answers.

use crate::error::{Error, Result};
use dialoguer::{Confirm, Input, Select};

/// Source of answers for interactive questions.
pub trait Prompter {
    /// Asks for free text, offering `default` when it is not empty.
    fn input(&self, prompt: &str, default: &str) -> Result<String>;

    /// Asks the user to pick one of `items`. Returns the chosen index.
    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize>;

    /// Asks a yes/no question. Returns true right away when `skip` is set.
    fn confirm(&self, skip: bool, prompt: &str) -> Result<bool>;
}

/// Prompter backed by the terminal.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str, default: &str) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(|e| Error::PromptError(e.to_string()))
    }

    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .default(default)
            .items(items)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }

    fn confirm(&self, skip: bool, prompt: &str) -> Result<bool> {
        if skip {
            return Ok(true);
        }
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }
}
