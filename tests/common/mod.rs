#![allow(dead_code)]

use iron::error::{Error, Result};
use iron::project::{ProjectConfig, ProjectType};
use iron::prompt::Prompter;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;

/// Prompter answering from a fixed script and recording every question.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    pub asked: RefCell<Vec<(String, String)>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(|a| a.to_string()).collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    fn next(&self, prompt: &str, default: &str) -> Result<String> {
        self.asked.borrow_mut().push((prompt.to_string(), default.to_string()));
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::PromptError(format!("unexpected question: {prompt}")))
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, prompt: &str, default: &str) -> Result<String> {
        self.next(prompt, default)
    }

    fn select(&self, prompt: &str, _items: &[&str], default: usize) -> Result<usize> {
        let answer = self.next(prompt, &default.to_string())?;
        answer.parse().map_err(|_| Error::PromptError(format!("not an index: {answer}")))
    }

    fn confirm(&self, skip: bool, prompt: &str) -> Result<bool> {
        if skip {
            return Ok(true);
        }
        Ok(self.next(prompt, "n")? == "y")
    }
}

pub fn project(root: &Path, project_type: ProjectType, name: &str) -> ProjectConfig {
    ProjectConfig {
        project_type,
        canonical_name: name.to_string(),
        root_path: root.to_path_buf(),
        foundry_data: root.join("foundry-data"),
        dist_path: Some("dist".into()),
    }
}
