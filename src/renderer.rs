//! Template renderer for declarative documents.
//! Serializes a document to JSON text, renders it with MiniJinja and parses the
//! result back, so placeholders may appear in any string of the document.
use crate::error::{Error, Result};
use minijinja::syntax::SyntaxConfig;
use minijinja::{Environment, ErrorKind, Output, State, UndefinedBehavior, Value};

// Serialized JSON escapes every control character, so these never occur in a
// document and only `{{ }}` is recognized.
const BLOCK_DELIMITERS: (&str, &str) = ("\u{1}%", "%\u{1}");
const COMMENT_DELIMITERS: (&str, &str) = ("\u{1}#", "#\u{1}");

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `name` - Name of the source the template came from, used in errors
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    fn render(&self, name: &str, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer that prints values as-is.
    ///
    /// Undefined lookups, including lookups through undefined parents, render
    /// as the empty string.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Chainable);
        Self { env }
    }

    /// Creates a renderer for templates that are JSON text.
    ///
    /// Every printed value is escaped as JSON string content. Block and
    /// comment tags are disabled, so `{%` and `{#` in strings are plain text.
    pub fn for_json() -> Self {
        let mut renderer = Self::new();
        match SyntaxConfig::builder()
            .block_delimiters(BLOCK_DELIMITERS.0, BLOCK_DELIMITERS.1)
            .comment_delimiters(COMMENT_DELIMITERS.0, COMMENT_DELIMITERS.1)
            .build()
        {
            Ok(syntax) => renderer.env.set_syntax(syntax),
            Err(e) => log::warn!("Keeping the default template syntax: {e}"),
        }
        renderer.env.set_formatter(json_string_formatter);
        renderer
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

fn json_string_formatter(
    out: &mut Output<'_>,
    _state: &State<'_, '_>,
    value: &Value,
) -> std::result::Result<(), minijinja::Error> {
    if value.is_undefined() || value.is_none() {
        return Ok(());
    }
    let quoted = serde_json::Value::String(value.to_string()).to_string();
    out.write_str(&quoted[1..quoted.len() - 1])?;
    Ok(())
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// # Errors
    /// * `Error::TemplateSyntaxError` if the template cannot be compiled
    /// * `Error::ContextEvaluationError` if rendering fails
    fn render(&self, name: &str, template: &str, context: &serde_json::Value) -> Result<String> {
        self.env.render_str(template, context).map_err(|e| {
            let file = name.to_string();
            let reason = e.to_string();
            match e.kind() {
                ErrorKind::SyntaxError => Error::TemplateSyntaxError { file, reason },
                _ => Error::ContextEvaluationError { file, reason },
            }
        })
    }
}

/// Renders every placeholder of `document` against `context`.
///
/// `context` must be fully resolved; nothing is looked up lazily. Rendering
/// has no side effects.
///
/// # Errors
/// * `Error::TemplateSyntaxError` if the document is not a valid template or
///   the rendered text is not a valid document
/// * `Error::ContextEvaluationError` if a placeholder fails to evaluate
pub fn render_document(
    engine: &dyn TemplateRenderer,
    name: &str,
    document: &serde_json::Value,
    context: &serde_json::Value,
) -> Result<serde_json::Value> {
    let text = serde_json::to_string_pretty(document).map_err(|e| Error::TemplateSyntaxError {
        file: name.to_string(),
        reason: e.to_string(),
    })?;
    let rendered = engine.render(name, &text, context)?;
    serde_json::from_str(&rendered).map_err(|e| Error::TemplateSyntaxError {
        file: name.to_string(),
        reason: format!("rendered document is not valid JSON: {e}"),
    })
}
