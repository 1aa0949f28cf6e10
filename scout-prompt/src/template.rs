use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use scout_core::{ScoutError, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("missing template variable '{0}'")]
    MissingVariable(String),
}

impl From<PromptError> for ScoutError {
    fn from(err: PromptError) -> Self {
        ScoutError::InvalidConfig(err.to_string())
    }
}

fn placeholder() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("placeholder pattern"))
}

fn value_text(value: &Value) -> String {
    value
        .as_str()
        .map(|s| s.to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Text with `{{ name }}` placeholders.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn variables(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for caps in placeholder().captures_iter(&self.template) {
            let name = caps[1].to_string();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Unknown placeholders render as empty text.
    pub fn render(&self, vars: &HashMap<String, Value>) -> String {
        placeholder()
            .replace_all(&self.template, |caps: &regex::Captures| {
                vars.get(&caps[1]).map(value_text).unwrap_or_default()
            })
            .to_string()
    }

    pub fn render_strict(&self, vars: &HashMap<String, Value>) -> Result<String, PromptError> {
        if let Some(missing) = self
            .variables()
            .into_iter()
            .find(|name| !vars.contains_key(name))
        {
            return Err(PromptError::MissingVariable(missing));
        }
        Ok(self.render(vars))
    }
}
