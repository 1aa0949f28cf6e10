use scout_core::{FieldKind, FieldSpec, ScoutError, Value};
use serde::{Deserialize, Serialize};
use serde_json::Map;

/// What the caller knows, which field to resolve, and sample values for it.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ResearchInput {
    #[serde(default)]
    pub input_info: Map<String, Value>,
    pub target: String,
    #[serde(default)]
    pub examples: Vec<Value>,
    #[serde(default)]
    pub target_kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_description: Option<String>,
}

impl ResearchInput {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    pub fn with_info(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.input_info.insert(key.into(), value.into());
        self
    }

    pub fn with_example(mut self, example: impl Into<Value>) -> Self {
        self.examples.push(example.into());
        self
    }

    pub fn with_target_kind(mut self, kind: FieldKind) -> Self {
        self.target_kind = kind;
        self
    }

    pub fn answer_field(&self) -> Result<FieldSpec, ScoutError> {
        let field = FieldSpec::new(self.target.clone(), self.target_kind)?;
        Ok(match &self.target_description {
            Some(description) => field.with_description(description.clone()),
            None => field,
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ResearchOutput {
    pub output: Option<Value>,
}
