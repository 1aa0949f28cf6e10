//! Descriptor for the single answer field an agent run resolves.
//!
//! The field name is only known at runtime, so instead of a generated type the
//! shape is carried as data and turned into a JSON schema on demand.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map};
use thiserror::Error;

use crate::{ScoutError, ToolSpec, Value};

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    String,
    Integer,
    Number,
    Boolean,
}

impl FieldKind {
    pub fn json_type(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
        }
    }

    pub fn accepts(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
        }
    }

    fn default_value(self) -> Option<Value> {
        match self {
            FieldKind::String => Some(Value::String(String::new())),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.json_type())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("missing key '{0}'")]
    Missing(String),
    #[error("expected '{field}' to be {expected}, got {found}")]
    WrongType {
        field: String,
        expected: FieldKind,
        found: String,
    },
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct FieldSpec {
    name: String,
    #[serde(default)]
    kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Result<Self, ScoutError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ScoutError::InvalidConfig(
                "field name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            name,
            kind,
            description: None,
        })
    }

    pub fn string(name: impl Into<String>) -> Result<Self, ScoutError> {
        Self::new(name, FieldKind::String)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn json_schema(&self) -> Value {
        let mut property = Map::new();
        property.insert("type".to_string(), json!(self.kind.json_type()));
        if let Some(default) = self.kind.default_value() {
            property.insert("default".to_string(), default);
        }
        if let Some(description) = &self.description {
            property.insert("description".to_string(), json!(description));
        }

        let mut properties = Map::new();
        properties.insert(self.name.clone(), Value::Object(property));

        json!({
            "title": "Info",
            "type": "object",
            "properties": properties,
            "required": [self.name],
        })
    }

    pub fn tool_spec(&self, tool_name: &str, description: &str) -> ToolSpec {
        ToolSpec {
            name: tool_name.to_string(),
            description: description.to_string(),
            parameters: self.json_schema(),
        }
    }

    pub fn extract(&self, args: &Value) -> Result<Value, FieldError> {
        let value = args
            .get(&self.name)
            .ok_or_else(|| FieldError::Missing(self.name.clone()))?;
        if !self.kind.accepts(value) {
            return Err(FieldError::WrongType {
                field: self.name.clone(),
                expected: self.kind,
                found: value.to_string(),
            });
        }
        Ok(value.clone())
    }
}
