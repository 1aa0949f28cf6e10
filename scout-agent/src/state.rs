use scout_core::{FieldKind, FieldSpec, Message, ScoutError, Value};
use scout_graph::StateSchema;
use serde::{Deserialize, Serialize};
use serde_json::Map;

use crate::error::AgentError;
use crate::input::ResearchInput;
use crate::transcript::{render_transcript, Selection, TranscriptEntry};

/// Everything one research session knows. Lives for a single run.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ResearchState {
    pub transcript: Vec<TranscriptEntry>,
    pub input_info: Map<String, Value>,
    pub target: String,
    #[serde(default)]
    pub target_kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_description: Option<String>,
    pub examples: Vec<Value>,
    pub output: Option<Value>,
}

impl ResearchState {
    pub fn from_input(input: ResearchInput) -> Self {
        Self {
            transcript: Vec::new(),
            input_info: input.input_info,
            target: input.target,
            target_kind: input.target_kind,
            target_description: input.target_description,
            examples: input.examples,
            output: None,
        }
    }

    pub fn answer_field(&self) -> Result<FieldSpec, ScoutError> {
        let field = FieldSpec::new(self.target.clone(), self.target_kind)?;
        Ok(match &self.target_description {
            Some(description) => field.with_description(description.clone()),
            None => field,
        })
    }

    pub fn last_selection(&self) -> Selection<'_> {
        Selection::from_entry(self.transcript.last())
    }

    pub fn messages(&self) -> Vec<Message> {
        render_transcript(&self.transcript)
    }

    /// Output can only be set once per session.
    pub fn accept_output(&mut self, value: Value) -> Result<(), AgentError> {
        if self.output.is_some() {
            return Err(AgentError::OutputAlreadySet);
        }
        self.output = Some(value);
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResearchUpdate {
    pub messages: Vec<TranscriptEntry>,
    pub output: Option<Value>,
}

impl ResearchUpdate {
    pub fn message(entry: TranscriptEntry) -> Self {
        Self {
            messages: vec![entry],
            output: None,
        }
    }

    pub fn output(value: Value) -> Self {
        Self {
            messages: Vec::new(),
            output: Some(value),
        }
    }
}

impl StateSchema for ResearchState {
    type Update = ResearchUpdate;

    fn apply(current: &Self, update: ResearchUpdate) -> Self {
        let mut next = current.clone();
        next.transcript.extend(update.messages);
        if let Some(value) = update.output {
            if let Err(err) = next.accept_output(value) {
                tracing::warn!(error = %err, "ignoring second output");
            }
        }
        next
    }
}
