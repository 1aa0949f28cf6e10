use std::sync::Arc;

use schemars::JsonSchema;
use scout_core::{invoke_structured, Message, ScoutError, ToolCallingLlm};
use scout_graph::{GraphContext, GraphNode, GraphState, StateUpdate};
use serde::{Deserialize, Serialize};

use crate::prompts::{checker_prompt, main_prompt};
use crate::routing::INFO_TOOL;
use crate::state::{ResearchState, ResearchUpdate};
use crate::transcript::{render_transcript, Selection, ToolStatus, TranscriptEntry};

/// Judgment on a proposed answer.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct Verdict {
    pub reason: String,
    pub good: bool,
}

/// Second model pass that accepts or rejects the model's `Info` call.
///
/// Accepted answers become the session output. Rejections, and accepted
/// answers whose arguments lack a valid answer field, are sent back to the
/// model as an error result for the `Info` call.
pub struct CheckerNode {
    llm: Arc<dyn ToolCallingLlm>,
    model: String,
}

impl CheckerNode {
    pub fn new(llm: Arc<dyn ToolCallingLlm>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }
}

#[async_trait::async_trait]
impl GraphNode<ResearchState> for CheckerNode {
    async fn invoke_with_context(
        &self,
        input: GraphState<ResearchState>,
        _context: &GraphContext,
    ) -> Result<StateUpdate<ResearchState>, ScoutError> {
        let state = input.data;
        let call = match state.last_selection() {
            Selection::Single(call) if call.name == INFO_TOOL => call.clone(),
            other => {
                return Err(ScoutError::Custom(format!(
                    "checker expects a single {INFO_TOOL} call, got {other:?}"
                )))
            }
        };
        let field = state.answer_field()?;

        // The pending Info call stays out of the history so it needs no result.
        let history = &state.transcript[..state.transcript.len() - 1];
        let mut messages = vec![Message::user(main_prompt(&state, &field))];
        messages.extend(render_transcript(history));
        messages.push(Message::user(checker_prompt(&state.examples, &call.args)));

        let verdict: Verdict = invoke_structured(self.llm.as_ref(), &self.model, messages).await?;

        let rejection = |content: String| {
            ResearchUpdate::message(TranscriptEntry::ToolResult {
                call_id: call.id.clone(),
                name: call.name.clone(),
                content,
                status: ToolStatus::Error,
            })
        };

        let update = if verdict.good {
            match field.extract(&call.args) {
                Ok(value) => {
                    tracing::info!(target_field = %field.name(), value = %value, "answer accepted");
                    ResearchUpdate::output(value)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "accepted answer is malformed");
                    rejection(format!("Invalid response: {err}"))
                }
            }
        } else {
            tracing::warn!(reason = %verdict.reason, "answer rejected");
            rejection(serde_json::to_string(&verdict)?)
        };

        Ok(StateUpdate::new(update))
    }
}
