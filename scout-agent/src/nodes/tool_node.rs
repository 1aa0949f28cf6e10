use std::collections::HashMap;
use std::sync::Arc;

use scout_core::{ScoutError, Tool, Value};
use scout_graph::{GraphContext, GraphNode, GraphState, StateUpdate};

use crate::state::{ResearchState, ResearchUpdate};
use crate::transcript::{Selection, ToolStatus, TranscriptEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolFailurePolicy {
    /// A failing tool aborts the run.
    #[default]
    FailFast,
    /// A failing tool is reported to the model as an error result.
    AppendErrorAndContinue,
}

/// Runs the single non-`Info` action the model selected.
pub struct ToolNode {
    tools: HashMap<String, Arc<dyn Tool>>,
    failure_policy: ToolFailurePolicy,
}

impl ToolNode {
    pub fn new(tools: HashMap<String, Arc<dyn Tool>>, failure_policy: ToolFailurePolicy) -> Self {
        Self {
            tools,
            failure_policy,
        }
    }
}

#[async_trait::async_trait]
impl GraphNode<ResearchState> for ToolNode {
    async fn invoke_with_context(
        &self,
        input: GraphState<ResearchState>,
        _context: &GraphContext,
    ) -> Result<StateUpdate<ResearchState>, ScoutError> {
        let call = match input.data.last_selection() {
            Selection::Single(call) => call.clone(),
            other => {
                return Err(ScoutError::Custom(format!(
                    "tool node expects a single selected action, got {other:?}"
                )))
            }
        };

        let tool = self
            .tools
            .get(&call.name)
            .ok_or_else(|| ScoutError::ToolCallFailed {
                tool_name: call.name.clone(),
                reason: "unknown tool".to_string(),
            })?;

        tracing::info!(tool = %call.name, args = %call.args, "invoking tool");
        let entry = match tool.invoke(call.args.clone()).await {
            Ok(output) => TranscriptEntry::ToolResult {
                call_id: call.id,
                name: call.name,
                content: match output {
                    Value::String(text) => text,
                    other => other.to_string(),
                },
                status: ToolStatus::Success,
            },
            Err(err) => match self.failure_policy {
                ToolFailurePolicy::FailFast => {
                    return Err(ScoutError::ToolCallFailed {
                        tool_name: call.name,
                        reason: err.to_string(),
                    });
                }
                ToolFailurePolicy::AppendErrorAndContinue => {
                    tracing::warn!(tool = %call.name, error = %err, "tool failed, continuing");
                    TranscriptEntry::ToolResult {
                        call_id: call.id,
                        content: format!("[TOOL ERROR] {}: {err}", call.name),
                        name: call.name,
                        status: ToolStatus::Error,
                    }
                }
            },
        };

        Ok(StateUpdate::new(ResearchUpdate::message(entry)))
    }
}
