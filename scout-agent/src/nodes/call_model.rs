use std::sync::Arc;

use scout_core::{LlmRequest, Message, ScoutError, ToolCallingLlm, ToolChoice, ToolSpec};
use scout_graph::{GraphContext, GraphNode, GraphState, StateUpdate};

use crate::prompts::main_prompt;
use crate::routing::INFO_TOOL;
use crate::state::{ResearchState, ResearchUpdate};
use crate::transcript::TranscriptEntry;

const INFO_DESCRIPTION: &str = "Call this when you are done and have gathered all the relevant info";

/// Asks the model to pick exactly one action for the next turn.
///
/// The offered actions are the configured tools in registration order followed
/// by `Info`, whose parameters are the answer field's schema.
pub struct CallModelNode {
    llm: Arc<dyn ToolCallingLlm>,
    model: String,
    tools: Vec<ToolSpec>,
}

impl CallModelNode {
    pub fn new(
        llm: Arc<dyn ToolCallingLlm>,
        model: impl Into<String>,
        tools: Vec<ToolSpec>,
    ) -> Self {
        Self {
            llm,
            model: model.into(),
            tools,
        }
    }
}

#[async_trait::async_trait]
impl GraphNode<ResearchState> for CallModelNode {
    async fn invoke_with_context(
        &self,
        input: GraphState<ResearchState>,
        context: &GraphContext,
    ) -> Result<StateUpdate<ResearchState>, ScoutError> {
        let state = input.data;
        let field = state.answer_field()?;

        let mut messages = vec![Message::user(main_prompt(&state, &field))];
        messages.extend(state.messages());

        let mut tools = self.tools.clone();
        tools.push(field.tool_spec(INFO_TOOL, INFO_DESCRIPTION));

        let request = LlmRequest::new(self.model.clone(), messages)
            .with_tools(tools)
            .with_tool_choice(ToolChoice::Required)
            .with_parallel_tool_calls(false);
        let response = self.llm.invoke(request).await?;

        tracing::debug!(
            step = context.step,
            tool_calls = response.tool_calls.len(),
            "model selected actions"
        );
        Ok(StateUpdate::new(ResearchUpdate::message(TranscriptEntry::Ai {
            content: response.content,
            tool_calls: response.tool_calls,
        })))
    }
}
