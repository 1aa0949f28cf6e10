use std::collections::HashMap;
use std::sync::Arc;

use scout_core::{Tool, ToolCallingLlm, ToolSpec};
use scout_graph::{
    ExecutableGraph, ExecutionConfig, ExecutionOptions, GraphBuilder, GraphState, Observer,
    TracingObserver, END,
};
use tracing::Instrument;

use crate::error::AgentError;
use crate::input::{ResearchInput, ResearchOutput};
use crate::nodes::{BadCallNode, CallModelNode, CheckerNode, ToolFailurePolicy, ToolNode};
use crate::routing::{
    route_after_agent, route_after_checker, BAD_CALL, CALL_CHECKER, CALL_MODEL, INFO_TOOL,
    TOOL_NODE,
};
use crate::state::ResearchState;

pub struct ResearchAgentBuilder {
    llm: Option<Arc<dyn ToolCallingLlm>>,
    tools: Vec<Arc<dyn Tool>>,
    model: String,
    config: ExecutionConfig,
    observer: Option<Arc<dyn Observer>>,
    tool_failure_policy: ToolFailurePolicy,
}

impl Default for ResearchAgentBuilder {
    fn default() -> Self {
        Self {
            llm: None,
            tools: Vec::new(),
            model: String::new(),
            config: ExecutionConfig::default(),
            observer: None,
            tool_failure_policy: ToolFailurePolicy::FailFast,
        }
    }
}

impl ResearchAgentBuilder {
    pub fn llm(mut self, llm: Arc<dyn ToolCallingLlm>) -> Self {
        self.llm = Some(llm);
        self
    }

    /// Tools are offered to the model in the order they are added.
    pub fn tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn tools(mut self, tools: Vec<Arc<dyn Tool>>) -> Self {
        self.tools.extend(tools);
        self
    }

    /// Model name sent with every request. Empty means the client default.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn config(mut self, config: ExecutionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn tool_failure_policy(mut self, tool_failure_policy: ToolFailurePolicy) -> Self {
        self.tool_failure_policy = tool_failure_policy;
        self
    }

    pub fn build(self) -> Result<ResearchAgent, AgentError> {
        let llm = self.llm.ok_or(AgentError::MissingLlm)?;

        let mut tools = HashMap::new();
        let mut tool_specs = Vec::with_capacity(self.tools.len());
        for tool in self.tools {
            let name = tool.name().to_string();
            if name == INFO_TOOL {
                return Err(AgentError::ReservedToolName(name));
            }
            if tools.contains_key(&name) {
                return Err(AgentError::DuplicateTool(name));
            }
            tool_specs.push(ToolSpec {
                name: name.clone(),
                description: tool.description().to_string(),
                parameters: tool.schema(),
            });
            tools.insert(name, tool);
        }

        let observer = self
            .observer
            .unwrap_or_else(|| Arc::new(TracingObserver));

        let graph = GraphBuilder::new()
            .add_node(
                CALL_MODEL,
                CallModelNode::new(llm.clone(), self.model.clone(), tool_specs),
            )
            .add_node(TOOL_NODE, ToolNode::new(tools, self.tool_failure_policy))
            .add_node(CALL_CHECKER, CheckerNode::new(llm, self.model))
            .add_node(BAD_CALL, BadCallNode)
            .set_entry(CALL_MODEL)
            .add_conditional_edges(
                CALL_MODEL,
                |state: &GraphState<ResearchState>| route_after_agent(&state.data),
                &[BAD_CALL, CALL_CHECKER, TOOL_NODE],
            )
            .add_conditional_edges(
                CALL_CHECKER,
                |state: &GraphState<ResearchState>| route_after_checker(&state.data),
                &[END, CALL_MODEL],
            )
            .add_edge(TOOL_NODE, CALL_MODEL)
            .add_edge(BAD_CALL, CALL_MODEL)
            .with_config(self.config)
            .with_observer(observer)
            .build()?;

        Ok(ResearchAgent { graph })
    }
}

/// Compiled research loop. One agent can serve many independent sessions.
pub struct ResearchAgent {
    graph: ExecutableGraph<ResearchState>,
}

impl ResearchAgent {
    pub fn builder() -> ResearchAgentBuilder {
        ResearchAgentBuilder::default()
    }

    pub async fn run(&self, input: ResearchInput) -> Result<ResearchOutput, AgentError> {
        let state = self.run_state(input).await?;
        Ok(ResearchOutput {
            output: state.output,
        })
    }

    /// Runs a session and returns its final state, transcript included.
    pub async fn run_state(&self, input: ResearchInput) -> Result<ResearchState, AgentError> {
        self.run_state_with_options(input, ExecutionOptions::default())
            .await
    }

    pub async fn run_state_with_options(
        &self,
        input: ResearchInput,
        options: ExecutionOptions,
    ) -> Result<ResearchState, AgentError> {
        input
            .answer_field()
            .map_err(|err| AgentError::InvalidInput(err.to_string()))?;

        let span = tracing::info_span!("research", target_field = %input.target);
        let state = GraphState::new(ResearchState::from_input(input));
        let state = self
            .graph
            .invoke_with_options(state, options)
            .instrument(span)
            .await?;
        Ok(state.data)
    }

    pub fn mermaid(&self) -> String {
        self.graph.to_mermaid()
    }
}
