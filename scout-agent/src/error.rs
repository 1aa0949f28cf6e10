use scout_core::ScoutError;
use scout_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid research input: {0}")]
    InvalidInput(String),
    #[error("research agent requires an llm")]
    MissingLlm,
    #[error("duplicate tool name: {0}")]
    DuplicateTool(String),
    #[error("tool name '{0}' is reserved for the final answer")]
    ReservedToolName(String),
    #[error("output already set for this session")]
    OutputAlreadySet,
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Core(#[from] ScoutError),
}
