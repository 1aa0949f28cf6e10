use scout_core::ScoutError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("entry node not set")]
    MissingEntry,
    #[error("missing node: {node}")]
    MissingNode { node: String },
    #[error("duplicate node: {node}")]
    DuplicateNode { node: String },
    #[error("node '{node}' already has an outgoing edge")]
    DuplicateEdge { node: String },
    #[error("invalid edge to '{node}'")]
    InvalidEdge { node: String },
    #[error("node failed: {node}")]
    NodeFailed {
        node: String,
        #[source]
        source: ScoutError,
    },
    #[error("Max steps exceeded: reached {reached}, limit {max}")]
    MaxStepsExceeded { max: usize, reached: usize },
}
