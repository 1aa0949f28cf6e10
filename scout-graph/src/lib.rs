mod config;
mod error;
mod graph;
mod observer;
mod program;
mod state;

pub use config::{ExecutionConfig, ExecutionOptions};
pub use error::GraphError;
pub use graph::{ExecutableGraph, GraphBuilder, GraphContext, GraphNode, END, START};
pub use observer::{Observer, TracingObserver};
pub use program::{EdgeKind, GraphProgram};
pub use state::{GraphState, StateSchema, StateUpdate};
