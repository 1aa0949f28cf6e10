//! Research agent that searches, scrapes and self-checks until it can answer
//! a single target field about a company.
//!
//! The run is a four-node graph:
//!
//! ```text
//! call_model --(one non-Info call)--> tool_node --> call_model
//! call_model --(one Info call)------> call_checker --(accepted)--> END
//!                                                   --(rejected)--> call_model
//! call_model --(zero or many calls)-> bad_call --> call_model
//! ```

mod agent;
mod error;
mod input;
mod nodes;
mod prompts;
mod routing;
mod state;
mod transcript;

pub use agent::{ResearchAgent, ResearchAgentBuilder};
pub use error::AgentError;
pub use input::{ResearchInput, ResearchOutput};
pub use nodes::{BadCallNode, CallModelNode, CheckerNode, ToolFailurePolicy, ToolNode, Verdict};
pub use prompts::{checker_prompt, main_prompt, BAD_CALL_MESSAGE, CHECKER_PROMPT, MAIN_PROMPT};
pub use routing::{
    route_after_agent, route_after_checker, BAD_CALL, CALL_CHECKER, CALL_MODEL, INFO_TOOL,
    TOOL_NODE,
};
pub use state::{ResearchState, ResearchUpdate};
pub use transcript::{render_transcript, Selection, ToolStatus, TranscriptEntry};
