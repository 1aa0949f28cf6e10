use scout_graph::END;

use crate::state::ResearchState;
use crate::transcript::Selection;

pub const CALL_MODEL: &str = "call_model";
pub const TOOL_NODE: &str = "tool_node";
pub const CALL_CHECKER: &str = "call_checker";
pub const BAD_CALL: &str = "bad_call";

/// Name of the finalize action offered to the model.
pub const INFO_TOOL: &str = "Info";

pub fn route_after_agent(state: &ResearchState) -> &'static str {
    match state.last_selection() {
        Selection::Single(call) if call.name == INFO_TOOL => CALL_CHECKER,
        Selection::Single(_) => TOOL_NODE,
        Selection::None | Selection::Multiple(_) => BAD_CALL,
    }
}

pub fn route_after_checker(state: &ResearchState) -> &'static str {
    if state.output.is_some() {
        END
    } else {
        CALL_MODEL
    }
}
