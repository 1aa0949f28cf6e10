mod bad_call;
mod call_model;
mod checker;
mod tool_node;

pub use bad_call::BadCallNode;
pub use call_model::CallModelNode;
pub use checker::{CheckerNode, Verdict};
pub use tool_node::{ToolFailurePolicy, ToolNode};
