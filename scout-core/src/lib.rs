mod error;
mod field;
mod llm;
mod structured;
mod tool;
mod value;

pub use error::ScoutError;
pub use field::{FieldError, FieldKind, FieldSpec};
pub use llm::{
    LlmRequest, LlmResponse, Message, Role, ToolCall, ToolCallingLlm, ToolChoice, ToolSpec,
};
pub use structured::{invoke_structured, structured_tool_spec};
pub use tool::{Tool, ToolError};
pub use value::Value;
