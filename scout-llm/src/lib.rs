// OpenAI-compatible client (OpenAI, Azure-style proxies, vLLM, etc.)
pub mod openai_compatible;

pub use scout_core::{LlmRequest, LlmResponse, Message, Role, ToolCall, ToolChoice, ToolSpec};

pub use openai_compatible::{
    ChatCompletionRequest, OpenAiCompatibleBuilder, OpenAiCompatibleClient,
};
