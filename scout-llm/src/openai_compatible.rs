//! Generic OpenAI-compatible LLM client
//!
//! Talks to any provider exposing `/v1/chat/completions` with function calling.

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use url::Url;

use scout_core::{
    LlmRequest, LlmResponse, Message, Role, ScoutError, ToolCall, ToolCallingLlm, ToolChoice,
    ToolSpec,
};

const OPENAI_BASE_URL: &str = "https://api.openai.com";
const OPENAI_DEFAULT_MODEL: &str = "gpt-4o";

/// Request body for chat completions endpoint
#[derive(Serialize, Debug, Clone)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<WireTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel_tool_calls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Serialize, Debug, Clone)]
pub struct WireMessage {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WireToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_type")]
    pub call_type: String,
    pub function: WireFunctionCall,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WireFunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct WireTool {
    #[serde(rename = "type")]
    pub tool_type: &'static str,
    pub function: WireFunction,
}

#[derive(Serialize, Debug, Clone)]
pub struct WireFunction {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

fn function_type() -> String {
    "function".to_string()
}

/// Non-streaming response from chat completions
#[derive(Deserialize, Debug, Clone)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Choice {
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ResponseMessage {
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// OpenAI-style error response
#[derive(Deserialize, Debug, Clone)]
pub struct OpenAiError {
    pub error: ErrorDetail,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
}

#[derive(Clone)]
pub struct OpenAiCompatibleClient {
    http: Client,
    base_url: Url,
    api_key: SecretString,
    default_model: String,
    temperature: Option<f32>,
}

impl fmt::Debug for OpenAiCompatibleClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiCompatibleClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("default_model", &self.default_model)
            .finish()
    }
}

impl OpenAiCompatibleClient {
    pub fn builder() -> OpenAiCompatibleBuilder {
        OpenAiCompatibleBuilder::default()
    }

    /// Client for api.openai.com with the `gpt-4o` default model.
    pub fn openai(api_key: impl Into<String>) -> Result<Self, ScoutError> {
        Self::builder()
            .base_url(OPENAI_BASE_URL)?
            .api_key(api_key)
            .default_model(OPENAI_DEFAULT_MODEL)
            .build()
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn set_default_model(&mut self, model: impl Into<String>) {
        self.default_model = model.into();
    }

    fn completions_url(&self) -> Result<Url, ScoutError> {
        self.base_url
            .join("v1/chat/completions")
            .map_err(|err| ScoutError::InvalidConfig(err.to_string()))
    }

    pub fn build_request(&self, request: LlmRequest) -> Result<ChatCompletionRequest, ScoutError> {
        let LlmRequest {
            model,
            messages,
            tools,
            tool_choice,
            parallel_tool_calls,
        } = request;
        let model = if model.is_empty() {
            self.default_model.clone()
        } else {
            model
        };
        let messages = messages
            .into_iter()
            .map(map_message)
            .collect::<Result<Vec<_>, _>>()?;
        let has_tools = !tools.is_empty();
        let tools = has_tools.then(|| tools.into_iter().map(map_tool_spec).collect());

        Ok(ChatCompletionRequest {
            model,
            messages,
            tools,
            tool_choice: tool_choice.filter(|_| has_tools).map(map_tool_choice),
            parallel_tool_calls: parallel_tool_calls.filter(|_| has_tools),
            temperature: self.temperature,
        })
    }
}

fn map_message(message: Message) -> Result<WireMessage, ScoutError> {
    let Message {
        role,
        content,
        tool_call_id,
        tool_calls,
    } = message;
    match role {
        Role::Tool => {
            let tool_call_id = tool_call_id.ok_or_else(|| {
                ScoutError::InvalidConfig("tool message missing tool_call_id".to_string())
            })?;
            Ok(WireMessage {
                role,
                content: Some(content),
                tool_call_id: Some(tool_call_id),
                tool_calls: None,
            })
        }
        Role::Assistant if !tool_calls.is_empty() => {
            let tool_calls = tool_calls
                .into_iter()
                .map(|call| {
                    Ok(WireToolCall {
                        id: call.id,
                        call_type: function_type(),
                        function: WireFunctionCall {
                            name: call.name,
                            arguments: serde_json::to_string(&call.args)?,
                        },
                    })
                })
                .collect::<Result<Vec<_>, ScoutError>>()?;
            Ok(WireMessage {
                role,
                content: (!content.is_empty()).then_some(content),
                tool_call_id: None,
                tool_calls: Some(tool_calls),
            })
        }
        _ => Ok(WireMessage {
            role,
            content: Some(content),
            tool_call_id: None,
            tool_calls: None,
        }),
    }
}

fn map_tool_spec(spec: ToolSpec) -> WireTool {
    WireTool {
        tool_type: "function",
        function: WireFunction {
            name: spec.name,
            description: spec.description,
            parameters: spec.parameters,
        },
    }
}

fn map_tool_choice(choice: ToolChoice) -> Value {
    match choice {
        ToolChoice::Auto => json!("auto"),
        ToolChoice::Required => json!("required"),
        ToolChoice::None => json!("none"),
        ToolChoice::Function(name) => json!({"type": "function", "function": {"name": name}}),
    }
}

fn map_tool_call(call: WireToolCall) -> Result<ToolCall, ScoutError> {
    let args = if call.function.arguments.trim().is_empty() {
        json!({})
    } else {
        serde_json::from_str(&call.function.arguments).map_err(|err| ScoutError::ParseFailed {
            output: call.function.arguments.clone(),
            reason: err.to_string(),
        })?
    };
    Ok(ToolCall {
        id: call.id,
        name: call.function.name,
        args,
    })
}

#[async_trait::async_trait]
impl ToolCallingLlm for OpenAiCompatibleClient {
    async fn invoke(&self, request: LlmRequest) -> Result<LlmResponse, ScoutError> {
        let body = self.build_request(request)?;
        tracing::debug!(
            model = %body.model,
            messages = body.messages.len(),
            tools = body.tools.as_ref().map(Vec::len).unwrap_or(0),
            "chat completion request"
        );

        let response = self
            .http
            .post(self.completions_url()?)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|err| ScoutError::LlmProvider(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {}: {}", status, body));
            return Err(ScoutError::LlmProvider(message));
        }

        let response = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|err| ScoutError::LlmProvider(err.to_string()))?;
        if let Some(usage) = &response.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "chat completion usage"
            );
        }

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ScoutError::LlmProvider("no choices returned".to_string()))?;
        let content = choice.message.content.unwrap_or_default();
        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(map_tool_call)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(LlmResponse {
            content,
            tool_calls,
        })
    }
}

#[derive(Default)]
pub struct OpenAiCompatibleBuilder {
    base_url: Option<Url>,
    api_key: Option<SecretString>,
    default_model: Option<String>,
    timeout: Option<Duration>,
    temperature: Option<f32>,
}

impl fmt::Debug for OpenAiCompatibleBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_some() {
            "<redacted>"
        } else {
            "<none>"
        };
        f.debug_struct("OpenAiCompatibleBuilder")
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field("api_key", &api_key)
            .field("default_model", &self.default_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OpenAiCompatibleBuilder {
    /// Accepts the API root with or without a trailing slash.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self, ScoutError> {
        let raw = url.as_ref().trim();
        let normalized = if raw.ends_with('/') {
            raw.to_string()
        } else {
            format!("{raw}/")
        };
        let parsed = Url::parse(&normalized)
            .map_err(|err| ScoutError::InvalidConfig(format!("invalid base url '{raw}': {err}")))?;
        self.base_url = Some(parsed);
        Ok(self)
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(key.into()));
        self
    }

    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn build(self) -> Result<OpenAiCompatibleClient, ScoutError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ScoutError::InvalidConfig("base url is required".to_string()))?;
        let api_key = self
            .api_key
            .ok_or_else(|| ScoutError::InvalidConfig("api key is required".to_string()))?;
        let default_model = self
            .default_model
            .filter(|model| !model.trim().is_empty())
            .ok_or_else(|| ScoutError::InvalidConfig("default model is required".to_string()))?;

        let http = Client::builder()
            .timeout(self.timeout.unwrap_or(Duration::from_secs(120)))
            .build()
            .map_err(|err| ScoutError::LlmProvider(err.to_string()))?;

        Ok(OpenAiCompatibleClient {
            http,
            base_url,
            api_key,
            default_model,
            temperature: self.temperature,
        })
    }
}
