use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use crate::{LlmRequest, Message, ScoutError, ToolCallingLlm, ToolChoice, ToolSpec, Value};

/// Function definition that makes the model answer with a `T`.
pub fn structured_tool_spec<T: JsonSchema>() -> Result<ToolSpec, ScoutError> {
    let root = schemars::schema_for!(T);
    let mut parameters = serde_json::to_value(&root)?;
    if let Value::Object(map) = &mut parameters {
        map.remove("$schema");
        map.remove("title");
    }
    let description = root
        .schema
        .metadata
        .as_ref()
        .and_then(|meta| meta.description.clone())
        .unwrap_or_default();
    Ok(ToolSpec {
        name: T::schema_name(),
        description,
        parameters,
    })
}

/// Calls the model with a forced single function call and decodes its arguments.
pub async fn invoke_structured<T>(
    llm: &dyn ToolCallingLlm,
    model: &str,
    messages: Vec<Message>,
) -> Result<T, ScoutError>
where
    T: JsonSchema + DeserializeOwned,
{
    let spec = structured_tool_spec::<T>()?;
    let name = spec.name.clone();
    let request = LlmRequest::new(model, messages)
        .with_tools(vec![spec])
        .with_tool_choice(ToolChoice::Function(name.clone()))
        .with_parallel_tool_calls(false);

    tracing::debug!(function = %name, "requesting structured output");
    let response = llm.invoke(request).await?;
    let call = response
        .tool_calls
        .into_iter()
        .find(|call| call.name == name)
        .ok_or_else(|| ScoutError::ParseFailed {
            output: response.content.clone(),
            reason: format!("model did not call '{name}'"),
        })?;

    serde_json::from_value(call.args.clone()).map_err(|err| ScoutError::ParseFailed {
        output: call.args.to_string(),
        reason: err.to_string(),
    })
}
