use serde_json::json;
use scout_core::{LlmRequest, LlmResponse, Message, Role, ToolCall, ToolChoice, ToolSpec};

#[test]
fn llm_request_serializes_with_tools_and_choice() {
    let req = LlmRequest::new("gpt-4o", vec![Message::user("hi")])
        .with_tools(vec![ToolSpec {
            name: "Search".to_string(),
            description: "web search".to_string(),
            parameters: json!({"type": "object", "properties": {}}),
        }])
        .with_tool_choice(ToolChoice::Required)
        .with_parallel_tool_calls(false);

    let value = serde_json::to_value(req).expect("serialize");
    assert_eq!(value["model"], "gpt-4o");
    assert_eq!(value["messages"][0]["role"], "user");
    assert_eq!(value["tools"][0]["name"], "Search");
    assert_eq!(value["tool_choice"], "required");
    assert_eq!(value["parallel_tool_calls"], false);
}

#[test]
fn plain_request_omits_optional_fields() {
    let value = serde_json::to_value(LlmRequest::new("", vec![])).expect("serialize");
    assert!(value.get("tools").is_none());
    assert!(value.get("tool_choice").is_none());
    assert!(value.get("parallel_tool_calls").is_none());
}

#[test]
fn tool_message_carries_call_id() {
    let msg = Message::tool("call-1", "ok");
    assert_eq!(msg.role, Role::Tool);
    let value = serde_json::to_value(msg).expect("serialize tool msg");
    assert_eq!(value["tool_call_id"], "call-1");
    assert!(value.get("tool_calls").is_none());
}

#[test]
fn llm_response_round_trips_tool_calls() {
    let response = LlmResponse {
        content: String::new(),
        tool_calls: vec![ToolCall {
            id: "call-1".to_string(),
            name: "Info".to_string(),
            args: json!({"founded_year": "2001"}),
        }],
    };
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["tool_calls"][0]["args"]["founded_year"], "2001");
    let back: LlmResponse = serde_json::from_value(value).unwrap();
    assert_eq!(back, response);
}
