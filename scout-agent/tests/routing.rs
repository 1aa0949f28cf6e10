use scout_agent::{
    route_after_agent, route_after_checker, ResearchState, TranscriptEntry, BAD_CALL,
    CALL_CHECKER, CALL_MODEL, TOOL_NODE,
};
use scout_core::ToolCall;
use scout_graph::END;
use serde_json::json;

fn with_calls(names: &[&str]) -> ResearchState {
    let tool_calls = names
        .iter()
        .enumerate()
        .map(|(i, name)| ToolCall {
            id: format!("call-{i}"),
            name: name.to_string(),
            args: json!({}),
        })
        .collect();
    ResearchState {
        transcript: vec![TranscriptEntry::Ai {
            content: String::new(),
            tool_calls,
        }],
        target: "founded_year".to_string(),
        ..ResearchState::default()
    }
}

#[test]
fn agent_routing_depends_on_selection_count_and_name() {
    assert_eq!(route_after_agent(&with_calls(&["Search"])), TOOL_NODE);
    assert_eq!(route_after_agent(&with_calls(&["ScrapeWebsite"])), TOOL_NODE);
    assert_eq!(route_after_agent(&with_calls(&["Info"])), CALL_CHECKER);
    assert_eq!(route_after_agent(&with_calls(&[])), BAD_CALL);
    assert_eq!(route_after_agent(&with_calls(&["Search", "Info"])), BAD_CALL);
    assert_eq!(route_after_agent(&with_calls(&["Info", "Info"])), BAD_CALL);
}

#[test]
fn agent_routing_without_model_turn_is_bad_call() {
    let mut state = ResearchState::default();
    assert_eq!(route_after_agent(&state), BAD_CALL);

    state.transcript.push(TranscriptEntry::Corrective {
        content: "again".to_string(),
    });
    assert_eq!(route_after_agent(&state), BAD_CALL);
}

#[test]
fn checker_routing_depends_on_output_presence() {
    let mut state = with_calls(&["Info"]);
    assert_eq!(route_after_checker(&state), CALL_MODEL);

    state.accept_output(json!("2001")).unwrap();
    assert_eq!(route_after_checker(&state), END);
}

#[test]
fn routing_is_pure() {
    let state = with_calls(&["Search"]);
    let before = state.clone();
    for _ in 0..3 {
        assert_eq!(route_after_agent(&state), TOOL_NODE);
        assert_eq!(route_after_checker(&state), CALL_MODEL);
    }
    assert_eq!(state, before);
}
