use std::collections::HashSet;

use scout_core::{Message, ToolCall};
use serde::{Deserialize, Serialize};

/// Sent in place of a tool result for calls that were never executed.
const SKIPPED_CALL: &str = "Not executed: call exactly one tool per turn.";

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    Success,
    Error,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TranscriptEntry {
    Human {
        content: String,
    },
    Ai {
        content: String,
        tool_calls: Vec<ToolCall>,
    },
    ToolResult {
        call_id: String,
        name: String,
        content: String,
        status: ToolStatus,
    },
    Corrective {
        content: String,
    },
}

impl TranscriptEntry {
    pub fn to_message(&self) -> Message {
        match self {
            TranscriptEntry::Human { content } | TranscriptEntry::Corrective { content } => {
                Message::user(content.clone())
            }
            TranscriptEntry::Ai {
                content,
                tool_calls,
            } => Message::assistant(content.clone(), tool_calls.clone()),
            TranscriptEntry::ToolResult {
                call_id, content, ..
            } => Message::tool(call_id.clone(), content.clone()),
        }
    }
}

/// The model's latest action selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Selection<'a> {
    None,
    Single(&'a ToolCall),
    Multiple(usize),
}

impl<'a> Selection<'a> {
    pub fn from_entry(entry: Option<&'a TranscriptEntry>) -> Self {
        match entry {
            Some(TranscriptEntry::Ai { tool_calls, .. }) => match tool_calls.as_slice() {
                [] => Selection::None,
                [call] => Selection::Single(call),
                calls => Selection::Multiple(calls.len()),
            },
            _ => Selection::None,
        }
    }
}

/// Converts the transcript into provider messages.
///
/// Chat APIs reject assistant tool calls that are not answered, so calls that
/// never got a result (a rejected multi-call turn) are answered with a stub.
pub fn render_transcript(entries: &[TranscriptEntry]) -> Vec<Message> {
    let answered: HashSet<&str> = entries
        .iter()
        .filter_map(|entry| match entry {
            TranscriptEntry::ToolResult { call_id, .. } => Some(call_id.as_str()),
            _ => None,
        })
        .collect();

    let mut messages = Vec::with_capacity(entries.len());
    for entry in entries {
        messages.push(entry.to_message());
        if let TranscriptEntry::Ai { tool_calls, .. } = entry {
            for call in tool_calls {
                if !answered.contains(call.id.as_str()) {
                    messages.push(Message::tool(call.id.clone(), SKIPPED_CALL));
                }
            }
        }
    }
    messages
}
