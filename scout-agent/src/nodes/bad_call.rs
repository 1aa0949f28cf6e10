use scout_core::ScoutError;
use scout_graph::{GraphContext, GraphNode, GraphState, StateUpdate};

use crate::prompts::BAD_CALL_MESSAGE;
use crate::state::{ResearchState, ResearchUpdate};
use crate::transcript::{Selection, TranscriptEntry};

/// Tells the model to select exactly one action.
#[derive(Clone, Debug, Default)]
pub struct BadCallNode;

#[async_trait::async_trait]
impl GraphNode<ResearchState> for BadCallNode {
    async fn invoke_with_context(
        &self,
        input: GraphState<ResearchState>,
        _context: &GraphContext,
    ) -> Result<StateUpdate<ResearchState>, ScoutError> {
        let selected = match input.data.last_selection() {
            Selection::None => 0,
            Selection::Single(_) => 1,
            Selection::Multiple(count) => count,
        };
        tracing::warn!(selected, "model did not select exactly one action");
        Ok(StateUpdate::new(ResearchUpdate::message(
            TranscriptEntry::Corrective {
                content: BAD_CALL_MESSAGE.to_string(),
            },
        )))
    }
}
