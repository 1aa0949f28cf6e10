use scout_core::ScoutError;
use scout_graph::{
    EdgeKind, GraphBuilder, GraphContext, GraphError, GraphNode, GraphState, StateSchema,
    StateUpdate, END,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Default, Debug, Serialize, Deserialize, PartialEq)]
struct Trail {
    visited: Vec<String>,
}

impl StateSchema for Trail {
    type Update = Vec<String>;
    fn apply(current: &Self, update: Vec<String>) -> Self {
        let mut visited = current.visited.clone();
        visited.extend(update);
        Trail { visited }
    }
}

struct Visit(&'static str);

#[async_trait::async_trait]
impl GraphNode<Trail> for Visit {
    async fn invoke_with_context(
        &self,
        _input: GraphState<Trail>,
        _context: &GraphContext,
    ) -> Result<StateUpdate<Trail>, ScoutError> {
        Ok(StateUpdate::new(vec![self.0.to_string()]))
    }
}

#[tokio::test]
async fn linear_graph_runs_each_node_once() {
    let graph = GraphBuilder::new()
        .add_node("a", Visit("a"))
        .add_node("b", Visit("b"))
        .add_edge("a", "b")
        .add_edge("b", END)
        .set_entry("a")
        .build()
        .unwrap();

    let out = graph.invoke(GraphState::new(Trail::default())).await.unwrap();
    assert_eq!(out.data.visited, vec!["a", "b"]);
}

#[tokio::test]
async fn node_without_edge_terminates() {
    let graph = GraphBuilder::new()
        .add_node("only", Visit("only"))
        .set_entry("only")
        .build()
        .unwrap();

    let out = graph.invoke(GraphState::new(Trail::default())).await.unwrap();
    assert_eq!(out.data.visited, vec!["only"]);
}

#[test]
fn build_requires_entry() {
    let err = GraphBuilder::<Trail>::new()
        .add_node("a", Visit("a"))
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, GraphError::MissingEntry));
}

#[test]
fn build_rejects_unknown_entry_and_edges() {
    let err = GraphBuilder::<Trail>::new()
        .add_node("a", Visit("a"))
        .set_entry("missing")
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, GraphError::MissingNode { node } if node == "missing"));

    let err = GraphBuilder::<Trail>::new()
        .add_node("a", Visit("a"))
        .add_edge("a", "nowhere")
        .set_entry("a")
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, GraphError::InvalidEdge { node } if node == "nowhere"));
}

#[test]
fn build_rejects_duplicates() {
    let err = GraphBuilder::<Trail>::new()
        .add_node("a", Visit("a"))
        .add_node("a", Visit("a"))
        .set_entry("a")
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, GraphError::DuplicateNode { node } if node == "a"));

    let err = GraphBuilder::<Trail>::new()
        .add_node("a", Visit("a"))
        .add_node("b", Visit("b"))
        .add_edge("a", "b")
        .add_edge("a", END)
        .set_entry("a")
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, GraphError::DuplicateEdge { node } if node == "a"));
}

#[test]
fn program_lists_topology_and_renders_mermaid() {
    let graph = GraphBuilder::<Trail>::new()
        .add_node("a", Visit("a"))
        .add_node("b", Visit("b"))
        .add_conditional_edges("a", |_state: &GraphState<Trail>| "b", &["b", END])
        .add_edge("b", "a")
        .set_entry("a")
        .build()
        .unwrap();

    let program = graph.program();
    let edges = program.edge_names();
    assert!(edges.contains(&("__start__".to_string(), "a".to_string(), EdgeKind::Default)));
    assert!(edges.contains(&("a".to_string(), "__end__".to_string(), EdgeKind::Conditional)));
    assert!(edges.contains(&("b".to_string(), "a".to_string(), EdgeKind::Default)));

    let mermaid = graph.to_mermaid();
    assert!(mermaid.starts_with("flowchart TD\n"));
    assert!(mermaid.contains("    __start__([__start__])"));
    assert!(mermaid.contains("    a -.-> b"));
    assert!(mermaid.contains("    b --> a"));
    assert!(mermaid.contains("    __end__([__end__])"));
}
