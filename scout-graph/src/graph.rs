use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use scout_core::ScoutError;
use tracing::Instrument;

use crate::program::{EdgeKind, GraphProgram};
use crate::{
    ExecutionConfig, ExecutionOptions, GraphError, GraphState, Observer, StateSchema, StateUpdate,
};

pub const START: &str = "__start__";
pub const END: &str = "__end__";

#[derive(Clone, Debug)]
pub struct GraphContext {
    pub node_id: String,
    pub step: usize,
    pub remaining_steps: Option<usize>,
}

#[async_trait::async_trait]
pub trait GraphNode<S: StateSchema>: Send + Sync {
    async fn invoke_with_context(
        &self,
        input: GraphState<S>,
        context: &GraphContext,
    ) -> Result<StateUpdate<S>, ScoutError>;
}

type Router<S> = Arc<dyn Fn(&GraphState<S>) -> String + Send + Sync>;

enum Edge<S: StateSchema> {
    Direct(String),
    Conditional {
        router: Router<S>,
        targets: Vec<String>,
    },
}

pub struct GraphBuilder<S: StateSchema> {
    nodes: Vec<(String, Arc<dyn GraphNode<S>>)>,
    edges: Vec<(String, Edge<S>)>,
    entry: Option<String>,
    config: ExecutionConfig,
    observer: Option<Arc<dyn Observer>>,
}

impl<S: StateSchema> Default for GraphBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StateSchema> GraphBuilder<S> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            entry: None,
            config: ExecutionConfig::default(),
            observer: None,
        }
    }

    pub fn add_node<N>(mut self, name: &str, node: N) -> Self
    where
        N: GraphNode<S> + 'static,
    {
        self.nodes.push((name.to_string(), Arc::new(node)));
        self
    }

    pub fn set_entry(mut self, name: &str) -> Self {
        self.entry = Some(name.to_string());
        self
    }

    pub fn add_edge(mut self, from: &str, to: &str) -> Self {
        self.edges.push((from.to_string(), Edge::Direct(to.to_string())));
        self
    }

    /// `router` must only return names listed in `targets` (or the run fails).
    pub fn add_conditional_edges<F, R>(mut self, from: &str, router: F, targets: &[&str]) -> Self
    where
        F: Fn(&GraphState<S>) -> R + Send + Sync + 'static,
        R: Into<String>,
    {
        let router: Router<S> = Arc::new(move |state: &GraphState<S>| router(state).into());
        self.edges.push((
            from.to_string(),
            Edge::Conditional {
                router,
                targets: targets.iter().map(|t| t.to_string()).collect(),
            },
        ));
        self
    }

    pub fn with_config(mut self, config: ExecutionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn build(self) -> Result<ExecutableGraph<S>, GraphError> {
        let mut program = GraphProgram::new();
        let mut nodes = HashMap::new();

        program.add_node(START);
        for (name, node) in self.nodes {
            if name == START || name == END || nodes.contains_key(&name) {
                return Err(GraphError::DuplicateNode { node: name });
            }
            program.add_node(&name);
            nodes.insert(name, node);
        }

        let entry = self.entry.ok_or(GraphError::MissingEntry)?;
        if !nodes.contains_key(&entry) {
            return Err(GraphError::MissingNode { node: entry });
        }
        program.add_edge(START, &entry, EdgeKind::Default);

        let known = |name: &str| name == END || nodes.contains_key(name);
        let mut edges = HashMap::new();
        for (from, edge) in self.edges {
            if !nodes.contains_key(&from) {
                return Err(GraphError::MissingNode { node: from });
            }
            match &edge {
                Edge::Direct(to) => {
                    if !known(to) {
                        return Err(GraphError::InvalidEdge { node: to.clone() });
                    }
                    program.add_edge(&from, to, EdgeKind::Default);
                }
                Edge::Conditional { targets, .. } => {
                    for to in targets {
                        if !known(to) {
                            return Err(GraphError::InvalidEdge { node: to.clone() });
                        }
                        program.add_edge(&from, to, EdgeKind::Conditional);
                    }
                }
            }
            if edges.contains_key(&from) {
                return Err(GraphError::DuplicateEdge { node: from });
            }
            edges.insert(from, edge);
        }

        Ok(ExecutableGraph {
            nodes,
            edges,
            entry,
            config: self.config,
            observer: self.observer,
            program,
        })
    }
}

pub struct ExecutableGraph<S: StateSchema> {
    nodes: HashMap<String, Arc<dyn GraphNode<S>>>,
    edges: HashMap<String, Edge<S>>,
    entry: String,
    config: ExecutionConfig,
    observer: Option<Arc<dyn Observer>>,
    program: GraphProgram,
}

impl<S: StateSchema> ExecutableGraph<S> {
    pub fn program(&self) -> &GraphProgram {
        &self.program
    }

    pub fn to_mermaid(&self) -> String {
        self.program.to_mermaid()
    }

    pub async fn invoke(&self, state: GraphState<S>) -> Result<GraphState<S>, GraphError> {
        self.invoke_with_options(state, ExecutionOptions::default()).await
    }

    pub async fn invoke_with_options(
        &self,
        mut state: GraphState<S>,
        options: ExecutionOptions,
    ) -> Result<GraphState<S>, GraphError> {
        let config = self.config.merge(&options);
        let mut current = self.entry.clone();
        let mut step = 0usize;

        loop {
            if let Some(max) = config.max_steps {
                if step >= max {
                    return Err(GraphError::MaxStepsExceeded { max, reached: step });
                }
            }
            step += 1;

            let node = self
                .nodes
                .get(&current)
                .ok_or_else(|| GraphError::MissingNode {
                    node: current.clone(),
                })?;
            let context = GraphContext {
                node_id: current.clone(),
                step,
                remaining_steps: config.max_steps.map(|max| max.saturating_sub(step)),
            };

            if let Some(observer) = &self.observer {
                let input = serde_json::to_value(&state.data).unwrap_or_default();
                observer.on_node_start(&current, &input).await;
            }
            let started = Instant::now();
            let span = tracing::info_span!("graph_node", node = %current, step);
            let result = node
                .invoke_with_context(state.clone(), &context)
                .instrument(span)
                .await;

            let update = match result {
                Ok(update) => update,
                Err(source) => {
                    let error = GraphError::NodeFailed {
                        node: current.clone(),
                        source,
                    };
                    if let Some(observer) = &self.observer {
                        observer.on_error(&current, &error).await;
                    }
                    return Err(error);
                }
            };
            state = state.apply(update);

            if let Some(observer) = &self.observer {
                let output = serde_json::to_value(&state.data).unwrap_or_default();
                observer
                    .on_node_end(&current, &output, started.elapsed().as_millis())
                    .await;
            }

            let next = match self.edges.get(&current) {
                None => break,
                Some(Edge::Direct(next)) => next.clone(),
                Some(Edge::Conditional { router, targets }) => {
                    let next = router(&state);
                    if !targets.contains(&next) {
                        return Err(GraphError::InvalidEdge { node: next });
                    }
                    next
                }
            };
            tracing::trace!(from = %current, to = %next, "edge");
            if next == END {
                break;
            }
            current = next;
        }

        Ok(state)
    }
}
