use std::collections::HashMap;
use std::fmt::Write;

use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::graph::{END, START};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    Default,
    Conditional,
}

/// Static topology of a compiled graph, including the start and end markers.
#[derive(Clone, Debug)]
pub struct GraphProgram {
    graph: Graph<String, EdgeKind>,
    name_to_index: HashMap<String, NodeIndex>,
}

impl GraphProgram {
    pub(crate) fn new() -> Self {
        Self {
            graph: Graph::new(),
            name_to_index: HashMap::new(),
        }
    }

    pub(crate) fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(index) = self.name_to_index.get(name) {
            return *index;
        }
        let index = self.graph.add_node(name.to_string());
        self.name_to_index.insert(name.to_string(), index);
        index
    }

    pub(crate) fn add_edge(&mut self, from: &str, to: &str, kind: EdgeKind) {
        let from = self.add_node(from);
        let to = self.add_node(to);
        self.graph.add_edge(from, to, kind);
    }

    pub fn node_names(&self) -> Vec<String> {
        self.graph
            .node_indices()
            .map(|index| self.graph[index].clone())
            .collect()
    }

    pub fn edge_names(&self) -> Vec<(String, String, EdgeKind)> {
        self.graph
            .edge_references()
            .map(|edge| {
                (
                    self.graph[edge.source()].clone(),
                    self.graph[edge.target()].clone(),
                    *edge.weight(),
                )
            })
            .collect()
    }

    pub fn to_mermaid(&self) -> String {
        let mut out = String::from("flowchart TD\n");
        for index in self.graph.node_indices() {
            let name = &self.graph[index];
            if name == START || name == END {
                let _ = writeln!(out, "    {name}([{name}])");
            } else {
                let _ = writeln!(out, "    {name}({name})");
            }
        }
        for (from, to, kind) in self.edge_names() {
            let arrow = match kind {
                EdgeKind::Default => "-->",
                EdgeKind::Conditional => "-.->",
            };
            let _ = writeln!(out, "    {from} {arrow} {to}");
        }
        out
    }
}
