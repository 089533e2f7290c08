use crate::Result;
use petgraph::prelude::EdgeRef;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// A named directed graph of state transitions, optionally grouping other graphs.
///
/// Nodes are state labels and edges are event labels. Several state machines can be
/// rendered in one diagram by attaching each one as a subgraph of a parent graph; each
/// subgraph becomes a Graphviz cluster.
#[derive(Debug, Clone)]
pub struct Graph {
    name: String,

    /// The underlying graph structure.
    /// Nodes hold state labels, edges hold the event that triggers the transition.
    pub graph: StableGraph<String, String>,

    /// Maps a state label to its node so every state appears exactly once.
    pub node_index: HashMap<String, NodeIndex>,

    subgraphs: Vec<Graph>,
}

/// Outgoing transitions from one state to another, with all their events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedEdge<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub events: Vec<&'a str>,
}

impl CombinedEdge<'_> {
    pub fn label(&self) -> String {
        self.events.join(",")
    }
}

impl Graph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graph: StableGraph::new(),
            node_index: HashMap::new(),
            subgraphs: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the node for a state, creating it on first use.
    pub fn node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.to_string());
        self.node_index.insert(id.to_string(), idx);
        idx
    }

    /// Adds a transition, creating either state if needed.
    pub fn add_edge(&mut self, from: &str, to: &str, label: impl Into<String>) -> EdgeIndex {
        let from_idx = self.node(from);
        let to_idx = self.node(to);
        self.graph.add_edge(from_idx, to_idx, label.into())
    }

    pub fn add_subgraph(&mut self, subgraph: Graph) {
        self.subgraphs.push(subgraph);
    }

    pub fn subgraphs(&self) -> &[Graph] {
        &self.subgraphs
    }

    /// State labels in the order they were first seen
    pub fn node_ids(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx))
            .map(String::as_str)
            .collect()
    }

    /// Outgoing edges of a node, merging parallel edges to the same target.
    ///
    /// Targets and events keep declaration order.
    pub fn combined_edges(&self, node_idx: NodeIndex) -> Vec<CombinedEdge<'_>> {
        let Some(from) = self.graph.node_weight(node_idx) else {
            return Vec::new();
        };

        let mut edges: Vec<_> = self.graph.edges(node_idx).collect();
        edges.sort_by_key(|edge| edge.id().index());

        let mut combined: Vec<CombinedEdge<'_>> = Vec::new();
        for edge in edges {
            let Some(to) = self.graph.node_weight(edge.target()) else {
                continue;
            };
            match combined.iter_mut().find(|c| c.to == to.as_str()) {
                Some(existing) => existing.events.push(edge.weight().as_str()),
                None => combined.push(CombinedEdge {
                    from: from.as_str(),
                    to: to.as_str(),
                    events: vec![edge.weight().as_str()],
                }),
            }
        }
        combined
    }

    /// All combined edges of this graph (not its subgraphs), grouped by source state
    pub fn transitions(&self) -> Vec<CombinedEdge<'_>> {
        self.graph
            .node_indices()
            .flat_map(|idx| self.combined_edges(idx))
            .collect()
    }

    /// Get graph statistics, including every nested subgraph
    pub fn stats(&self) -> GraphStats {
        let own = GraphStats {
            total_states: self.graph.node_count(),
            total_transitions: self.graph.edge_count(),
            total_subgraphs: self.subgraphs.len(),
        };
        self.subgraphs.iter().fold(own, |acc, sub| {
            let sub = sub.stats();
            GraphStats {
                total_states: acc.total_states + sub.total_states,
                total_transitions: acc.total_transitions + sub.total_transitions,
                total_subgraphs: acc.total_subgraphs + sub.total_subgraphs,
            }
        })
    }

    /// Export to DOT format for Graphviz
    pub fn to_dot(&self) -> String {
        let mut dot = String::new();
        self.write_dot(&mut dot, 0);
        dot
    }

    fn write_dot(&self, dot: &mut String, depth: usize) {
        let outer = "  ".repeat(depth);
        let inner = "  ".repeat(depth + 1);

        if depth == 0 {
            dot.push_str(&format!("digraph {} {{\n", quote(&self.name)));
            dot.push_str(&format!(
                "{inner}graph [ label={}, fontsize=24, fontname=Helvetica];\n",
                wrap_safe_string(&self.name)
            ));
            dot.push_str(&format!("{inner}node [fontsize=12, fontname=Helvetica];\n"));
            dot.push_str(&format!(
                "{inner}edge [fontsize=9, fontcolor=blue, fontname=Arial];\n"
            ));
        } else {
            dot.push_str(&format!(
                "{outer}subgraph {} {{\n",
                quote(&format!("cluster_{}", self.name))
            ));
            dot.push_str(&format!("{inner}label={}\n", quote(&self.name)));
        }

        for subgraph in &self.subgraphs {
            subgraph.write_dot(dot, depth + 1);
            dot.push('\n');
        }

        for node_idx in self.graph.node_indices() {
            let Some(state) = self.graph.node_weight(node_idx) else {
                continue;
            };
            dot.push_str(&format!(
                "{inner}{} [ label = {} ];\n",
                quote(&self.unique_id(state)),
                wrap_safe_string(state)
            ));
            for edge in self.combined_edges(node_idx) {
                dot.push_str(&format!(
                    "{inner}{} -> {} [ label = {} ];\n",
                    quote(&self.unique_id(edge.from)),
                    quote(&self.unique_id(edge.to)),
                    wrap_safe_string(&edge.label())
                ));
            }
        }

        dot.push_str(&format!("{outer}}}\n"));
    }

    /// Node identifier scoped by graph name so equal states in different subgraphs stay apart
    fn unique_id(&self, state: &str) -> String {
        format!("{}.{}", self.name, state)
    }

    /// Export to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.document())?)
    }

    fn document(&self) -> GraphDocument<'_> {
        GraphDocument {
            name: &self.name,
            states: self.node_ids(),
            transitions: self
                .transitions()
                .into_iter()
                .map(|edge| TransitionDocument {
                    from: edge.from,
                    to: edge.to,
                    events: edge.events,
                })
                .collect(),
            subgraphs: self.subgraphs.iter().map(Graph::document).collect(),
        }
    }

    /// Write the DOT rendering to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let dot = self.to_dot();
        std::fs::write(path, &dot)?;
        tracing::debug!("Wrote {} bytes of DOT to {:?}", dot.len(), path);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    pub total_states: usize,
    pub total_transitions: usize,
    pub total_subgraphs: usize,
}

#[derive(Serialize)]
struct GraphDocument<'a> {
    name: &'a str,
    states: Vec<&'a str>,
    transitions: Vec<TransitionDocument<'a>>,
    subgraphs: Vec<GraphDocument<'a>>,
}

#[derive(Serialize)]
struct TransitionDocument<'a> {
    from: &'a str,
    to: &'a str,
    events: Vec<&'a str>,
}

/// Quote a label for DOT, breaking long comma-separated lists onto several lines.
pub fn wrap_safe_string(label: &str) -> String {
    if label.contains(',') && label.chars().count() > 14 {
        quote(&label.replace(',', ",\n"))
    } else {
        quote(label)
    }
}

/// Quote and escape a DOT identifier or label
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
