//! Workflow graph implementation using petgraph.
//!
//! The graph owns the nodes and edges of a workflow. Structural invariants
//! are enforced at construction time: node ids are unique and every edge
//! endpoint must name a node already in the graph. Deserialization goes
//! through the same checks, so a dangling edge is a hard error rather than
//! something dropped on the floor.

use crate::edge::{Edge, EdgeId};
use crate::error::GraphError;
use crate::node::{Node, NodeId};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

/// A directed workflow graph.
///
/// Serializes as `{ "nodes": [...], "edges": [...] }`, matching the wire
/// schema of the generation response.
#[derive(Debug, Clone)]
pub struct WorkflowGraph {
    /// The underlying directed graph.
    graph: DiGraph<Node, Edge>,
    /// Map from NodeId to petgraph's NodeIndex for O(1) lookup.
    node_index_map: HashMap<NodeId, NodeIndex>,
}

impl WorkflowGraph {
    /// Creates a new empty workflow graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_index_map: HashMap::new(),
        }
    }

    /// Builds a graph from node and edge lists, enforcing the structural
    /// invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if a node id repeats or an edge references a node
    /// that is not in the list.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node)?;
        }
        for edge in edges {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }

    /// Adds a node to the graph.
    ///
    /// # Errors
    ///
    /// Returns an error if a node with the same id is already present.
    pub fn add_node(&mut self, node: Node) -> Result<NodeId, GraphError> {
        let node_id = node.id;
        if self.node_index_map.contains_key(&node_id) {
            return Err(GraphError::DuplicateNode { node_id });
        }
        let index = self.graph.add_node(node);
        self.node_index_map.insert(node_id, index);
        Ok(node_id)
    }

    /// Adds an edge to the graph.
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint does not name a node in the
    /// graph.
    pub fn add_edge(&mut self, edge: Edge) -> Result<EdgeId, GraphError> {
        let source_index = *self
            .node_index_map
            .get(&edge.source)
            .ok_or(GraphError::DanglingEdge {
                edge_id: edge.id,
                node_id: edge.source,
            })?;
        let target_index = *self
            .node_index_map
            .get(&edge.target)
            .ok_or(GraphError::DanglingEdge {
                edge_id: edge.id,
                node_id: edge.target,
            })?;

        let edge_id = edge.id;
        self.graph.add_edge(source_index, target_index, edge);
        Ok(edge_id)
    }

    /// Returns a reference to a node by its id.
    #[must_use]
    pub fn get_node(&self, node_id: NodeId) -> Option<&Node> {
        let index = self.node_index_map.get(&node_id)?;
        self.graph.node_weight(*index)
    }

    /// Returns all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// Returns all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.graph.edge_weights()
    }

    /// Returns the number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns nodes that have no incoming edges (entry points).
    pub fn entry_nodes(&self) -> Vec<&Node> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .edges_directed(idx, Direction::Incoming)
                    .count()
                    == 0
            })
            .filter_map(|idx| self.graph.node_weight(idx))
            .collect()
    }

    /// Validates the graph structure.
    ///
    /// Edge endpoints are checked at construction, so the only remaining
    /// structural violation is a cycle.
    ///
    /// # Errors
    ///
    /// Returns an error describing the validation failure.
    pub fn validate(&self) -> Result<(), GraphError> {
        if petgraph::algo::is_cyclic_directed(&self.graph) {
            return Err(GraphError::CycleDetected);
        }
        Ok(())
    }

    /// Returns true when the edge set forms a simple path visiting every
    /// node exactly once, starting at the single entry node.
    ///
    /// A single node with no edges is a path of length zero; an empty graph
    /// is not a path.
    #[must_use]
    pub fn is_simple_path(&self) -> bool {
        let n = self.node_count();
        if n == 0 {
            return false;
        }
        if self.edge_count() != n - 1 {
            return false;
        }

        let mut entry = None;
        for idx in self.graph.node_indices() {
            let incoming = self.graph.edges_directed(idx, Direction::Incoming).count();
            let outgoing = self.graph.edges_directed(idx, Direction::Outgoing).count();
            if incoming > 1 || outgoing > 1 {
                return false;
            }
            if incoming == 0 {
                if entry.is_some() {
                    return false;
                }
                entry = Some(idx);
            }
        }
        let Some(entry) = entry else {
            return false;
        };

        let mut visited = 1;
        let mut current = entry;
        while let Some(next) = self
            .graph
            .neighbors_directed(current, Direction::Outgoing)
            .next()
        {
            visited += 1;
            if visited > n {
                return false;
            }
            current = next;
        }
        visited == n
    }
}

impl Default for WorkflowGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for WorkflowGraph {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let nodes: Vec<&Node> = self.nodes().collect();
        let edges: Vec<&Edge> = self.edges().collect();

        let mut state = serializer.serialize_struct("WorkflowGraph", 2)?;
        state.serialize_field("nodes", &nodes)?;
        state.serialize_field("edges", &edges)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for WorkflowGraph {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct GraphVisitor;

        impl<'de> Visitor<'de> for GraphVisitor {
            type Value = WorkflowGraph;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a workflow graph with nodes and edges")
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut nodes: Option<Vec<Node>> = None;
                let mut edges: Option<Vec<Edge>> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "nodes" => nodes = Some(map.next_value()?),
                        "edges" => edges = Some(map.next_value()?),
                        _ => {
                            let _ = map.next_value::<serde::de::IgnoredAny>()?;
                        }
                    }
                }

                WorkflowGraph::from_parts(nodes.unwrap_or_default(), edges.unwrap_or_default())
                    .map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_struct("WorkflowGraph", &["nodes", "edges"], GraphVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeCategory, NodeData};

    fn trigger_node(id: u32) -> Node {
        Node::new(
            NodeId::new(id),
            NodeCategory::Trigger,
            NodeData::new("Gmail", "When email arrives"),
        )
    }

    fn action_node(id: u32) -> Node {
        Node::new(
            NodeId::new(id),
            NodeCategory::Action,
            NodeData::new("Google Drive", "Save to Drive"),
        )
    }

    fn chain_graph() -> WorkflowGraph {
        WorkflowGraph::from_parts(
            vec![trigger_node(1), action_node(2), action_node(3)],
            vec![
                Edge::new(EdgeId::new(1), NodeId::new(1), NodeId::new(2)),
                Edge::new(EdgeId::new(2), NodeId::new(2), NodeId::new(3)),
            ],
        )
        .expect("valid chain")
    }

    #[test]
    fn add_and_get_node() {
        let mut graph = WorkflowGraph::new();
        graph.add_node(trigger_node(1)).expect("add");

        let retrieved = graph.get_node(NodeId::new(1)).expect("present");
        assert_eq!(retrieved.data.label, "Gmail");
    }

    #[test]
    fn duplicate_node_id_rejected() {
        let mut graph = WorkflowGraph::new();
        graph.add_node(trigger_node(1)).expect("add");

        let result = graph.add_node(action_node(1));
        assert_eq!(
            result.unwrap_err(),
            GraphError::DuplicateNode {
                node_id: NodeId::new(1)
            }
        );
    }

    #[test]
    fn dangling_edge_rejected() {
        let mut graph = WorkflowGraph::new();
        graph.add_node(trigger_node(1)).expect("add");

        let result = graph.add_edge(Edge::new(EdgeId::new(1), NodeId::new(1), NodeId::new(9)));
        assert_eq!(
            result.unwrap_err(),
            GraphError::DanglingEdge {
                edge_id: EdgeId::new(1),
                node_id: NodeId::new(9)
            }
        );
    }

    #[test]
    fn entry_nodes_returns_nodes_without_incoming() {
        let graph = chain_graph();
        let entries = graph.entry_nodes();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, NodeId::new(1));
    }

    #[test]
    fn chain_is_simple_path() {
        assert!(chain_graph().is_simple_path());
    }

    #[test]
    fn single_node_is_simple_path() {
        let graph = WorkflowGraph::from_parts(vec![trigger_node(1)], vec![]).expect("valid");
        assert!(graph.is_simple_path());
    }

    #[test]
    fn branch_is_not_simple_path() {
        let graph = WorkflowGraph::from_parts(
            vec![trigger_node(1), action_node(2), action_node(3)],
            vec![
                Edge::new(EdgeId::new(1), NodeId::new(1), NodeId::new(2)),
                Edge::new(EdgeId::new(2), NodeId::new(1), NodeId::new(3)),
            ],
        )
        .expect("structurally valid");
        assert!(!graph.is_simple_path());
    }

    #[test]
    fn cycle_fails_validation_and_path_check() {
        let graph = WorkflowGraph::from_parts(
            vec![trigger_node(1), action_node(2)],
            vec![
                Edge::new(EdgeId::new(1), NodeId::new(1), NodeId::new(2)),
                Edge::new(EdgeId::new(2), NodeId::new(2), NodeId::new(1)),
            ],
        )
        .expect("structurally valid");

        assert_eq!(graph.validate().unwrap_err(), GraphError::CycleDetected);
        assert!(!graph.is_simple_path());
    }

    #[test]
    fn graph_serde_roundtrip() {
        let graph = chain_graph();
        let json = serde_json::to_string(&graph).expect("serialize");
        let parsed: WorkflowGraph = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(parsed.node_count(), 3);
        assert_eq!(parsed.edge_count(), 2);
        assert!(parsed.get_node(NodeId::new(2)).is_some());
    }

    #[test]
    fn deserialize_rejects_dangling_edge() {
        let json = r#"{
            "nodes": [
                {"id": "1", "category": "trigger",
                 "data": {"label": "Gmail", "friendly_name": "When email arrives"}}
            ],
            "edges": [{"id": "1", "source": "1", "target": "2"}]
        }"#;

        let result: Result<WorkflowGraph, _> = serde_json::from_str(json);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("missing node 2"));
    }
}
