//! The workflow graph aggregate.

use serde::Serialize;

use crate::{
    model::{Edge, EdgeId, Node, NodeId, NodeKind, Position},
    registry,
};

/// The complete `{nodes, edges}` structure describing one workflow.
///
/// Owned exclusively by the editing session; there is no multi-editor
/// sharing in this client.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    /// The default graph a new workflow opens with: start, task, end,
    /// connected in a line.
    pub fn starter() -> Self {
        Self {
            nodes: vec![
                registry::materialize("1", NodeKind::StartTrigger, Position::new(250.0, 50.0)),
                registry::materialize("2", NodeKind::GenericTask, Position::new(250.0, 180.0)),
                registry::materialize("3", NodeKind::End, Position::new(250.0, 310.0)),
            ],
            edges: vec![Edge::with_id("e1-2", "1", "2"), Edge::with_id("e2-3", "2", "3")],
        }
    }

    pub fn node(
        &self,
        id: &str,
    ) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(
        &mut self,
        id: &str,
    ) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn contains_node(
        &self,
        id: &str,
    ) -> bool {
        self.node(id).is_some()
    }

    pub fn edge(
        &self,
        id: &str,
    ) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Removes a node and, atomically, every edge incident to it, so the
    /// graph never carries dangling endpoints.
    pub fn remove_node(
        &mut self,
        id: &str,
    ) -> Option<Node> {
        let index = self.nodes.iter().position(|n| n.id == id)?;
        let node = self.nodes.remove(index);
        self.edges.retain(|e| e.source != id && e.target != id);
        Some(node)
    }

    pub fn remove_edge(
        &mut self,
        id: &str,
    ) -> Option<Edge> {
        let index = self.edges.iter().position(|e| e.id == id)?;
        Some(self.edges.remove(index))
    }

    /// Highest numeric node id present, 0 when there is none. Used to
    /// rebase the session id counter when a graph is loaded.
    pub fn max_numeric_id(&self) -> u64 {
        self.nodes.iter().filter_map(|n| n.id.parse::<u64>().ok()).max().unwrap_or(0)
    }

    /// Re-applies the canonical theme to every node. Explicit load-time
    /// step; never run on read.
    pub fn restyle(&mut self) {
        for node in &mut self.nodes {
            node.restyle();
        }
    }

    pub fn edge_ids(&self) -> Vec<EdgeId> {
        self.edges.iter().map(|e| e.id.clone()).collect()
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_shape() {
        let graph = Graph::starter();
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.node("1").map(|n| n.kind.clone()), Some(NodeKind::StartTrigger));
        assert_eq!(graph.node("3").map(|n| n.kind.clone()), Some(NodeKind::End));
        assert_eq!(graph.max_numeric_id(), 3);
    }

    #[test]
    fn test_remove_node_drops_incident_edges() {
        let mut graph = Graph::starter();
        graph.remove_node("2").unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_remove_edge_keeps_nodes() {
        let mut graph = Graph::starter();
        graph.remove_edge("e1-2").unwrap();
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.edge_ids(), vec!["e2-3".to_string()]);
    }

    #[test]
    fn test_max_numeric_id_ignores_opaque_ids() {
        let mut graph = Graph::starter();
        graph.nodes.push(registry::materialize("node-xyz", NodeKind::Delay, Position::default()));
        assert_eq!(graph.max_numeric_id(), 3);
    }
}
