//! Structural lints over a workflow graph.
//!
//! Run before save to warn the user about shapes the editor accepts but the
//! backend is unlikely to execute sensibly. Advisory only: no lint ever
//! blocks a mutation.

use std::{collections::HashMap, fmt};

use petgraph::{
    algo::is_cyclic_directed,
    graph::{DiGraph, NodeIndex},
    visit::Dfs,
};

use crate::model::{EdgeId, Graph, NodeId};

/// One advisory finding about a graph's structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// An edge endpoint refers to a node that is not in the graph.
    DanglingEdge { edge: EdgeId, endpoint: NodeId },
    /// No trigger node; the workflow can never start.
    NoTrigger,
    /// A node no trigger can reach.
    Unreachable { node: NodeId },
    /// The graph contains a directed cycle.
    Cycle,
}

impl fmt::Display for ValidationIssue {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            ValidationIssue::DanglingEdge { edge, endpoint } => {
                write!(f, "edge {edge} refers to missing node {endpoint}")
            }
            ValidationIssue::NoTrigger => write!(f, "workflow has no trigger node"),
            ValidationIssue::Unreachable { node } => write!(f, "node {node} is unreachable from any trigger"),
            ValidationIssue::Cycle => write!(f, "workflow contains a cycle"),
        }
    }
}

/// Lints a graph, returning every issue found (empty means clean).
pub fn validate(graph: &Graph) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let mut indices: HashMap<&str, NodeIndex> = HashMap::new();
    let mut digraph: DiGraph<&str, ()> = DiGraph::new();
    for node in &graph.nodes {
        indices.insert(node.id.as_str(), digraph.add_node(node.id.as_str()));
    }

    for edge in &graph.edges {
        let source = indices.get(edge.source.as_str()).copied();
        let target = indices.get(edge.target.as_str()).copied();
        if source.is_none() {
            issues.push(ValidationIssue::DanglingEdge {
                edge: edge.id.clone(),
                endpoint: edge.source.clone(),
            });
        }
        if target.is_none() {
            issues.push(ValidationIssue::DanglingEdge {
                edge: edge.id.clone(),
                endpoint: edge.target.clone(),
            });
        }
        if let (Some(source), Some(target)) = (source, target) {
            digraph.add_edge(source, target, ());
        }
    }

    let trigger_indices: Vec<NodeIndex> = graph.nodes.iter().filter(|n| n.kind.is_trigger()).filter_map(|n| indices.get(n.id.as_str()).copied()).collect();

    if trigger_indices.is_empty() {
        if !graph.nodes.is_empty() {
            issues.push(ValidationIssue::NoTrigger);
        }
    } else {
        let mut reached = vec![false; digraph.node_count()];
        for start in &trigger_indices {
            let mut dfs = Dfs::new(&digraph, *start);
            while let Some(index) = dfs.next(&digraph) {
                reached[index.index()] = true;
            }
        }
        for node in &graph.nodes {
            if let Some(index) = indices.get(node.id.as_str())
                && !reached[index.index()]
            {
                issues.push(ValidationIssue::Unreachable { node: node.id.clone() });
            }
        }
    }

    if is_cyclic_directed(&digraph) {
        issues.push(ValidationIssue::Cycle);
    }

    issues
}

#[cfg(test)]
mod tests {
    use crate::{
        model::{Edge, NodeKind, Position},
        registry,
    };

    use super::*;

    #[test]
    fn test_starter_graph_is_clean() {
        assert!(validate(&Graph::starter()).is_empty());
    }

    #[test]
    fn test_dangling_edge_is_reported() {
        let mut graph = Graph::starter();
        graph.edges.push(Edge::with_id("e-bad", "2", "99"));
        let issues = validate(&graph);
        assert!(issues.contains(&ValidationIssue::DanglingEdge {
            edge: "e-bad".to_string(),
            endpoint: "99".to_string(),
        }));
    }

    #[test]
    fn test_missing_trigger_is_reported() {
        let mut graph = Graph::starter();
        graph.remove_node("1");
        assert!(validate(&graph).contains(&ValidationIssue::NoTrigger));
    }

    #[test]
    fn test_unreachable_node_is_reported() {
        let mut graph = Graph::starter();
        graph.nodes.push(registry::materialize("4", NodeKind::Delay, Position::default()));
        let issues = validate(&graph);
        assert!(issues.contains(&ValidationIssue::Unreachable { node: "4".to_string() }));
    }

    #[test]
    fn test_cycle_is_reported() {
        let mut graph = Graph::starter();
        graph.edges.push(Edge::with_id("e2-1", "2", "1"));
        assert!(validate(&graph).contains(&ValidationIssue::Cycle));
    }
}
