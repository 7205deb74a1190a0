//! Wire format for a workflow definition.
//!
//! The exact `{nodes, edges}` shape exchanged with the backend persistence
//! API and the AI generation service. `to_wire` emits only durable fields;
//! `from_wire` rebuilds the typed in-memory model and re-applies the
//! canonical theme since stored style is never trusted blindly.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{Edge, Graph, HandlePosition, Node, NodeData, NodeKind, NodeStyle, Position};

/// Serialized workflow graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    pub nodes: Vec<WireNode>,
    pub edges: Vec<Edge>,
}

/// One node as serialized on the wire: the configuration payload is a raw
/// JSON object, typed only once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub position: Position,
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(rename = "sourcePosition", default, skip_serializing_if = "Option::is_none")]
    pub source_position: Option<HandlePosition>,
    #[serde(rename = "targetPosition", default, skip_serializing_if = "Option::is_none")]
    pub target_position: Option<HandlePosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<NodeStyle>,
}

/// Serializes a graph to the backend wire shape. Transient editor state
/// (selection, history) lives outside the graph and is naturally absent.
pub fn to_wire(graph: &Graph) -> WorkflowDefinition {
    WorkflowDefinition {
        nodes: graph
            .nodes
            .iter()
            .map(|node| WireNode {
                id: node.id.clone(),
                kind: node.kind.clone(),
                position: node.position,
                data: node.data.to_map(),
                width: node.width,
                height: node.height,
                source_position: node.source_position,
                target_position: node.target_position,
                style: Some(node.style.clone()),
            })
            .collect(),
        edges: graph.edges.clone(),
    }
}

/// Rebuilds the in-memory graph from a wire definition.
///
/// Payloads are parsed kind-directed and every node is re-themed: the
/// canonical style for its kind wins over whatever was stored.
pub fn from_wire(definition: WorkflowDefinition) -> Graph {
    let nodes = definition
        .nodes
        .into_iter()
        .map(|wire| {
            let data = NodeData::from_map(&wire.kind, wire.data);
            let style = wire.style.unwrap_or_default().rethemed(&wire.kind);
            Node {
                id: wire.id,
                kind: wire.kind,
                position: wire.position,
                data,
                style,
                width: wire.width,
                height: wire.height,
                source_position: wire.source_position,
                target_position: wire.target_position,
            }
        })
        .collect();
    Graph {
        nodes,
        edges: definition.edges,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_round_trip_preserves_identity_fields() {
        let graph = Graph::starter();
        let back = from_wire(to_wire(&graph));

        assert_eq!(back.nodes.len(), graph.nodes.len());
        for (a, b) in graph.nodes.iter().zip(back.nodes.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.position, b.position);
            assert_eq!(a.data, b.data);
        }
        assert_eq!(back.edges, graph.edges);
    }

    #[test]
    fn test_wire_node_shape() {
        let definition = to_wire(&Graph::starter());
        let value = serde_json::to_value(&definition).unwrap();
        let node = &value["nodes"][0];
        assert_eq!(node["id"], "1");
        assert_eq!(node["type"], "start-trigger");
        assert!(node["position"]["x"].is_number());
        assert!(node["data"].is_object());
        assert_eq!(node["sourcePosition"], "right");
        assert!(node.get("width").is_none());
    }

    #[test]
    fn test_from_wire_rethemes_stored_style() {
        let json = json!({
            "nodes": [{
                "id": "9",
                "type": "end",
                "position": {"x": 0.0, "y": 0.0},
                "data": {"label": "Done"},
                "style": {"background": "lime"}
            }],
            "edges": []
        });
        let definition: WorkflowDefinition = serde_json::from_value(json).unwrap();
        let graph = from_wire(definition);
        assert_eq!(graph.nodes[0].style, NodeStyle::for_kind(&NodeKind::End));
    }

    #[test]
    fn test_from_wire_tolerates_missing_data() {
        let json = json!({
            "nodes": [{"id": "1", "type": "delay", "position": {"x": 1.0, "y": 2.0}}],
            "edges": []
        });
        let definition: WorkflowDefinition = serde_json::from_value(json).unwrap();
        let graph = from_wire(definition);
        assert_eq!(graph.nodes[0].kind, NodeKind::Delay);
    }

    #[test]
    fn test_unknown_kind_survives_round_trip() {
        let json = json!({
            "nodes": [{"id": "1", "type": "approval-gate", "position": {"x": 0.0, "y": 0.0}, "data": {"label": "Approve"}}],
            "edges": []
        });
        let definition: WorkflowDefinition = serde_json::from_value(json).unwrap();
        let graph = from_wire(definition);
        assert_eq!(graph.nodes[0].kind, NodeKind::Custom("approval-gate".to_string()));

        let back = serde_json::to_value(to_wire(&graph)).unwrap();
        assert_eq!(back["nodes"][0]["type"], "approval-gate");
    }
}
