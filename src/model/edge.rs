//! Workflow edge definitions.
//!
//! An edge is a directed connection between two nodes. Presentation
//! attributes are defaulted uniformly when the user draws a connection and
//! can be overridden individually.

use nanoid::nanoid;
use serde::{Deserialize, Serialize};

use crate::model::NodeId;

/// Unique identifier for an edge within a workflow.
pub type EdgeId = String;

/// Arrowhead shape drawn at an edge's target end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerType {
    Arrow,
    ArrowClosed,
}

/// Marker attached to an edge's target end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeMarker {
    #[serde(rename = "type")]
    pub marker_type: MarkerType,
}

impl EdgeMarker {
    pub fn arrow_closed() -> Self {
        Self {
            marker_type: MarkerType::ArrowClosed,
        }
    }
}

/// Stroke attributes of an edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EdgeStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

/// A directed connection between two nodes.
///
/// Endpoints must refer to nodes in the same graph; removing a node drops
/// its incident edges. Self-loops and duplicate edges are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default)]
    pub animated: bool,
    #[serde(rename = "markerEnd", skip_serializing_if = "Option::is_none")]
    pub marker_end: Option<EdgeMarker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<EdgeStyle>,
}

impl Edge {
    /// New edge with a fresh opaque id and the canvas default presentation.
    pub fn connect(
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Self {
        Self::with_id(format!("e-{}", nanoid!(10)), source, target)
    }

    /// New edge with a caller-chosen id and the default presentation.
    pub fn with_id(
        id: impl Into<EdgeId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            animated: true,
            marker_end: Some(EdgeMarker::arrow_closed()),
            style: Some(EdgeStyle {
                stroke: Some("#94a3b8".to_string()),
                stroke_width: Some(2.0),
            }),
        }
    }
}
