//! Workflow node definitions.
//!
//! A node is one step of a workflow: a trigger, an action, or the terminal
//! step. Its `kind` is fixed for the node's lifetime and determines both the
//! shape of its configuration payload and its canonical presentation.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::model::{NodeData, NodeStyle};

/// Unique identifier for a node within a workflow.
pub type NodeId = String;

/// Closed set of workflow step tags.
///
/// The `Custom` variant carries any tag outside the catalog verbatim, so
/// graphs produced by a newer backend or by the AI service survive a
/// round-trip instead of failing to load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum NodeKind {
    StartTrigger,
    FormTrigger,
    GenericTask,
    SendEmail,
    RunSql,
    CallWebhook,
    Delay,
    Condition,
    AssignTask,
    HumanTask,
    UpdateRecord,
    GetDocument,
    UpdateDocument,
    End,
    /// Unrecognized tag, kept as-is.
    #[strum(default)]
    Custom(String),
}

impl NodeKind {
    /// Trigger kinds start a workflow and get the primary theme.
    pub fn is_trigger(&self) -> bool {
        matches!(self, NodeKind::StartTrigger | NodeKind::FormTrigger)
    }

    /// The terminal kind ends a workflow and gets the destructive theme.
    pub fn is_terminal(&self) -> bool {
        matches!(self, NodeKind::End)
    }
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        // `#[strum(default)]` makes parsing infallible.
        Ok(tag.parse().unwrap_or(NodeKind::Custom(tag)))
    }
}

/// 2D canvas coordinate of a node, mutated by drag operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(
        x: f64,
        y: f64,
    ) -> Self {
        Self { x, y }
    }
}

/// Which side of a node its connection handle sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlePosition {
    Left,
    Right,
    Top,
    Bottom,
}

/// A single workflow step.
///
/// Invariants:
/// - `id` and `kind` are immutable after creation.
/// - `style` is always the canonical theme for `kind`, merged with any
///   explicit overrides. It is computed at creation and load time only,
///   never on read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub position: Position,
    pub data: NodeData,
    pub style: NodeStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(rename = "sourcePosition", skip_serializing_if = "Option::is_none")]
    pub source_position: Option<HandlePosition>,
    #[serde(rename = "targetPosition", skip_serializing_if = "Option::is_none")]
    pub target_position: Option<HandlePosition>,
}

impl Node {
    /// Creates a node with the canonical style for its kind and the default
    /// horizontal handle layout.
    pub fn new(
        id: impl Into<NodeId>,
        kind: NodeKind,
        position: Position,
        data: NodeData,
    ) -> Self {
        let style = NodeStyle::for_kind(&kind);
        Self {
            id: id.into(),
            kind,
            position,
            data,
            style,
            width: None,
            height: None,
            source_position: Some(HandlePosition::Right),
            target_position: Some(HandlePosition::Left),
        }
    }

    /// Display label taken from the configuration payload.
    pub fn label(&self) -> &str {
        self.data.label()
    }

    /// Re-applies the canonical theme for this node's kind over the carried
    /// style. Called when a stored or externally supplied graph is accepted.
    pub fn restyle(&mut self) {
        self.style = self.style.rethemed(&self.kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags_round_trip() {
        assert_eq!(NodeKind::StartTrigger.to_string(), "start-trigger");
        assert_eq!(NodeKind::SendEmail.to_string(), "send-email");
        assert_eq!(NodeKind::RunSql.to_string(), "run-sql");
        assert_eq!("update-record".parse::<NodeKind>().unwrap(), NodeKind::UpdateRecord);
        assert_eq!("end".parse::<NodeKind>().unwrap(), NodeKind::End);
    }

    #[test]
    fn test_unknown_kind_is_kept_verbatim() {
        let kind: NodeKind = serde_json::from_str("\"approval-gate\"").unwrap();
        assert_eq!(kind, NodeKind::Custom("approval-gate".to_string()));
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"approval-gate\"");
    }

    #[test]
    fn test_kind_serde_uses_kebab_tags() {
        let json = serde_json::to_string(&NodeKind::CallWebhook).unwrap();
        assert_eq!(json, "\"call-webhook\"");
        let back: NodeKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, NodeKind::CallWebhook);
    }

    #[test]
    fn test_roles() {
        assert!(NodeKind::StartTrigger.is_trigger());
        assert!(NodeKind::FormTrigger.is_trigger());
        assert!(NodeKind::End.is_terminal());
        assert!(!NodeKind::SendEmail.is_trigger());
        assert!(!NodeKind::SendEmail.is_terminal());
    }
}
