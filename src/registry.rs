//! Node type catalog.
//!
//! A static registry mapping each node kind to its display metadata and a
//! default configuration payload. New nodes dropped onto the canvas are
//! materialized from here.

use serde_json::{Map, json};

use crate::model::{
    AssignTaskData, CallWebhookData, ConditionData, DelayData, EndData, FormTriggerData, GetDocumentData, HumanTaskData, Node, NodeData, NodeKind, Position, RunSqlData, SendEmailData, TaskData,
    TriggerData, UpdateDocumentData, UpdateRecordData,
};

/// Display metadata for one entry of the node palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeTypeInfo {
    pub kind: NodeKind,
    pub label: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    /// Action nodes sit between a trigger and the end step.
    pub is_action: bool,
}

/// Ordered palette catalog: triggers first, actions, then the end step.
pub fn catalog() -> &'static [NodeTypeInfo] {
    CATALOG
}

const CATALOG: &[NodeTypeInfo] = &[
    NodeTypeInfo {
        kind: NodeKind::StartTrigger,
        label: "Start",
        icon: "play",
        description: "Begins the workflow manually or on a schedule",
        is_action: false,
    },
    NodeTypeInfo {
        kind: NodeKind::FormTrigger,
        label: "Form Submitted",
        icon: "file-input",
        description: "Begins the workflow when an intake form is submitted",
        is_action: false,
    },
    NodeTypeInfo {
        kind: NodeKind::GenericTask,
        label: "Task",
        icon: "square-check",
        description: "A generic step in the workflow",
        is_action: true,
    },
    NodeTypeInfo {
        kind: NodeKind::SendEmail,
        label: "Send Email",
        icon: "mail",
        description: "Sends an email to one or more recipients",
        is_action: true,
    },
    NodeTypeInfo {
        kind: NodeKind::RunSql,
        label: "Run SQL",
        icon: "database",
        description: "Runs a SQL query against a configured connection",
        is_action: true,
    },
    NodeTypeInfo {
        kind: NodeKind::CallWebhook,
        label: "Call Webhook",
        icon: "webhook",
        description: "Calls an external HTTP endpoint",
        is_action: true,
    },
    NodeTypeInfo {
        kind: NodeKind::Delay,
        label: "Delay",
        icon: "clock",
        description: "Pauses the workflow for a fixed duration",
        is_action: true,
    },
    NodeTypeInfo {
        kind: NodeKind::Condition,
        label: "Condition",
        icon: "git-branch",
        description: "Branches on a variable comparison",
        is_action: true,
    },
    NodeTypeInfo {
        kind: NodeKind::AssignTask,
        label: "Assign Task",
        icon: "user-plus",
        description: "Assigns a task to a team member",
        is_action: true,
    },
    NodeTypeInfo {
        kind: NodeKind::HumanTask,
        label: "Human Task",
        icon: "user-check",
        description: "Waits for a person to complete a step",
        is_action: true,
    },
    NodeTypeInfo {
        kind: NodeKind::UpdateRecord,
        label: "Update Record",
        icon: "pencil",
        description: "Updates fields on a record",
        is_action: true,
    },
    NodeTypeInfo {
        kind: NodeKind::GetDocument,
        label: "Get Document",
        icon: "file-search",
        description: "Fetches a document by id",
        is_action: true,
    },
    NodeTypeInfo {
        kind: NodeKind::UpdateDocument,
        label: "Update Document",
        icon: "file-edit",
        description: "Replaces a document's content",
        is_action: true,
    },
    NodeTypeInfo {
        kind: NodeKind::End,
        label: "End",
        icon: "flag",
        description: "Ends the workflow",
        is_action: false,
    },
];

/// Default configuration payload for a kind.
///
/// Every call builds a fresh payload; editing one node's data never leaks
/// into another. Unrecognized kinds fall back to a raw `{type, label}` map
/// instead of failing, since new kinds may arrive from the AI service or a
/// newer backend.
pub fn initial_data(
    kind: &NodeKind,
    fallback_label: &str,
) -> NodeData {
    let label = CATALOG.iter().find(|info| info.kind == *kind).map(|info| info.label.to_string()).unwrap_or_else(|| fallback_label.to_string());

    match kind {
        NodeKind::StartTrigger => NodeData::StartTrigger(TriggerData { label }),
        NodeKind::FormTrigger => NodeData::FormTrigger(FormTriggerData { label, ..Default::default() }),
        NodeKind::GenericTask => NodeData::GenericTask(TaskData { label, ..Default::default() }),
        NodeKind::SendEmail => NodeData::SendEmail(SendEmailData { label, ..Default::default() }),
        NodeKind::RunSql => NodeData::RunSql(RunSqlData { label, ..Default::default() }),
        NodeKind::CallWebhook => NodeData::CallWebhook(CallWebhookData {
            label,
            method: "POST".to_string(),
            ..Default::default()
        }),
        NodeKind::Delay => NodeData::Delay(DelayData {
            label,
            duration: 5,
            ..Default::default()
        }),
        NodeKind::Condition => NodeData::Condition(ConditionData { label, ..Default::default() }),
        NodeKind::AssignTask => NodeData::AssignTask(AssignTaskData { label, ..Default::default() }),
        NodeKind::HumanTask => NodeData::HumanTask(HumanTaskData { label, ..Default::default() }),
        NodeKind::UpdateRecord => NodeData::UpdateRecord(UpdateRecordData { label, ..Default::default() }),
        NodeKind::GetDocument => NodeData::GetDocument(GetDocumentData { label, ..Default::default() }),
        NodeKind::UpdateDocument => NodeData::UpdateDocument(UpdateDocumentData { label, ..Default::default() }),
        NodeKind::End => NodeData::End(EndData { label }),
        NodeKind::Custom(tag) => {
            let mut map = Map::new();
            map.insert("type".to_string(), json!(tag));
            map.insert("label".to_string(), json!(fallback_label));
            NodeData::Custom(map)
        }
    }
}

/// Builds a ready-to-insert node for `kind`: registry default data plus the
/// canonical style.
pub fn materialize(
    id: impl Into<String>,
    kind: NodeKind,
    position: Position,
) -> Node {
    let data = initial_data(&kind, &kind.to_string());
    Node::new(id, kind, position, data)
}

#[cfg(test)]
mod tests {
    use crate::model::NodeStyle;

    use super::*;

    #[test]
    fn test_catalog_order() {
        let kinds: Vec<_> = catalog().iter().map(|info| info.kind.clone()).collect();
        assert_eq!(kinds.first(), Some(&NodeKind::StartTrigger));
        assert_eq!(kinds.last(), Some(&NodeKind::End));
        assert_eq!(kinds.len(), 14);
    }

    #[test]
    fn test_default_payloads_are_independent() {
        let a = initial_data(&NodeKind::SendEmail, "Send Email");
        let mut b = initial_data(&NodeKind::SendEmail, "Send Email");
        if let NodeData::SendEmail(ref mut email) = b {
            email.to = "someone@example.com".to_string();
        }
        assert_ne!(a, b);
        assert_eq!(a, initial_data(&NodeKind::SendEmail, "Send Email"));
    }

    #[test]
    fn test_unknown_kind_falls_back_soft() {
        let data = initial_data(&NodeKind::Custom("approval-gate".into()), "Approval Gate");
        match data {
            NodeData::Custom(map) => {
                assert_eq!(map.get("type").and_then(|v| v.as_str()), Some("approval-gate"));
                assert_eq!(map.get("label").and_then(|v| v.as_str()), Some("Approval Gate"));
            }
            other => panic!("expected raw payload, got {other:?}"),
        }
    }

    #[test]
    fn test_materialize_applies_canonical_style() {
        let node = materialize("7", NodeKind::FormTrigger, Position::new(10.0, 20.0));
        assert_eq!(node.style, NodeStyle::for_kind(&NodeKind::FormTrigger));
        assert_eq!(node.label(), "Form Submitted");
    }
}
