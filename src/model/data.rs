//! Typed configuration payloads, one shape per node kind.
//!
//! On the wire a node's `data` is a free-form JSON object; in memory it is a
//! tagged union keyed by the node's kind. Construction is kind-directed:
//! the raw map is parsed into the payload shape for that kind, and anything
//! unrecognized (unknown kind, mismatched shape) falls back to the raw map
//! instead of failing the load.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::model::NodeKind;

/// Payload for the manual/scheduled start trigger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerData {
    pub label: String,
}

/// Payload for the form-submission trigger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormTriggerData {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,
}

/// Payload for a generic task step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskData {
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SendEmailData {
    pub label: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub cc: String,
    pub bcc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSqlData {
    pub label: String,
    pub connection: String,
    pub query: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallWebhookData {
    pub label: String,
    pub url: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

/// Time unit for a delay step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DelayUnit {
    Seconds,
    #[default]
    Minutes,
    Hours,
    Days,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayData {
    pub label: String,
    pub duration: u64,
    pub unit: DelayUnit,
}

/// Comparison operator for a condition step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConditionOperator {
    #[default]
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    Contains,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionData {
    pub label: String,
    pub variable: String,
    pub operator: ConditionOperator,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignTaskData {
    pub label: String,
    pub assignee: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_in_days: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HumanTaskData {
    pub label: String,
    pub assignee: String,
    pub instructions: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateRecordData {
    pub label: String,
    pub record: String,
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetDocumentData {
    pub label: String,
    pub document_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateDocumentData {
    pub label: String,
    pub document_id: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndData {
    pub label: String,
}

/// Configuration payload of a node, tagged by its kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeData {
    StartTrigger(TriggerData),
    FormTrigger(FormTriggerData),
    GenericTask(TaskData),
    SendEmail(SendEmailData),
    RunSql(RunSqlData),
    CallWebhook(CallWebhookData),
    Delay(DelayData),
    Condition(ConditionData),
    AssignTask(AssignTaskData),
    HumanTask(HumanTaskData),
    UpdateRecord(UpdateRecordData),
    GetDocument(GetDocumentData),
    UpdateDocument(UpdateDocumentData),
    End(EndData),
    /// Raw payload for unknown kinds, or a payload that did not match its
    /// kind's shape.
    Custom(Map<String, Value>),
}

impl NodeData {
    /// Parses a raw JSON object into the payload shape for `kind`.
    ///
    /// Fails soft: anything that does not parse as the kind's shape is
    /// carried as `Custom` so the graph still loads.
    pub fn from_map(
        kind: &NodeKind,
        map: Map<String, Value>,
    ) -> Self {
        fn parse<T, F>(
            map: &Map<String, Value>,
            wrap: F,
        ) -> Option<NodeData>
        where
            T: DeserializeOwned,
            F: FnOnce(T) -> NodeData,
        {
            serde_json::from_value(Value::Object(map.clone())).ok().map(wrap)
        }

        let parsed = match kind {
            NodeKind::StartTrigger => parse(&map, NodeData::StartTrigger),
            NodeKind::FormTrigger => parse(&map, NodeData::FormTrigger),
            NodeKind::GenericTask => parse(&map, NodeData::GenericTask),
            NodeKind::SendEmail => parse(&map, NodeData::SendEmail),
            NodeKind::RunSql => parse(&map, NodeData::RunSql),
            NodeKind::CallWebhook => parse(&map, NodeData::CallWebhook),
            NodeKind::Delay => parse(&map, NodeData::Delay),
            NodeKind::Condition => parse(&map, NodeData::Condition),
            NodeKind::AssignTask => parse(&map, NodeData::AssignTask),
            NodeKind::HumanTask => parse(&map, NodeData::HumanTask),
            NodeKind::UpdateRecord => parse(&map, NodeData::UpdateRecord),
            NodeKind::GetDocument => parse(&map, NodeData::GetDocument),
            NodeKind::UpdateDocument => parse(&map, NodeData::UpdateDocument),
            NodeKind::End => parse(&map, NodeData::End),
            NodeKind::Custom(_) => None,
        };
        parsed.unwrap_or(NodeData::Custom(map))
    }

    /// The payload as a raw JSON object, the wire representation.
    pub fn to_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Display label carried by the payload, empty when absent.
    pub fn label(&self) -> &str {
        match self {
            NodeData::StartTrigger(d) => &d.label,
            NodeData::FormTrigger(d) => &d.label,
            NodeData::GenericTask(d) => &d.label,
            NodeData::SendEmail(d) => &d.label,
            NodeData::RunSql(d) => &d.label,
            NodeData::CallWebhook(d) => &d.label,
            NodeData::Delay(d) => &d.label,
            NodeData::Condition(d) => &d.label,
            NodeData::AssignTask(d) => &d.label,
            NodeData::HumanTask(d) => &d.label,
            NodeData::UpdateRecord(d) => &d.label,
            NodeData::GetDocument(d) => &d.label,
            NodeData::UpdateDocument(d) => &d.label,
            NodeData::End(d) => &d.label,
            NodeData::Custom(map) => map.get("label").and_then(Value::as_str).unwrap_or(""),
        }
    }

    /// Shallow top-level merge of `patch` into this payload, re-parsed
    /// against `kind` so the result stays typed.
    pub fn merged(
        &self,
        kind: &NodeKind,
        patch: Map<String, Value>,
    ) -> Self {
        let mut map = self.to_map();
        for (key, value) in patch {
            map.insert(key, value);
        }
        Self::from_map(kind, map)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_kind_directed_parse() {
        let map = object(json!({"label": "Check amount", "variable": "amount", "operator": "greater_than", "value": "100"}));
        let data = NodeData::from_map(&NodeKind::Condition, map);
        match data {
            NodeData::Condition(condition) => {
                assert_eq!(condition.variable, "amount");
                assert_eq!(condition.operator, ConditionOperator::GreaterThan);
            }
            other => panic!("expected condition payload, got {other:?}"),
        }
    }

    #[test]
    fn test_mismatched_shape_falls_back_to_raw() {
        // duration must be a number for a delay payload
        let map = object(json!({"label": "Wait", "duration": "soon"}));
        let data = NodeData::from_map(&NodeKind::Delay, map.clone());
        assert_eq!(data, NodeData::Custom(map));
    }

    #[test]
    fn test_unknown_kind_keeps_raw_map() {
        let map = object(json!({"type": "approval-gate", "label": "Approve"}));
        let data = NodeData::from_map(&NodeKind::Custom("approval-gate".into()), map.clone());
        assert_eq!(data, NodeData::Custom(map));
        assert_eq!(data.label(), "Approve");
    }

    #[test]
    fn test_shallow_merge_updates_one_key() {
        let data = NodeData::SendEmail(SendEmailData {
            label: "Notify".into(),
            to: "ops@ficx.io".into(),
            ..Default::default()
        });
        let merged = data.merged(&NodeKind::SendEmail, object(json!({"subject": "Done"})));
        match merged {
            NodeData::SendEmail(email) => {
                assert_eq!(email.label, "Notify");
                assert_eq!(email.to, "ops@ficx.io");
                assert_eq!(email.subject, "Done");
            }
            other => panic!("expected email payload, got {other:?}"),
        }
    }

    #[test]
    fn test_wire_map_round_trip() {
        let data = NodeData::Delay(DelayData {
            label: "Cool down".into(),
            duration: 15,
            unit: DelayUnit::Minutes,
        });
        let back = NodeData::from_map(&NodeKind::Delay, data.to_map());
        assert_eq!(back, data);
    }
}
