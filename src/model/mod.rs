mod data;
mod edge;
mod graph;
mod node;
mod style;

pub use data::{
    AssignTaskData, CallWebhookData, ConditionData, ConditionOperator, DelayData, DelayUnit, EndData, FormTriggerData, GetDocumentData, HumanTaskData, NodeData, RunSqlData, SendEmailData,
    TaskData, TriggerData, UpdateDocumentData, UpdateRecordData,
};
pub use edge::{Edge, EdgeId, EdgeMarker, EdgeStyle, MarkerType};
pub use graph::Graph;
pub use node::{HandlePosition, Node, NodeId, NodeKind, Position};
pub use style::{NodeRole, NodeStyle};
