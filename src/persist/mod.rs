mod client;
mod wire;

pub use client::{WorkflowApi, WorkflowRecord};
pub(crate) use client::checked;
pub use wire::{WireNode, WorkflowDefinition, from_wire, to_wire};
