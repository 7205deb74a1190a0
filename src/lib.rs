//! # Flowcanvas
//!
//! Flowcanvas is the client-side editing core of the FiCX workflow canvas:
//! a mutable directed graph of workflow steps, a linear undo history, and
//! the adapters that reconcile AI-proposed rewrites and persist graphs to
//! the backend.
//!
//! ## Core Features
//!
//! - **Graph Editing**: add, connect, configure, move, and remove nodes and
//!   edges, each as one atomic, undoable operation
//! - **Linear Undo**: every committed mutation snapshots the graph; undo
//!   restores snapshots verbatim, new edits discard the redo tail
//! - **AI Reconciliation**: externally proposed graph replacements are
//!   shape-validated and re-themed before they become one undoable entry,
//!   degrading to a no-op with an explanation instead of failing
//! - **Wire Format**: lossless `{nodes, edges}` serialization for the
//!   backend create/update endpoints
//!
//! ## Quick Start
//!
//! ```rust
//! use flowcanvas::{CanvasEditor, NodeKind, Position};
//!
//! let mut editor = CanvasEditor::new();
//! let id = editor.add_node(NodeKind::SendEmail, Position::new(100.0, 100.0));
//! editor.connect(&id, "3").unwrap();
//! editor.undo().unwrap();
//! editor.undo().unwrap();
//! assert_eq!(editor.graph().nodes.len(), 3);
//! ```

mod assistant;
mod canvas;
mod config;
mod error;
mod model;
mod persist;
mod registry;
mod validate;

pub use assistant::{Assistant, EditedWorkflow, Exchange, GeneratedWorkflow, GenerationService, HandoffSlot, HttpGenerationService, Proposal, reconcile};
pub use canvas::{CanvasEditor, History};
pub use config::{AiConfig, Config};
pub use error::FlowcanvasError;
pub use model::*;
pub use persist::{WireNode, WorkflowApi, WorkflowDefinition, WorkflowRecord, from_wire, to_wire};
pub use registry::{NodeTypeInfo, catalog, initial_data, materialize};
pub use validate::{ValidationIssue, validate};

/// Result type alias for Flowcanvas operations.
pub type Result<T> = std::result::Result<T, FlowcanvasError>;
