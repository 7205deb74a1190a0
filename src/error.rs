//! Error types for Flowcanvas.
//!
//! All errors in Flowcanvas are represented by the `FlowcanvasError` enum,
//! which provides specific variants for different error categories.

use std::io::ErrorKind;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all Flowcanvas operations.
///
/// Each variant represents a specific category of error that can occur
/// while editing, reconciling, or persisting a workflow graph.
#[derive(Deserialize, Serialize, Error, Debug, Clone, PartialEq)]
pub enum FlowcanvasError {
    /// Configuration parsing or validation errors.
    #[error("{0}")]
    Config(String),

    /// Data conversion errors (JSON, wire format).
    #[error("{0}")]
    Convert(String),

    /// Node lookup or mutation errors.
    #[error("{0}")]
    Node(String),

    /// Edge lookup or mutation errors.
    #[error("{0}")]
    Edge(String),

    /// Undo history errors (nothing to undo, etc.).
    #[error("{0}")]
    History(String),

    /// AI assistant reply errors (transport, parse, shape).
    #[error("{0}")]
    Assistant(String),

    /// Backend API errors.
    #[error("{0}")]
    Api(String),

    /// I/O operation errors.
    #[error("{0}")]
    IoError(String),
}

impl From<FlowcanvasError> for String {
    fn from(val: FlowcanvasError) -> Self {
        val.to_string()
    }
}

impl From<std::io::Error> for FlowcanvasError {
    fn from(error: std::io::Error) -> Self {
        FlowcanvasError::IoError(error.to_string())
    }
}

impl From<FlowcanvasError> for std::io::Error {
    fn from(val: FlowcanvasError) -> Self {
        #[allow(clippy::io_other_error)]
        std::io::Error::new(ErrorKind::Other, val.to_string())
    }
}

impl From<serde_json::Error> for FlowcanvasError {
    fn from(error: serde_json::Error) -> Self {
        FlowcanvasError::Convert(error.to_string())
    }
}

impl From<reqwest::Error> for FlowcanvasError {
    fn from(error: reqwest::Error) -> Self {
        FlowcanvasError::Api(error.to_string())
    }
}
