//! AI reconciliation adapter.
//!
//! Takes an externally proposed full-graph replacement, validates its
//! shape, re-applies the styling invariant to every node, and hands the
//! result back as a proposal the editor commits as one undoable entry.
//! The user always gets a response: a reply that cannot be applied
//! degrades to the unchanged input graph plus an explanation.

mod handoff;
mod service;

use serde_json::Value;
use tracing::{debug, warn};

pub use handoff::HandoffSlot;
pub use service::{EditedWorkflow, GeneratedWorkflow, GenerationService, HttpGenerationService};

use crate::{
    FlowcanvasError, Result,
    model::Graph,
    persist::{WorkflowDefinition, from_wire, to_wire},
};

/// One request/response pair in the session transcript.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub instruction: String,
    pub explanation: String,
    pub accepted: bool,
}

/// Outcome of a reconciliation pass over an assistant reply.
///
/// `accepted` is false when the reply could not be applied; the carried
/// graph is then the unchanged input.
#[derive(Debug, Clone)]
pub struct Proposal {
    pub graph: Graph,
    pub explanation: String,
    pub accepted: bool,
}

/// Session-scoped conversation over one workflow graph.
///
/// The transcript is append-only and never persisted; it exists only for
/// the duration of the editor session.
pub struct Assistant<S: GenerationService> {
    service: S,
    transcript: Vec<Exchange>,
}

impl<S: GenerationService> Assistant<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            transcript: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &[Exchange] {
        &self.transcript
    }

    /// Dropped when the canvas is reset along with the rest of the panel
    /// state.
    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
    }

    /// Asks the service to rewrite `current` per `instruction` and
    /// reconciles the reply.
    ///
    /// Never fails hard: transport errors, unparseable JSON, and
    /// wrong-shape replies all yield a rejected proposal carrying the
    /// unchanged input graph and a human-readable explanation.
    pub async fn propose(
        &mut self,
        instruction: &str,
        current: &Graph,
    ) -> Proposal {
        let proposal = match self.request(instruction, current).await {
            Ok(proposal) => proposal,
            Err(err) => {
                warn!(error = %err, "assistant reply rejected");
                Proposal {
                    graph: current.clone(),
                    explanation: format!("I couldn't apply that change: {err}. The workflow was left as it was."),
                    accepted: false,
                }
            }
        };
        self.transcript.push(Exchange {
            instruction: instruction.to_string(),
            explanation: proposal.explanation.clone(),
            accepted: proposal.accepted,
        });
        proposal
    }

    /// Generates a brand-new workflow from a prompt. There is no current
    /// graph to fall back to here, so failures surface as errors for the
    /// caller to show as a notification.
    pub async fn generate(
        &self,
        prompt: &str,
    ) -> Result<Graph> {
        let reply = self.service.generate(prompt).await?;
        reconcile(&reply.workflow_definition)
    }

    async fn request(
        &self,
        instruction: &str,
        current: &Graph,
    ) -> Result<Proposal> {
        let current_json = serde_json::to_string(&to_wire(current))?;
        let reply = self.service.edit(instruction, &current_json).await?;
        let graph = reconcile(&reply.updated_workflow_json)?;
        debug!(nodes = graph.nodes.len(), edges = graph.edges.len(), "assistant proposal reconciled");
        Ok(Proposal {
            graph,
            explanation: reply.ai_explanation,
            accepted: true,
        })
    }
}

/// Parses and re-validates an externally supplied workflow definition.
///
/// The reply must be a JSON object with `nodes` and `edges` arrays; every
/// node is then re-themed so the styling invariant holds regardless of what
/// the service proposed.
pub fn reconcile(definition_json: &str) -> Result<Graph> {
    let value: Value = serde_json::from_str(definition_json).map_err(|e| FlowcanvasError::Assistant(format!("the reply is not valid JSON ({e})")))?;
    jsonschema::validate(&definition_schema(), &value).map_err(|e| FlowcanvasError::Assistant(format!("the reply is not a workflow definition ({e})")))?;
    let definition: WorkflowDefinition = serde_json::from_value(value).map_err(|e| FlowcanvasError::Assistant(format!("the reply did not match the wire format ({e})")))?;
    Ok(from_wire(definition))
}

fn definition_schema() -> Value {
    serde_json::json!({
        "type": "object",
        "required": ["nodes", "edges"],
        "properties": {
            "nodes": { "type": "array" },
            "edges": { "type": "array" }
        }
    })
}
