//! Backend workflow API client.
//!
//! Async client for the workflow persistence endpoints. The graph model is
//! never mutated while a request is in flight; a save either binds the
//! returned identity or surfaces an error, all-or-nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    FlowcanvasError, Result,
    canvas::CanvasEditor,
    config::Config,
    persist::{WorkflowDefinition, to_wire},
};

/// A workflow as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRecord {
    pub id: String,
    pub name: String,
    pub status: String,
    pub definition: WorkflowDefinition,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct CreateWorkflow<'a> {
    name: &'a str,
    definition: &'a WorkflowDefinition,
}

#[derive(Serialize)]
struct UpdateWorkflow<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    definition: Option<&'a WorkflowDefinition>,
}

/// Client for `{base}/workflows` endpoints.
pub struct WorkflowApi {
    client: reqwest::Client,
    base_url: String,
}

impl WorkflowApi {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(config.request_timeout()).build().map_err(|e| FlowcanvasError::Api(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn list(&self) -> Result<Vec<WorkflowRecord>> {
        let response = self.client.get(format!("{}/workflows", self.base_url)).send().await?;
        Ok(checked(response).await?.json().await?)
    }

    pub async fn get(
        &self,
        id: &str,
    ) -> Result<WorkflowRecord> {
        let response = self.client.get(format!("{}/workflows/{id}", self.base_url)).send().await?;
        Ok(checked(response).await?.json().await?)
    }

    pub async fn create(
        &self,
        name: &str,
        definition: &WorkflowDefinition,
    ) -> Result<WorkflowRecord> {
        let body = CreateWorkflow { name, definition };
        let response = self.client.post(format!("{}/workflows", self.base_url)).json(&body).send().await?;
        Ok(checked(response).await?.json().await?)
    }

    pub async fn update(
        &self,
        id: &str,
        name: Option<&str>,
        definition: Option<&WorkflowDefinition>,
    ) -> Result<WorkflowRecord> {
        let body = UpdateWorkflow { name, definition };
        let response = self.client.put(format!("{}/workflows/{id}", self.base_url)).json(&body).send().await?;
        Ok(checked(response).await?.json().await?)
    }

    pub async fn delete(
        &self,
        id: &str,
    ) -> Result<()> {
        let response = self.client.delete(format!("{}/workflows/{id}", self.base_url)).send().await?;
        checked(response).await?;
        Ok(())
    }

    /// Saves the editor's graph. An editor bound to a server identity is
    /// updated in place; an unbound one is created and bound to the
    /// returned id.
    pub async fn save(
        &self,
        editor: &mut CanvasEditor,
        name: &str,
    ) -> Result<WorkflowRecord> {
        let definition = to_wire(editor.graph());
        let record = match editor.workflow_id() {
            Some(id) => {
                debug!(workflow = %id, "update workflow");
                self.update(id, Some(name), Some(&definition)).await?
            }
            None => {
                debug!(%name, "create workflow");
                self.create(name, &definition).await?
            }
        };
        editor.bind_workflow(record.id.clone());
        Ok(record)
    }
}

/// Maps a non-success response to an `Api` error, preferring the backend's
/// `detail` message when the body carries one.
pub(crate) async fn checked(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    #[derive(Deserialize)]
    struct ErrorBody {
        detail: Option<String>,
    }

    let status = response.status();
    let detail = response.json::<ErrorBody>().await.ok().and_then(|body| body.detail);
    Err(FlowcanvasError::Api(detail.unwrap_or_else(|| format!("request failed with status {status}"))))
}
