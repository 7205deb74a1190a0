//! AI generation service boundary.
//!
//! The generation service is a prompt-in/JSON-out black box. The trait is
//! the seam; the HTTP implementation talks to the backend's AI endpoints.

use async_trait::async_trait;
use serde::Deserialize;

use crate::{Result, config::Config, persist::checked};

/// Reply to a full-workflow generation request.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedWorkflow {
    /// JSON-encoded `{nodes, edges}` definition.
    #[serde(rename = "workflowDefinition")]
    pub workflow_definition: String,
}

/// Reply to an edit request over an existing workflow.
#[derive(Debug, Clone, Deserialize)]
pub struct EditedWorkflow {
    /// JSON-encoded `{nodes, edges}` definition.
    #[serde(rename = "updatedWorkflowJSON")]
    pub updated_workflow_json: String,
    /// Natural-language explanation surfaced to the user.
    #[serde(rename = "aiExplanation")]
    pub ai_explanation: String,
}

/// Prompt-in/JSON-out completion interface.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Generates a fresh workflow definition from a prompt.
    async fn generate(
        &self,
        prompt: &str,
    ) -> Result<GeneratedWorkflow>;

    /// Rewrites `current_workflow_json` according to `prompt`.
    async fn edit(
        &self,
        prompt: &str,
        current_workflow_json: &str,
    ) -> Result<EditedWorkflow>;
}

/// `reqwest`-backed implementation against the backend AI endpoints.
pub struct HttpGenerationService {
    client: reqwest::Client,
    generate_url: String,
    edit_url: String,
}

impl HttpGenerationService {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(config.request_timeout()).build().map_err(|e| crate::FlowcanvasError::Api(e.to_string()))?;
        let base = config.api_base_url.trim_end_matches('/');
        Ok(Self {
            client,
            generate_url: format!("{base}{}", config.ai.generate_path),
            edit_url: format!("{base}{}", config.ai.edit_path),
        })
    }
}

#[async_trait]
impl GenerationService for HttpGenerationService {
    async fn generate(
        &self,
        prompt: &str,
    ) -> Result<GeneratedWorkflow> {
        let body = serde_json::json!({ "promptText": prompt });
        let response = self.client.post(&self.generate_url).json(&body).send().await?;
        Ok(checked(response).await?.json().await?)
    }

    async fn edit(
        &self,
        prompt: &str,
        current_workflow_json: &str,
    ) -> Result<EditedWorkflow> {
        let body = serde_json::json!({
            "userPrompt": prompt,
            "currentWorkflowJSON": current_workflow_json,
        });
        let response = self.client.post(&self.edit_url).json(&body).send().await?;
        Ok(checked(response).await?.json().await?)
    }
}
