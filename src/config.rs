use std::{fs, path::Path, time::Duration};

use serde::Deserialize;

use crate::{FlowcanvasError, Result};

/// Client configuration, loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// backend api base url
    pub api_base_url: String,
    /// request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// ai service config
    pub ai: AiConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// path of the generate-workflow endpoint, relative to the base url
    pub generate_path: String,
    /// path of the edit-workflow endpoint, relative to the base url
    pub edit_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000/api".to_string(),
            request_timeout_ms: 30_000,
            ai: AiConfig::default(),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            generate_path: "/ai/generate-workflow".to_string(),
            edit_path: "/ai/edit-workflow".to_string(),
        }
    }
}

impl Config {
    pub fn create<T: AsRef<Path>>(path: T) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref()).map_err(|e| FlowcanvasError::Config(format!("failed to load config file {:?}: {}", path.as_ref(), e)))?;
        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        toml::from_str::<Config>(toml_str).map_err(|e| FlowcanvasError::Config(format!("failed to parse the toml str: {e}")))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
