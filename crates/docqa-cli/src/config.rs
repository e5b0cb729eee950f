//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use docqa_session::SessionConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration, stored at `~/.docqa/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Answering API settings
    #[serde(default)]
    pub api: ApiSettings,

    /// Remote extraction service settings
    #[serde(default)]
    pub extraction: ExtractionSettings,

    /// Session (ingestion + query) settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Global CLI settings
    #[serde(default)]
    pub settings: Settings,
}

/// Answering API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the OpenAI-compatible chat API
    #[serde(default = "default_api_endpoint")]
    pub endpoint: String,

    /// API key; the OPENAI_API_KEY environment variable takes effect when
    /// this is unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Remote extraction service settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionSettings {
    /// Base URL of the extraction service; only text-native formats work
    /// without one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_api_endpoint() -> String {
    "https://api.openai.com".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            endpoint: default_api_endpoint(),
            api_key: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self { color: true }
    }
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".docqa").join("config.toml"))
    }

    /// Get the activity-log path, next to the configuration file.
    pub fn log_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".docqa").join("activity.jsonl"))
    }

    /// Load configuration from the given path, or the default path, falling
    /// back to defaults when no file exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&contents)?;
        config
            .session
            .validate()
            .map_err(CliError::Config)?;
        Ok(config)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Resolve the API key from the config or the environment.
    pub fn api_key(&self) -> Option<String> {
        self.api
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
    }
}
