//! Aggregated session configuration

use docqa_ingest::IngestConfig;
use docqa_query::QueryConfig;
use serde::{Deserialize, Serialize};

/// Default answering model, used when a request leaves the model empty
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// Configuration for one session
///
/// Aggregates the per-layer configs. The default model is a configuration
/// value, not mutable session state: each query request carries its model
/// explicitly and the default only fills in requests that leave it empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Model used when a query request does not name one
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Ingestion coordinator configuration
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Query router configuration
    #[serde(default)]
    pub query: QueryConfig,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl SessionConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.default_model.is_empty() {
            return Err("default_model must not be empty".to_string());
        }
        self.ingest.validate()?;
        self.query.validate()?;
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_model: DEFAULT_MODEL.to_string(),
            ingest: IngestConfig::default(),
            query: QueryConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_model_rejected() {
        let config = SessionConfig {
            default_model: String::new(),
            ..SessionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nested_validation_propagates() {
        let mut config = SessionConfig::default();
        config.ingest.concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SessionConfig::default();
        let parsed = SessionConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.default_model, DEFAULT_MODEL);
        assert_eq!(
            parsed.ingest.max_file_bytes,
            config.ingest.max_file_bytes
        );
        assert_eq!(
            parsed.query.max_context_chars,
            config.query.max_context_chars
        );
    }
}
