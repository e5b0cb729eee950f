//! Configuration for the query router

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the query router
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Total context budget in characters
    pub max_context_chars: usize,

    /// Hard ceiling for a mid-page cut when a single page alone exceeds
    /// the context budget
    pub page_overflow_ceiling: usize,

    /// Maximum time for a single answering call (seconds)
    pub answer_timeout_secs: u64,
}

impl QueryConfig {
    /// Get the answering timeout as a Duration
    pub fn answer_timeout(&self) -> Duration {
        Duration::from_secs(self.answer_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_context_chars == 0 {
            return Err("max_context_chars must be greater than 0".to_string());
        }
        if self.page_overflow_ceiling == 0 {
            return Err("page_overflow_ceiling must be greater than 0".to_string());
        }
        if self.answer_timeout_secs == 0 {
            return Err("answer_timeout_secs must be greater than 0".to_string());
        }
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

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_context_chars: 200_000,
            page_overflow_ceiling: 50_000,
            answer_timeout_secs: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(QueryConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_budget_rejected() {
        let config = QueryConfig {
            max_context_chars: 0,
            ..QueryConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = QueryConfig {
            max_context_chars: 1234,
            page_overflow_ceiling: 567,
            answer_timeout_secs: 30,
        };
        let parsed = QueryConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.max_context_chars, 1234);
        assert_eq!(parsed.page_overflow_ceiling, 567);
        assert_eq!(parsed.answer_timeout_secs, 30);
    }
}
