//! Configuration for the ingestion coordinator

use docqa_domain::FileKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the ingestion coordinator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Hard cap on file size in bytes; larger files are rejected outright
    pub max_file_bytes: usize,

    /// Files above this size require explicit caller confirmation
    pub confirm_threshold_bytes: usize,

    /// Allowed file extensions (the supported-type allowlist)
    pub allowed_types: Vec<String>,

    /// Maximum time for a single extraction call (seconds)
    pub extract_timeout_secs: u64,

    /// Number of files extracted concurrently (1 = sequential)
    pub concurrency: usize,
}

impl IngestConfig {
    /// Get the extraction timeout as a Duration
    pub fn extract_timeout(&self) -> Duration {
        Duration::from_secs(self.extract_timeout_secs)
    }

    /// Whether the allowlist admits the given kind
    ///
    /// Legacy extensions map to their kind: a config allowing `docx` also
    /// admits `.doc` uploads.
    pub fn allows(&self, kind: FileKind) -> bool {
        self.allowed_types
            .iter()
            .any(|ext| FileKind::from_filename(&format!("f.{}", ext)) == Some(kind))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_file_bytes == 0 {
            return Err("max_file_bytes must be greater than 0".to_string());
        }
        if self.confirm_threshold_bytes > self.max_file_bytes {
            return Err("confirm_threshold_bytes cannot exceed max_file_bytes".to_string());
        }
        if self.extract_timeout_secs == 0 {
            return Err("extract_timeout_secs must be greater than 0".to_string());
        }
        if self.concurrency == 0 {
            return Err("concurrency must be at least 1".to_string());
        }
        for ext in &self.allowed_types {
            if FileKind::from_filename(&format!("f.{}", ext)).is_none() {
                return Err(format!("unknown file type in allowlist: '{}'", ext));
            }
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

impl Default for IngestConfig {
    /// Defaults mirroring the original uploader: full allowlist, 50 MB cap,
    /// 10 MB confirmation threshold, sequential processing
    fn default() -> Self {
        Self {
            max_file_bytes: 50 * 1024 * 1024,
            confirm_threshold_bytes: 10 * 1024 * 1024,
            allowed_types: FileKind::all()
                .iter()
                .map(|k| k.extension().to_string())
                .collect(),
            extract_timeout_secs: 120,
            concurrency: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = IngestConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_allowlist_covers_all_kinds() {
        let config = IngestConfig::default();
        for kind in FileKind::all() {
            assert!(config.allows(*kind), "allowlist should admit {}", kind);
        }
    }

    #[test]
    fn test_restricted_allowlist() {
        let config = IngestConfig {
            allowed_types: vec!["pdf".to_string(), "txt".to_string()],
            ..IngestConfig::default()
        };
        assert!(config.allows(FileKind::Pdf));
        assert!(config.allows(FileKind::Txt));
        assert!(!config.allows(FileKind::Docx));
    }

    #[test]
    fn test_invalid_threshold_above_cap() {
        let config = IngestConfig {
            max_file_bytes: 100,
            confirm_threshold_bytes: 200,
            ..IngestConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_allowlist_entry_rejected() {
        let config = IngestConfig {
            allowed_types: vec!["exe".to_string()],
            ..IngestConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = IngestConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = IngestConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.max_file_bytes, parsed.max_file_bytes);
        assert_eq!(config.confirm_threshold_bytes, parsed.confirm_threshold_bytes);
        assert_eq!(config.allowed_types, parsed.allowed_types);
        assert_eq!(config.concurrency, parsed.concurrency);
    }
}
