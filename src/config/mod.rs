//! Configuration module for the triage service
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`TRIAGE_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use triage::config::TriageConfig;
//!
//! let config = TriageConfig::default();
//! assert_eq!(config.server.port, 8000);
//!
//! let toml = r#"
//! [classifier]
//! provider = "openai"
//! model = "gpt-4o-mini"
//! "#;
//! let config: TriageConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.classifier.model(), "gpt-4o-mini");
//! ```

pub mod classifier;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod server;
pub mod taxonomy;

pub use classifier::{ClassifierConfig, ClassifierProvider, FailurePolicy};
pub use dispatch::DispatchConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use taxonomy::TaxonomyConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Bundled example configuration, written by `triage config init`.
pub const EXAMPLE_CONFIG: &str = include_str!("../../triage.example.toml");

/// Unified configuration for the triage service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TriageConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// External classification service
    pub classifier: ClassifierConfig,
    /// Fallback members used by grounding
    pub taxonomy: TaxonomyConfig,
    /// Downstream action targets
    pub dispatch: DispatchConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl TriageConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports TRIAGE_* environment variables for common settings.
    /// Invalid values are ignored (the previous value is kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("TRIAGE_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("TRIAGE_HOST") {
            self.server.host = host;
        }

        if let Ok(level) = std::env::var("TRIAGE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("TRIAGE_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(provider) = std::env::var("TRIAGE_CLASSIFIER_PROVIDER") {
            if let Ok(p) = provider.parse() {
                self.classifier.provider = p;
            }
        }
        if let Ok(url) = std::env::var("TRIAGE_CLASSIFIER_URL") {
            self.classifier.base_url = Some(url);
        }
        if let Ok(model) = std::env::var("TRIAGE_CLASSIFIER_MODEL") {
            self.classifier.model = Some(model);
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::invalid("server.port", "port must be non-zero"));
        }
        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "server.request_timeout_seconds",
                "timeout must be non-zero",
            ));
        }

        if self.classifier.base_url().trim().is_empty() {
            return Err(ConfigError::invalid(
                "classifier.base_url",
                "URL cannot be empty",
            ));
        }
        if self.classifier.model().trim().is_empty() {
            return Err(ConfigError::invalid("classifier.model", "model cannot be empty"));
        }
        if self.classifier.timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "classifier.timeout_seconds",
                "timeout must be non-zero",
            ));
        }
        if self.classifier.max_ticket_chars == 0 {
            return Err(ConfigError::invalid(
                "classifier.max_ticket_chars",
                "limit must be non-zero",
            ));
        }
        if !(0.0..=2.0).contains(&self.classifier.temperature) {
            return Err(ConfigError::invalid(
                "classifier.temperature",
                "temperature must be between 0.0 and 2.0",
            ));
        }

        if let Some(url) = &self.dispatch.escalation_webhook_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::invalid(
                    "dispatch.escalation_webhook_url",
                    "URL must start with http:// or https://",
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::{Department, Severity};
    use std::path::Path;

    #[test]
    fn test_triage_config_defaults() {
        let config = TriageConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.classifier.provider, ClassifierProvider::Gemini);
        assert_eq!(config.taxonomy.default_department, Department::IT);
        assert_eq!(config.taxonomy.default_severity, Severity::Medium);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parse_minimal_toml() {
        let toml = r#"
        [server]
        port = 9000
        "#;

        let config: TriageConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.classifier.max_retries, 1);
    }

    #[test]
    fn test_config_parse_example_toml() {
        let config: TriageConfig = toml::from_str(EXAMPLE_CONFIG).unwrap();
        assert!(config.server.port > 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_from_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[classifier]\ntimeout_seconds = 5").unwrap();

        let config = TriageConfig::load(Some(temp.path())).unwrap();
        assert_eq!(config.classifier.timeout_seconds, 5);
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[server\nport = ").unwrap();

        let result = TriageConfig::load(Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_missing_file_error() {
        let result = TriageConfig::load(Some(Path::new("/nonexistent/triage.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_config_load_none_returns_defaults() {
        let config = TriageConfig::load(None).unwrap();
        assert_eq!(config.server.port, 8000);
    }

    // Env override tests share process-wide variables; each uses its own.
    #[test]
    fn test_config_env_override_port() {
        std::env::set_var("TRIAGE_PORT", "9999");
        let config = TriageConfig::default().with_env_overrides();
        std::env::remove_var("TRIAGE_PORT");

        assert_eq!(config.server.port, 9999);
    }

    #[test]
    fn test_config_env_override_classifier() {
        std::env::set_var("TRIAGE_CLASSIFIER_PROVIDER", "openai");
        std::env::set_var("TRIAGE_CLASSIFIER_URL", "http://localhost:8001");
        std::env::set_var("TRIAGE_CLASSIFIER_MODEL", "qwen2.5");
        let config = TriageConfig::default().with_env_overrides();
        std::env::remove_var("TRIAGE_CLASSIFIER_PROVIDER");
        std::env::remove_var("TRIAGE_CLASSIFIER_URL");
        std::env::remove_var("TRIAGE_CLASSIFIER_MODEL");

        assert_eq!(config.classifier.provider, ClassifierProvider::OpenAI);
        assert_eq!(config.classifier.base_url(), "http://localhost:8001");
        assert_eq!(config.classifier.model(), "qwen2.5");
    }

    #[test]
    fn test_config_env_invalid_value_ignored() {
        std::env::set_var("TRIAGE_LOG_FORMAT", "xml");
        let config = TriageConfig::default().with_env_overrides();
        std::env::remove_var("TRIAGE_LOG_FORMAT");

        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_config_validation_zero_port() {
        let mut config = TriageConfig::default();
        config.server.port = 0;

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "server.port"
        ));
    }

    #[test]
    fn test_config_validation_empty_model() {
        let mut config = TriageConfig::default();
        config.classifier.model = Some("  ".to_string());

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "classifier.model"
        ));
    }

    #[test]
    fn test_config_validation_empty_base_url() {
        let mut config = TriageConfig::default();
        config.classifier.base_url = Some(String::new());

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "classifier.base_url"
        ));
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let mut config = TriageConfig::default();
        config.classifier.timeout_seconds = 0;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "classifier.timeout_seconds"
        ));
    }

    #[test]
    fn test_config_validation_webhook_scheme() {
        let mut config = TriageConfig::default();
        config.dispatch.escalation_webhook_url = Some("ftp://rpa.local/hook".to_string());

        assert!(config.validate().is_err());
    }
}
