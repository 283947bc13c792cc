//! Classifier configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// External classification service flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierProvider {
    /// Google Gemini `generateContent`
    #[default]
    Gemini,
    /// Any OpenAI-compatible `/v1/chat/completions` endpoint
    #[serde(alias = "openai-compatible")]
    OpenAI,
}

impl ClassifierProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierProvider::Gemini => "gemini",
            ClassifierProvider::OpenAI => "openai",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ClassifierProvider::Gemini => "https://generativelanguage.googleapis.com",
            ClassifierProvider::OpenAI => "https://api.openai.com",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ClassifierProvider::Gemini => "gemini-2.5-flash",
            ClassifierProvider::OpenAI => "gpt-4o-mini",
        }
    }

    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            ClassifierProvider::Gemini => "GEMINI_API_KEY",
            ClassifierProvider::OpenAI => "OPENAI_API_KEY",
        }
    }
}

impl FromStr for ClassifierProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" | "google" => Ok(ClassifierProvider::Gemini),
            "openai" | "openai-compatible" => Ok(ClassifierProvider::OpenAI),
            _ => Err(format!("Invalid classifier provider: {}", s)),
        }
    }
}

/// What the boundary does once the classifier has failed every attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Surface the external service error to the caller
    #[default]
    Reject,
    /// Route with registry defaults, explicitly ungrounded
    Degraded,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(FailurePolicy::Reject),
            "degraded" => Ok(FailurePolicy::Degraded),
            _ => Err(format!("Invalid failure policy: {}", s)),
        }
    }
}

/// Classifier configuration
///
/// `base_url`, `model` and `api_key_env` fall back to per-provider defaults
/// when unset, so switching `provider` alone is enough.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub provider: ClassifierProvider,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Name of the environment variable holding the API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    pub timeout_seconds: u64,
    pub temperature: f32,
    pub max_ticket_chars: usize,
    /// Additional attempts after the first failed classification call
    pub max_retries: u32,
    pub on_failure: FailurePolicy,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            provider: ClassifierProvider::Gemini,
            base_url: None,
            model: None,
            api_key_env: None,
            timeout_seconds: 30,
            temperature: 0.0,
            max_ticket_chars: 8000,
            max_retries: 1,
            on_failure: FailurePolicy::Reject,
        }
    }
}

impl ClassifierConfig {
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
    }

    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    pub fn api_key_env(&self) -> &str {
        self.api_key_env
            .as_deref()
            .unwrap_or_else(|| self.provider.default_api_key_env())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier_config_defaults() {
        let config = ClassifierConfig::default();
        assert_eq!(config.provider, ClassifierProvider::Gemini);
        assert_eq!(config.base_url(), "https://generativelanguage.googleapis.com");
        assert_eq!(config.model(), "gemini-2.5-flash");
        assert_eq!(config.api_key_env(), "GEMINI_API_KEY");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.max_ticket_chars, 8000);
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.on_failure, FailurePolicy::Reject);
    }

    #[test]
    fn test_provider_switch_changes_defaults() {
        let config = ClassifierConfig {
            provider: ClassifierProvider::OpenAI,
            ..Default::default()
        };
        assert_eq!(config.base_url(), "https://api.openai.com");
        assert_eq!(config.model(), "gpt-4o-mini");
        assert_eq!(config.api_key_env(), "OPENAI_API_KEY");
    }

    #[test]
    fn test_explicit_values_win() {
        let config: ClassifierConfig = toml::from_str(
            r#"
            provider = "openai"
            base_url = "http://localhost:11434"
            model = "llama3.2"
            on_failure = "degraded"
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url(), "http://localhost:11434");
        assert_eq!(config.model(), "llama3.2");
        assert_eq!(config.on_failure, FailurePolicy::Degraded);
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!(
            ClassifierProvider::from_str("Gemini").unwrap(),
            ClassifierProvider::Gemini
        );
        assert_eq!(
            ClassifierProvider::from_str("openai-compatible").unwrap(),
            ClassifierProvider::OpenAI
        );
        assert!(ClassifierProvider::from_str("anthropic").is_err());
    }

    #[test]
    fn test_failure_policy_from_str() {
        assert_eq!(FailurePolicy::from_str("DEGRADED").unwrap(), FailurePolicy::Degraded);
        assert!(FailurePolicy::from_str("retry").is_err());
    }
}
