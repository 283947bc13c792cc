//! Dispatch target configuration

use serde::{Deserialize, Serialize};

/// Dispatch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Make the simulated RPA escalation report failure (for drills and tests)
    pub simulate_escalation_failure: bool,
    /// POST escalations to this URL instead of the simulated RPA bot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation_webhook_url: Option<String>,
    pub webhook_timeout_seconds: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            simulate_escalation_failure: false,
            escalation_webhook_url: None,
            webhook_timeout_seconds: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_config_defaults() {
        let config = DispatchConfig::default();
        assert!(!config.simulate_escalation_failure);
        assert!(config.escalation_webhook_url.is_none());
        assert_eq!(config.webhook_timeout_seconds, 10);
    }
}
