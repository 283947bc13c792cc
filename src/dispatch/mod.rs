//! Action dispatcher.
//!
//! Executes the side effect for a finalized [`RoutingDecision`]. Targets
//! implement [`ActionTarget`]; the dispatcher picks one by branch and folds
//! any [`DispatchError`] into the returned [`ActionOutcome`], so the caller
//! always gets the decision back together with what happened downstream.

pub mod error;
pub mod targets;

pub use error::DispatchError;
pub use targets::{LedgerTarget, RpaEscalationTarget, WebhookEscalationTarget};

use crate::config::DispatchConfig;
use crate::engine::TicketId;
use crate::routing::{Branch, RoutingDecision};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Inputs handed to a target for one ticket.
#[derive(Debug, Clone, Copy)]
pub struct DispatchRequest<'a> {
    pub ticket_id: &'a TicketId,
    pub decision: &'a RoutingDecision,
}

impl<'a> DispatchRequest<'a> {
    pub fn new(ticket_id: &'a TicketId, decision: &'a RoutingDecision) -> Self {
        Self {
            ticket_id,
            decision,
        }
    }
}

/// A downstream handler for one branch.
#[async_trait]
pub trait ActionTarget: Send + Sync + 'static {
    /// Target tag reported in outcomes and metrics.
    fn name(&self) -> &'static str;

    /// Perform the action, returning a human-readable confirmation.
    async fn execute(&self, request: &DispatchRequest<'_>) -> Result<String, DispatchError>;
}

/// Result of the side effect for one ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub success: bool,
    pub target: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<DispatchErrorInfo>,
}

/// Serializable summary of a [`DispatchError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchErrorInfo {
    pub kind: &'static str,
    pub message: String,
}

impl From<&DispatchError> for DispatchErrorInfo {
    fn from(err: &DispatchError) -> Self {
        let kind = match err {
            DispatchError::EscalationFailed(_) => "escalation_failed",
            DispatchError::Webhook { .. } => "webhook_status",
            DispatchError::Network(_) => "network",
            DispatchError::Timeout(_) => "timeout",
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

/// Routes a finalized decision to its target.
#[derive(Clone)]
pub struct ActionDispatcher {
    ledger: Arc<dyn ActionTarget>,
    escalation: Arc<dyn ActionTarget>,
}

impl ActionDispatcher {
    pub fn new(ledger: Arc<dyn ActionTarget>, escalation: Arc<dyn ActionTarget>) -> Self {
        Self { ledger, escalation }
    }

    /// Build the configured targets: the ledger, plus the webhook when a URL
    /// is configured or the simulated RPA bot otherwise.
    pub fn from_config(config: &DispatchConfig, client: Arc<Client>) -> Self {
        let escalation: Arc<dyn ActionTarget> = match &config.escalation_webhook_url {
            Some(url) => Arc::new(WebhookEscalationTarget::new(
                url.clone(),
                Duration::from_secs(config.webhook_timeout_seconds),
                client,
            )),
            None => Arc::new(RpaEscalationTarget::new(config.simulate_escalation_failure)),
        };
        Self::new(Arc::new(LedgerTarget), escalation)
    }

    pub fn escalation_target(&self) -> &'static str {
        self.escalation.name()
    }

    /// Execute the side effect. Never fails; failures land in the outcome.
    pub async fn dispatch(&self, ticket_id: &TicketId, decision: &RoutingDecision) -> ActionOutcome {
        let target = match decision.branch() {
            Branch::StandardLogging => &self.ledger,
            Branch::CriticalEscalation => &self.escalation,
        };
        let request = DispatchRequest::new(ticket_id, decision);

        let outcome = match target.execute(&request).await {
            Ok(message) => ActionOutcome {
                success: true,
                target: target.name().to_string(),
                message,
                error: None,
            },
            Err(err) => {
                tracing::error!(
                    ticket_id = %ticket_id,
                    target = target.name(),
                    branch = %decision.branch(),
                    error = %err,
                    "dispatch failed"
                );
                ActionOutcome {
                    success: false,
                    target: target.name().to_string(),
                    message: err.to_string(),
                    error: Some(DispatchErrorInfo::from(&err)),
                }
            }
        };

        crate::metrics::record_dispatch(target.name(), outcome.success);
        outcome
    }
}
