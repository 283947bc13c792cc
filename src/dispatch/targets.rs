//! Concrete dispatch targets.

use super::{ActionTarget, DispatchError, DispatchRequest};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Routine handling: one structured event on the `triage::ledger` target.
///
/// Stands in for the team spreadsheet; always succeeds.
pub struct LedgerTarget;

#[async_trait]
impl ActionTarget for LedgerTarget {
    fn name(&self) -> &'static str {
        "ledger"
    }

    async fn execute(&self, request: &DispatchRequest<'_>) -> Result<String, DispatchError> {
        let c = request.decision.classification();
        tracing::info!(
            target: "triage::ledger",
            ticket_id = %request.ticket_id,
            department = %c.department(),
            severity = %c.severity(),
            action = %c.action(),
            grounded = c.grounded(),
            reason_code = %request.decision.reason_code(),
            "ticket logged"
        );
        Ok(format!(
            "Ticket {} logged for {} team. Severity: {}. Action: {}",
            request.ticket_id,
            c.department(),
            c.severity(),
            c.action()
        ))
    }
}

/// Urgent handling: simulated RPA bot trigger.
pub struct RpaEscalationTarget {
    simulate_failure: bool,
}

impl RpaEscalationTarget {
    pub fn new(simulate_failure: bool) -> Self {
        Self { simulate_failure }
    }
}

#[async_trait]
impl ActionTarget for RpaEscalationTarget {
    fn name(&self) -> &'static str {
        "rpa_escalation"
    }

    async fn execute(&self, request: &DispatchRequest<'_>) -> Result<String, DispatchError> {
        let c = request.decision.classification();
        if self.simulate_failure {
            return Err(DispatchError::EscalationFailed(format!(
                "RPA bot unavailable for ticket {}",
                request.ticket_id
            )));
        }

        tracing::warn!(
            ticket_id = %request.ticket_id,
            department = %c.department(),
            severity = %c.severity(),
            reason_code = %request.decision.reason_code(),
            "critical ticket escalated to RPA"
        );
        Ok(format!(
            "CRITICAL TICKET ESCALATED! Triggering RPA bot for Department: {}. Severity: {}. Action: {}",
            c.department(),
            c.severity(),
            c.action()
        ))
    }
}

/// Urgent handling through an HTTP endpoint owned by the RPA platform.
pub struct WebhookEscalationTarget {
    url: String,
    timeout: Duration,
    client: Arc<Client>,
}

#[derive(Serialize)]
struct EscalationPayload<'a> {
    ticket_id: &'a str,
    department: &'static str,
    severity: &'static str,
    action: &'static str,
    reason_code: &'static str,
    grounded: bool,
    rationale: &'a str,
}

impl WebhookEscalationTarget {
    pub fn new(url: String, timeout: Duration, client: Arc<Client>) -> Self {
        Self {
            url,
            timeout,
            client,
        }
    }
}

#[async_trait]
impl ActionTarget for WebhookEscalationTarget {
    fn name(&self) -> &'static str {
        "webhook_escalation"
    }

    async fn execute(&self, request: &DispatchRequest<'_>) -> Result<String, DispatchError> {
        use crate::taxonomy::Member;

        let c = request.decision.classification();
        let payload = EscalationPayload {
            ticket_id: request.ticket_id.as_str(),
            department: c.department().as_str(),
            severity: c.severity().as_str(),
            action: c.action().as_str(),
            reason_code: request.decision.reason_code().as_str(),
            grounded: c.grounded(),
            rationale: c.rationale(),
        };
        let timeout_ms = self.timeout.as_millis() as u64;

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DispatchError::Timeout(timeout_ms)
                } else {
                    DispatchError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DispatchError::Webhook {
                status: status.as_u16(),
                message,
            });
        }

        Ok(format!(
            "CRITICAL TICKET ESCALATED! RPA webhook accepted ticket {} for Department: {}. Severity: {}. Action: {}",
            request.ticket_id,
            c.department(),
            c.severity(),
            c.action()
        ))
    }
}
