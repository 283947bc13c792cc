//! Error types for dispatch targets

use thiserror::Error;

/// A downstream action that did not complete.
///
/// Never propagated past the dispatcher: it is folded into the
/// [`ActionOutcome`](super::ActionOutcome) of the ticket.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The RPA bot refused or failed the job.
    #[error("RPA escalation failed: {0}")]
    EscalationFailed(String),

    /// Webhook answered with a non-2xx status.
    #[error("Escalation webhook returned {status}: {message}")]
    Webhook { status: u16, message: String },

    /// Webhook unreachable.
    #[error("Escalation webhook unreachable: {0}")]
    Network(String),

    #[error("Escalation webhook timed out after {0}ms")]
    Timeout(u64),
}
