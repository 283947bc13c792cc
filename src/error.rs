//! Errors returned by the triage pipeline to its caller.

use crate::classifier::ClassifierError;
use crate::routing::IllegalTransition;
use thiserror::Error;

/// Malformed caller input. Reported before any processing happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Ticket text is empty after trimming whitespace.
    #[error("empty_ticket")]
    EmptyTicket,

    /// Ticket text exceeds the configured character limit.
    #[error("ticket_too_long ({length} > {max} characters)")]
    TicketTooLong { length: usize, max: usize },
}

impl ValidationError {
    /// Machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyTicket => "empty_ticket",
            ValidationError::TicketTooLong { .. } => "ticket_too_long",
        }
    }
}

/// Failure to produce a [`TriageResult`](crate::engine::TriageResult).
///
/// Dispatch failures are not in here: they are reported inside the result,
/// next to the routing decision that already stands.
#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The classification service failed or replied with something that
    /// could not be parsed into the three raw fields.
    #[error("External service error: {0}")]
    ExternalService(#[from] ClassifierError),

    /// Lifecycle invariant broken. The engine drives states in order, so
    /// this indicates a bug rather than bad input.
    #[error("Internal error: {0}")]
    Internal(#[from] IllegalTransition),
}

impl TriageError {
    /// Short tag for logs and metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            TriageError::Validation(e) => e.code(),
            TriageError::ExternalService(e) => e.error_type(),
            TriageError::Internal(_) => "internal",
        }
    }
}
