//! Ticket id generation

use uuid::Uuid;

/// Generate a ticket id for submissions that arrive without one.
///
/// ```
/// use triage::logging::generate_ticket_id;
///
/// assert_eq!(generate_ticket_id().len(), 36);
/// ```
pub fn generate_ticket_id() -> String {
    Uuid::new_v4().to_string()
}
