//! Request and reply types shared by all classifier implementations.

use serde::{Deserialize, Serialize};

/// Untrusted classification as returned by the external service.
///
/// Every field is free text. Nothing downstream acts on these values until
/// the grounding validator has mapped them into the taxonomy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawClassification {
    pub department_raw: String,
    pub severity_raw: String,
    pub action_raw: String,
    /// Advisory explanation; empty when the service omitted it.
    #[serde(default)]
    pub rationale: String,
}

impl RawClassification {
    pub fn new(
        department_raw: impl Into<String>,
        severity_raw: impl Into<String>,
        action_raw: impl Into<String>,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            department_raw: department_raw.into(),
            severity_raw: severity_raw.into(),
            action_raw: action_raw.into(),
            rationale: rationale.into(),
        }
    }
}

/// Everything a provider needs to issue one classification call.
///
/// Built fresh per ticket from the live taxonomy registry, so the member
/// lists always reflect what the validator will accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationPrompt {
    /// Grounding instruction listing the allowed members.
    pub system_instruction: String,
    /// Trimmed ticket text.
    pub ticket_text: String,
    pub departments: Vec<String>,
    pub severities: Vec<String>,
    pub actions: Vec<String>,
}
