//! Grounding instruction and response schema for classification calls.

use super::types::ClassificationPrompt;
use crate::taxonomy::{Category, TaxonomyRegistry};
use serde_json::{json, Value};

impl ClassificationPrompt {
    /// Build the prompt for one ticket from the live registry.
    pub fn build(registry: &TaxonomyRegistry, ticket_text: &str) -> Self {
        let owned = |category| -> Vec<String> {
            registry
                .members(category)
                .iter()
                .map(|m| m.to_string())
                .collect()
        };
        let departments = owned(Category::Department);
        let severities = owned(Category::Severity);
        let actions = owned(Category::ActionType);

        let system_instruction = format!(
            "You are an expert support-ticket triage agent. Classify the ticket you are given \
             and reply with a single JSON object with the keys \"department\", \"severity\", \
             \"action\" and \"rationale\".\n\
             - department MUST be exactly one of: {}.\n\
             - severity MUST be exactly one of: {}. Use Critical only when business operations \
             are stopped or data is being lost.\n\
             - action MUST be exactly one of: {}.\n\
             - rationale is one short sentence explaining the choice.\n\
             Do not invent values outside these lists. Reply with JSON only.",
            departments.join(", "),
            severities.join(", "),
            actions.join(", "),
        );

        Self {
            system_instruction,
            ticket_text: ticket_text.to_string(),
            departments,
            severities,
            actions,
        }
    }

    /// Gemini `responseSchema` constraining the reply to the member lists.
    pub fn response_schema(&self) -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "department": { "type": "STRING", "enum": self.departments },
                "severity": { "type": "STRING", "enum": self.severities },
                "action": { "type": "STRING", "enum": self.actions },
                "rationale": { "type": "STRING" }
            },
            "required": ["department", "severity", "action"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_enumerates_live_members() {
        let prompt = ClassificationPrompt::build(&TaxonomyRegistry::default(), "printer broken");

        assert!(prompt
            .system_instruction
            .contains("Finance, Sales, IT, HR, Facilities"));
        assert!(prompt
            .system_instruction
            .contains("Low, Medium, High, Critical"));
        assert!(prompt
            .system_instruction
            .contains("InformationRequest, ServiceRequest, IncidentReport, Other"));
        assert_eq!(prompt.ticket_text, "printer broken");
    }

    #[test]
    fn test_response_schema_enums_match_members() {
        let prompt = ClassificationPrompt::build(&TaxonomyRegistry::default(), "x");
        let schema = prompt.response_schema();

        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(
            schema["properties"]["severity"]["enum"],
            json!(["Low", "Medium", "High", "Critical"])
        );
        assert_eq!(schema["properties"]["department"]["enum"][0], "Finance");
        assert_eq!(schema["required"].as_array().map(Vec::len), Some(3));
    }
}
