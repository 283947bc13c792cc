//! Tolerant parsing of a classifier reply into a [`RawClassification`].
//!
//! Models wrap JSON in code fences, capitalize keys, or use the field names
//! from older prompts (`Action_Required`). None of that is a grounding
//! concern, so it is normalized here. Values are passed through untouched.

use super::{ClassifierError, RawClassification};
use crate::grounding::compact;
use serde_json::{Map, Value};

const DEPARTMENT_KEYS: &[&str] = &["department", "dept", "team"];
const SEVERITY_KEYS: &[&str] = &["severity", "urgency", "priority"];
const ACTION_KEYS: &[&str] = &["action", "actionrequired", "actiontype", "requiredaction"];
const RATIONALE_KEYS: &[&str] = &["rationale", "reason", "reasoning", "explanation"];

/// Parse the text body of a classifier reply.
pub fn parse_classification(text: &str) -> Result<RawClassification, ClassifierError> {
    let body = json_body(text)
        .ok_or_else(|| ClassifierError::InvalidResponse("reply contains no JSON object".into()))?;

    let value: Value = serde_json::from_str(body).map_err(|e| {
        ClassifierError::InvalidResponse(format!("Failed to parse classification JSON: {}", e))
    })?;

    let object = match value {
        Value::Object(map) => map,
        other => {
            return Err(ClassifierError::InvalidResponse(format!(
                "expected a JSON object, got {}",
                kind_of(&other)
            )))
        }
    };

    let department = required(&object, DEPARTMENT_KEYS, "department")?;
    let severity = required(&object, SEVERITY_KEYS, "severity")?;
    let action = required(&object, ACTION_KEYS, "action")?;
    let rationale = lookup(&object, RATIONALE_KEYS).unwrap_or_default();

    Ok(RawClassification::new(department, severity, action, rationale))
}

/// Strip code fences and surrounding commentary, leaving the outermost
/// `{ ... }` span.
fn json_body(text: &str) -> Option<&str> {
    let mut body = text.trim();
    if let Some(rest) = body.strip_prefix("```") {
        // the info string (```json) carries no braces, so the scan below skips it
        body = rest.trim_end().trim_end_matches("```");
    }
    let start = body.find('{')?;
    let end = body.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&body[start..=end])
}

fn required(
    object: &Map<String, Value>,
    keys: &[&str],
    field: &str,
) -> Result<String, ClassifierError> {
    lookup(object, keys)
        .ok_or_else(|| ClassifierError::InvalidResponse(format!("missing field '{}'", field)))
}

fn lookup(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    object
        .iter()
        .find(|(k, _)| keys.contains(&compact(k).as_str()))
        .and_then(|(_, v)| match v {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
