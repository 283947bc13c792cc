//! Request/response bodies and the error envelope for the HTTP API.

use crate::classifier::ClassifierError;
use crate::engine::TriageResult;
use crate::error::TriageError;
use crate::taxonomy::Member;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// POST /v1/triage body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TriageRequest {
    pub ticket: String,
    /// Caller-assigned id; a UUID is generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<String>,
}

/// POST /invoke body, kept for clients of the earlier single-endpoint API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InvokeRequest {
    /// A missing `query` is treated as an empty ticket.
    #[serde(default)]
    pub query: String,
}

/// POST /invoke response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InvokeResponse {
    /// Message from the dispatched action.
    pub final_result: String,
    pub severity: String,
    pub classification_details: ClassificationDetails,
}

/// Classification in the key style of the earlier API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassificationDetails {
    #[serde(rename = "Severity")]
    pub severity: String,
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Action_Required")]
    pub action_required: String,
    pub grounded: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rationale: String,
}

impl From<&TriageResult> for InvokeResponse {
    fn from(result: &TriageResult) -> Self {
        let c = result.classification();
        Self {
            final_result: result.action_outcome.message.clone(),
            severity: c.severity().as_str().to_string(),
            classification_details: ClassificationDetails {
                severity: c.severity().as_str().to_string(),
                department: c.department().as_str().to_string(),
                action_required: c.action().as_str().to_string(),
                grounded: c.grounded(),
                rationale: c.rationale().to_string(),
            },
        }
    }
}

/// Error envelope: `{"error": {message, type, param, code}}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
    pub r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiError {
    fn new(message: String, r#type: &str, param: Option<&str>, code: &str) -> Self {
        Self {
            error: ApiErrorBody {
                message,
                r#type: r#type.to_string(),
                param: param.map(str::to_string),
                code: Some(code.to_string()),
            },
        }
    }

    /// Create a bad request error (400).
    pub fn bad_request(message: &str) -> Self {
        Self::new(
            message.to_string(),
            "invalid_request_error",
            None,
            "invalid_request_error",
        )
    }

    /// Create a bad gateway error (502).
    pub fn bad_gateway(message: &str) -> Self {
        Self::new(message.to_string(), "server_error", None, "bad_gateway")
    }

    /// Create a gateway timeout error (504).
    pub fn gateway_timeout(message: &str) -> Self {
        Self::new(message.to_string(), "server_error", None, "gateway_timeout")
    }

    /// Create an internal error (500).
    pub fn internal(message: &str) -> Self {
        Self::new(message.to_string(), "server_error", None, "internal_error")
    }

    /// Get the HTTP status code for this error.
    fn status_code(&self) -> StatusCode {
        if self.error.r#type == "invalid_request_error" {
            return StatusCode::BAD_REQUEST;
        }
        match self.error.code.as_deref() {
            Some("bad_gateway") => StatusCode::BAD_GATEWAY,
            Some("gateway_timeout") => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TriageError> for ApiError {
    fn from(err: TriageError) -> Self {
        match &err {
            TriageError::Validation(v) => Self::new(
                err.to_string(),
                "invalid_request_error",
                Some("ticket"),
                v.code(),
            ),
            TriageError::ExternalService(ClassifierError::Timeout(_)) => {
                Self::gateway_timeout(&err.to_string())
            }
            TriageError::ExternalService(_) => Self::bad_gateway(&err.to_string()),
            TriageError::Internal(_) => Self::internal(&err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
