//! Triage endpoint handlers.

use super::{ApiError, AppState, InvokeRequest, InvokeResponse, TriageRequest};
use crate::engine::{TicketId, TriageResult};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

/// POST /v1/triage - Classify, route and dispatch one ticket.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TriageRequest>, JsonRejection>,
) -> Result<Json<TriageResult>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(&e.body_text()))?;
    let ticket_id = request
        .ticket_id
        .filter(|id| !id.trim().is_empty())
        .map(TicketId::from)
        .unwrap_or_else(TicketId::generate);

    let result = state
        .policy
        .submit(&state.engine, &request.ticket, ticket_id)
        .await?;
    Ok(Json(result))
}

/// POST /invoke - Same pipeline, earlier request/response shape.
pub async fn invoke(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<InvokeRequest>, JsonRejection>,
) -> Result<Json<InvokeResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(&e.body_text()))?;

    let result = state
        .policy
        .submit(&state.engine, &request.query, TicketId::generate())
        .await?;
    Ok(Json(InvokeResponse::from(&result)))
}
