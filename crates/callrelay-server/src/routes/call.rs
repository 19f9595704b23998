//! Call Routes - Outbound call initiation

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use callrelay::DomainError;

use crate::models::{OutboundCallRequest, OutboundCallResponse};
use crate::AppState;

/// Place an outbound call bridged to a new voice session
#[utoipa::path(
    post,
    path = "/outbound-call",
    request_body = OutboundCallRequest,
    responses(
        (status = 200, description = "Call placed", body = OutboundCallResponse),
        (status = 400, description = "Phone number missing"),
        (status = 502, description = "Voice provider or carrier rejected the call")
    ),
    tag = "Call"
)]
pub async fn outbound_call(
    State(state): State<AppState>,
    Json(payload): Json<OutboundCallRequest>,
) -> Result<Json<OutboundCallResponse>, (StatusCode, String)> {
    let request = payload
        .into_domain()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let call_sid = state
        .orchestrator
        .initiate_call(request)
        .await
        .map_err(|e| match e {
            DomainError::Validation(_) => (StatusCode::BAD_REQUEST, e.to_string()),
            _ => (StatusCode::BAD_GATEWAY, e.to_string()),
        })?;

    Ok(Json(OutboundCallResponse {
        success: true,
        call_sid,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/outbound-call", post(outbound_call))
}
