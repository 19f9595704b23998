//! Status Routes - Carrier lifecycle callbacks

use axum::{extract::State, http::StatusCode, routing::post, Form, Router};

use crate::models::StatusCallbackForm;
use crate::AppState;

/// Receive a carrier status callback
///
/// Acknowledged immediately; the post-call report, if any, is sent in
/// the background.
#[utoipa::path(
    post,
    path = "/call-status",
    request_body(content = StatusCallbackForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Callback acknowledged"),
        (status = 400, description = "No CallSid in callback")
    ),
    tag = "Status"
)]
pub async fn call_status(
    State(state): State<AppState>,
    Form(form): Form<StatusCallbackForm>,
) -> Result<StatusCode, (StatusCode, String)> {
    let event = form.into_event().map_err(|e| {
        tracing::warn!("Rejected status callback: {}", e);
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    // The receipt's task keeps running after it is dropped
    let _receipt = state.orchestrator.on_status_callback(event);

    Ok(StatusCode::OK)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/call-status", post(call_status))
}
