//! Call DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use callrelay::{CallRequest, CallStatus, DomainError, StatusEvent};

/// Request to place an outbound call
///
/// A JSON object with a `phoneNumber` key; every other key is kept as a
/// variable for the agent's instructions.
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({"phoneNumber": "+15551234567", "firstName": "Ada"}))]
pub struct OutboundCallRequest(pub BTreeMap<String, Value>);

/// Outbound call accepted by the carrier
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutboundCallResponse {
    pub success: bool,
    /// Carrier call id, the key for later status callbacks
    pub call_sid: String,
}

/// Carrier status callback (form-encoded)
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct StatusCallbackForm {
    pub call_sid: Option<String>,
    pub call_status: Option<String>,
    pub call_duration: Option<String>,
    pub timestamp: Option<String>,
    pub recording_url: Option<String>,
}

impl OutboundCallRequest {
    pub fn into_domain(self) -> Result<CallRequest, DomainError> {
        let mut variables = self.0;
        let destination = match variables.remove("phoneNumber") {
            Some(Value::String(number)) => number,
            _ => String::new(),
        };

        let mut request = CallRequest::new(destination)?;
        request.variables = variables;
        Ok(request)
    }
}

impl StatusCallbackForm {
    pub fn into_event(self) -> Result<StatusEvent, DomainError> {
        let call_sid = self
            .call_sid
            .filter(|sid| !sid.trim().is_empty())
            .ok_or_else(|| DomainError::Validation("No CallSid received".to_string()))?;

        let status = CallStatus::parse(self.call_status.as_deref().unwrap_or_default());
        let mut event = StatusEvent::new(call_sid, status);

        // Unparseable durations are dropped, not rejected
        event.duration_seconds = self
            .call_duration
            .as_deref()
            .and_then(|d| d.trim().parse().ok());
        event.timestamp = self.timestamp.filter(|t| !t.is_empty());
        event.recording_url = self.recording_url.filter(|u| !u.is_empty());

        Ok(event)
    }
}
