//! Call - Outbound call request and its provider session
//!
//! Pure domain entities without infrastructure dependencies.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::errors::DomainError;

/// CallRequest - A user-initiated request to place an outbound call
///
/// On the wire this is the inbound JSON body: `phoneNumber` plus any
/// number of free-form variables that are substituted into the agent's
/// instructions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRequest {
    #[serde(rename = "phoneNumber")]
    pub destination: String,
    #[serde(flatten)]
    pub variables: BTreeMap<String, Value>,
}

impl CallRequest {
    /// Create a request for the given destination number
    pub fn new(destination: impl Into<String>) -> Result<Self, DomainError> {
        let destination = destination.into();
        if destination.trim().is_empty() {
            return Err(DomainError::Validation(
                "Phone number is required".to_string(),
            ));
        }
        Ok(Self {
            destination,
            variables: BTreeMap::new(),
        })
    }

    /// Add a variable binding
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Text substituted for `{name}` in the agent's instructions
    ///
    /// Missing or falsy values (null, empty string, `false`, `0`) render as
    /// `[no <name> provided]`.
    pub fn variable_text(&self, name: &str) -> String {
        let missing = || format!("[no {} provided]", name);
        match self.variables.get(name) {
            None | Some(Value::Null) | Some(Value::Bool(false)) => missing(),
            Some(Value::String(s)) if s.is_empty() => missing(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => missing(),
            Some(other) => other.to_string(),
        }
    }
}

/// CallSession - The voice provider's session for one call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallSession {
    pub provider_call_id: String,
    /// URL the carrier bridges the phone leg to
    pub join_target: String,
    pub created_at: DateTime<Utc>,
}

impl CallSession {
    pub fn new(provider_call_id: impl Into<String>, join_target: impl Into<String>) -> Self {
        Self {
            provider_call_id: provider_call_id.into(),
            join_target: join_target.into(),
            created_at: Utc::now(),
        }
    }
}

/// RegistryEntry - What we know about a call at creation time
///
/// Keyed by the carrier's call id, since that is the only identifier the
/// status callback carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub original_request: CallRequest,
    pub session: CallSession,
    pub start_time: DateTime<Utc>,
}

impl RegistryEntry {
    pub fn new(original_request: CallRequest, session: CallSession) -> Self {
        Self {
            original_request,
            session,
            start_time: Utc::now(),
        }
    }

    /// Whether the entry has outlived `ttl` as of `now`
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.start_time >= ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_requires_destination() {
        assert!(CallRequest::new("  ").is_err());
        assert!(CallRequest::new("+15551234567").is_ok());
    }

    #[test]
    fn test_request_wire_format_flattens_variables() {
        let body = json!({
            "phoneNumber": "+15551234567",
            "firstName": "Ada",
            "reason": "follow-up"
        });

        let request: CallRequest = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(request.destination, "+15551234567");
        assert_eq!(request.variables.len(), 2);
        assert_eq!(request.variables["firstName"], json!("Ada"));
        assert_eq!(serde_json::to_value(&request).unwrap(), body);
    }

    #[test]
    fn test_variable_text_falls_back_for_falsy_values() {
        let request = CallRequest::new("+1555")
            .unwrap()
            .with_variable("name", "Ada")
            .with_variable("empty", "")
            .with_variable("flag", false)
            .with_variable("count", 3);

        assert_eq!(request.variable_text("name"), "Ada");
        assert_eq!(request.variable_text("empty"), "[no empty provided]");
        assert_eq!(request.variable_text("flag"), "[no flag provided]");
        assert_eq!(request.variable_text("count"), "3");
        assert_eq!(request.variable_text("absent"), "[no absent provided]");
    }

    #[test]
    fn test_entry_expiry() {
        let request = CallRequest::new("+1555").unwrap();
        let entry = RegistryEntry::new(request, CallSession::new("uv-1", "wss://join"));
        let ttl = Duration::minutes(10);

        assert!(!entry.is_expired(entry.start_time, ttl));
        assert!(entry.is_expired(entry.start_time + Duration::minutes(10), ttl));
    }
}
