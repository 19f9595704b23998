//! Carrier Port
//!
//! Abstract interface for the telephony carrier that dials the callee and
//! bridges the phone leg to the voice session.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::value_objects::CallStatus;

/// Instruction to place one outbound call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCallRequest {
    pub destination: String,
    pub origin: String,
    /// Voice session URL the answered call is streamed to
    pub bridge_target: String,
    pub status_callback_url: String,
    pub events_to_report: Vec<CallStatus>,
}

impl PlaceCallRequest {
    /// Lifecycle events requested from the carrier
    pub fn default_events() -> Vec<CallStatus> {
        vec![
            CallStatus::Initiated,
            CallStatus::Ringing,
            CallStatus::InProgress,
            CallStatus::Completed,
        ]
    }
}

#[async_trait]
pub trait Carrier: Send + Sync {
    /// Place the call and return the carrier's call id
    async fn place_call(&self, request: &PlaceCallRequest) -> Result<String, DomainError>;
}
