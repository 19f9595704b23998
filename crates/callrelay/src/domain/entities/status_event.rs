//! StatusEvent - One carrier status callback delivery
//!
//! Transient: built from the callback, acted upon, never stored.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::CallStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEvent {
    pub carrier_call_id: String,
    pub status: CallStatus,
    pub duration_seconds: Option<u64>,
    /// Carrier-formatted event time, forwarded as-is
    pub timestamp: Option<String>,
    /// Carrier-side recording hint, used when the provider has none
    pub recording_url: Option<String>,
}

impl StatusEvent {
    pub fn new(carrier_call_id: impl Into<String>, status: CallStatus) -> Self {
        Self {
            carrier_call_id: carrier_call_id.into(),
            status,
            duration_seconds: None,
            timestamp: None,
            recording_url: None,
        }
    }

    pub fn with_duration(mut self, seconds: u64) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn with_recording_url(mut self, url: impl Into<String>) -> Self {
        self.recording_url = Some(url.into());
        self
    }
}
