//! NotificationPayload - Consolidated post-call report
//!
//! Sent once per completed call to the downstream automation webhook.
//! Field names on the wire match what the automation scenario consumes.

use serde::{Deserialize, Serialize};

use super::{CallRequest, RegistryEntry, StatusEvent, Transcript};
use crate::domain::value_objects::CallStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    #[serde(rename = "callSid")]
    pub carrier_call_id: String,
    pub status: CallStatus,
    #[serde(rename = "ultravoxCallId")]
    pub provider_call_id: Option<String>,
    pub recording_url: Option<String>,
    pub transcript: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub transcript_truncated: bool,
    pub call_details: CallDetails,
    pub original_request: Option<CallRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallDetails {
    pub duration: Option<u64>,
    pub timestamp: Option<String>,
    /// Recording URL exactly as the carrier reported it
    pub recording_url: Option<String>,
    #[serde(rename = "to")]
    pub destination: Option<String>,
    #[serde(rename = "from")]
    pub origin: String,
}

/// Artifacts retrieved from the voice provider after the call ended
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArtifacts {
    pub recording_url: Option<String>,
    pub transcript: Option<Transcript>,
}

impl NotificationPayload {
    /// Merge creation-time data, the terminal callback and fetched artifacts
    ///
    /// The provider's recording URL wins; the carrier's is only a fallback.
    pub fn assemble(
        event: &StatusEvent,
        entry: Option<&RegistryEntry>,
        origin: &str,
        artifacts: CallArtifacts,
    ) -> Self {
        let (transcript, transcript_truncated) = match artifacts.transcript {
            Some(t) => (Some(t.text), t.truncated),
            None => (None, false),
        };

        Self {
            carrier_call_id: event.carrier_call_id.clone(),
            status: event.status.clone(),
            provider_call_id: entry.map(|e| e.session.provider_call_id.clone()),
            recording_url: artifacts
                .recording_url
                .or_else(|| event.recording_url.clone()),
            transcript,
            transcript_truncated,
            call_details: CallDetails {
                duration: event.duration_seconds,
                timestamp: event.timestamp.clone(),
                recording_url: event.recording_url.clone(),
                destination: entry.map(|e| e.original_request.destination.clone()),
                origin: origin.to_string(),
            },
            original_request: entry.map(|e| e.original_request.clone()),
        }
    }
}
