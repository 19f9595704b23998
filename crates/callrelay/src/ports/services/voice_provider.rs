//! Voice Provider Port
//!
//! Abstract interface for the conversational-voice backend that runs the
//! agent side of a call and keeps its recording and message history.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{CallSession, MessagePage};
use crate::domain::errors::DomainError;

/// Parameters for a new voice session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRequest {
    /// Fully rendered agent instructions
    pub system_prompt: String,
    pub model: String,
    pub voice: String,
    pub temperature: f32,
    /// Let the callee speak first
    pub user_speaks_first: bool,
    pub recording_enabled: bool,
    pub max_duration_secs: u64,
    pub join_timeout_secs: u64,
}

impl SessionRequest {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            ..Self::default()
        }
    }
}

impl Default for SessionRequest {
    fn default() -> Self {
        Self {
            system_prompt: String::new(),
            model: "fixie-ai/ultravox".to_string(),
            voice: "Mark".to_string(),
            temperature: 0.3,
            user_speaks_first: true,
            recording_enabled: true,
            max_duration_secs: 900,
            join_timeout_secs: 30,
        }
    }
}

/// Outcome of one recording lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordingProbe {
    /// The provider redirected to the final asset
    Ready(String),
    /// No redirect yet, or a non-2xx answer
    NotReady { status_code: Option<u16> },
}

/// Voice session provider interface
///
/// All operations are scoped to the provider's own call id.
#[async_trait]
pub trait VoiceProvider: Send + Sync {
    /// Create a session and return its id and join target
    async fn create_session(&self, request: &SessionRequest) -> Result<CallSession, DomainError>;

    /// Look up the recording for a call
    ///
    /// Transport failures are returned as errors; "not yet available" is
    /// a regular `RecordingProbe::NotReady`.
    async fn fetch_recording(&self, provider_call_id: &str)
        -> Result<RecordingProbe, DomainError>;

    /// Fetch one page of the call's message list
    async fn list_messages(
        &self,
        provider_call_id: &str,
        cursor: Option<&str>,
    ) -> Result<MessagePage, DomainError>;
}
