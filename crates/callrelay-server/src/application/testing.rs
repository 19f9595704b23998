//! In-memory port fakes for application tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use callrelay::{
    CallSession, Carrier, DomainError, MessagePage, NotificationPayload, NotificationSink,
    PlaceCallRequest, RecordingProbe, SessionRequest, VoiceProvider,
};

/// Scripted voice provider
///
/// Recording and page responses are consumed in order; once a script runs
/// out, recordings report not-ready and pages report an error.
#[derive(Default)]
pub struct FakeVoiceProvider {
    pub session: Mutex<Option<Result<CallSession, DomainError>>>,
    pub recordings: Mutex<VecDeque<Result<RecordingProbe, DomainError>>>,
    pub pages: Mutex<VecDeque<Result<MessagePage, DomainError>>>,
    pub session_requests: Mutex<Vec<SessionRequest>>,
    pub recording_calls: Mutex<Vec<String>>,
    pub cursors: Mutex<Vec<Option<String>>>,
}

impl FakeVoiceProvider {
    pub fn with_session(session: CallSession) -> Self {
        let fake = Self::default();
        *fake.session.lock().unwrap() = Some(Ok(session));
        fake
    }

    pub fn push_recording(&self, probe: Result<RecordingProbe, DomainError>) {
        self.recordings.lock().unwrap().push_back(probe);
    }

    pub fn push_page(&self, page: Result<MessagePage, DomainError>) {
        self.pages.lock().unwrap().push_back(page);
    }

    pub fn recording_attempts(&self) -> usize {
        self.recording_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl VoiceProvider for FakeVoiceProvider {
    async fn create_session(&self, request: &SessionRequest) -> Result<CallSession, DomainError> {
        self.session_requests.lock().unwrap().push(request.clone());
        self.session
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(DomainError::external("fake", "no session scripted")))
    }

    async fn fetch_recording(
        &self,
        provider_call_id: &str,
    ) -> Result<RecordingProbe, DomainError> {
        self.recording_calls
            .lock()
            .unwrap()
            .push(provider_call_id.to_string());
        self.recordings
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(RecordingProbe::NotReady { status_code: None }))
    }

    async fn list_messages(
        &self,
        _provider_call_id: &str,
        cursor: Option<&str>,
    ) -> Result<MessagePage, DomainError> {
        self.cursors
            .lock()
            .unwrap()
            .push(cursor.map(str::to_string));
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(DomainError::external("fake", "no page scripted")))
    }
}

/// Carrier that hands out a fixed call id, or fails
pub struct FakeCarrier {
    pub call_sid: Option<String>,
    pub placed: Mutex<Vec<PlaceCallRequest>>,
}

impl FakeCarrier {
    pub fn accepting(call_sid: &str) -> Self {
        Self {
            call_sid: Some(call_sid.to_string()),
            placed: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            call_sid: None,
            placed: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Carrier for FakeCarrier {
    async fn place_call(&self, request: &PlaceCallRequest) -> Result<String, DomainError> {
        self.placed.lock().unwrap().push(request.clone());
        self.call_sid
            .clone()
            .ok_or_else(|| DomainError::external("fake carrier", "rejected"))
    }
}

/// Sink that records every delivery
#[derive(Default)]
pub struct RecordingSink {
    pub delivered: Mutex<Vec<NotificationPayload>>,
    pub fail: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn count(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn deliver(&self, payload: &NotificationPayload) -> Result<(), DomainError> {
        self.delivered.lock().unwrap().push(payload.clone());
        if self.fail {
            Err(DomainError::external("webhook", "500 Internal Server Error"))
        } else {
            Ok(())
        }
    }
}
