//! Notification Dispatcher
//!
//! Builds the consolidated post-call report and hands it to the downstream
//! webhook. Delivery is best-effort: failures are logged and reported as
//! `false`, never retried or queued.

use std::sync::Arc;

use callrelay::{
    CallArtifacts, NotificationPayload, NotificationSink, RegistryEntry, StatusEvent,
    VoiceProvider,
};

use super::artifacts::ArtifactFetcher;

pub struct NotificationDispatcher<V: VoiceProvider, N: NotificationSink> {
    fetcher: ArtifactFetcher<V>,
    sink: Arc<N>,
    /// Caller id the carrier dialled from
    origin: String,
}

impl<V: VoiceProvider, N: NotificationSink> NotificationDispatcher<V, N> {
    pub fn new(fetcher: ArtifactFetcher<V>, sink: Arc<N>, origin: impl Into<String>) -> Self {
        Self {
            fetcher,
            sink,
            origin: origin.into(),
        }
    }

    /// Assemble and deliver the report for a completed call
    ///
    /// The caller has already decided the call is completed; no status
    /// filtering happens here.
    pub async fn dispatch(&self, entry: Option<&RegistryEntry>, event: &StatusEvent) -> bool {
        let payload = self.build_payload(entry, event).await;
        self.send(&payload).await
    }

    /// Fetch artifacts (when the voice session is known) and merge everything
    pub async fn build_payload(
        &self,
        entry: Option<&RegistryEntry>,
        event: &StatusEvent,
    ) -> NotificationPayload {
        let provider_call_id = entry
            .map(|e| e.session.provider_call_id.as_str())
            .filter(|id| !id.is_empty());

        let artifacts = match provider_call_id {
            Some(id) => self.fetcher.fetch_all(id).await,
            None => CallArtifacts::default(),
        };

        NotificationPayload::assemble(event, entry, &self.origin, artifacts)
    }

    /// One delivery attempt; `true` only on a 2xx answer
    pub async fn send(&self, payload: &NotificationPayload) -> bool {
        tracing::info!(
            call_sid = %payload.carrier_call_id,
            status = %payload.status,
            ultravox_call_id = ?payload.provider_call_id,
            has_recording = payload.recording_url.is_some(),
            has_transcript = payload.transcript.is_some(),
            to = ?payload.call_details.destination,
            from = %payload.call_details.origin,
            "Sending call report"
        );

        match self.sink.deliver(payload).await {
            Ok(()) => {
                tracing::info!(call_sid = %payload.carrier_call_id, "Call report delivered");
                true
            }
            Err(e) => {
                tracing::warn!(
                    call_sid = %payload.carrier_call_id,
                    "Call report delivery failed: {}",
                    e
                );
                false
            }
        }
    }
}
