//! Artifact Fetcher
//!
//! Retrieves a finished call's recording URL and transcript from the voice
//! provider. Both are soft: any failure yields `None` and the report goes
//! out with fewer details.

use std::sync::Arc;
use std::time::Duration;

use callrelay::{
    CallArtifacts, DomainError, RecordingProbe, Transcript, TranscriptMessage, VoiceProvider,
};

/// Retry and pagination limits
#[derive(Debug, Clone)]
pub struct ArtifactConfig {
    /// Total recording lookups, including the first
    pub recording_attempts: u32,
    /// Fixed pause between recording lookups
    pub recording_retry_delay: Duration,
    /// Stop paging after this many pages; `None` pages until the end
    pub transcript_max_pages: Option<usize>,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            recording_attempts: 3,
            recording_retry_delay: Duration::from_secs(5),
            transcript_max_pages: Some(100),
        }
    }
}

pub struct ArtifactFetcher<V: VoiceProvider> {
    provider: Arc<V>,
    config: ArtifactConfig,
}

impl<V: VoiceProvider> ArtifactFetcher<V> {
    pub fn new(provider: Arc<V>, config: ArtifactConfig) -> Self {
        Self { provider, config }
    }

    /// Recording and transcript, fetched concurrently
    pub async fn fetch_all(&self, provider_call_id: &str) -> CallArtifacts {
        let (recording_url, transcript) = tokio::join!(
            self.fetch_recording(provider_call_id),
            self.fetch_transcript(provider_call_id)
        );
        CallArtifacts {
            recording_url,
            transcript,
        }
    }

    /// Final recording URL, retrying while the provider has not redirected
    pub async fn fetch_recording(&self, provider_call_id: &str) -> Option<String> {
        let attempts = self.config.recording_attempts.max(1);

        for attempt in 1..=attempts {
            if attempt > 1 {
                tracing::debug!(
                    delay = ?self.config.recording_retry_delay,
                    "Waiting before recording retry"
                );
                tokio::time::sleep(self.config.recording_retry_delay).await;
            }

            match self.provider.fetch_recording(provider_call_id).await {
                Ok(RecordingProbe::Ready(url)) => {
                    tracing::info!(
                        ultravox_call_id = %provider_call_id,
                        attempt,
                        "Recording URL resolved"
                    );
                    return Some(url);
                }
                Ok(RecordingProbe::NotReady { status_code }) => {
                    tracing::info!(
                        ultravox_call_id = %provider_call_id,
                        attempt,
                        attempts,
                        status = ?status_code,
                        "Recording not ready"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        ultravox_call_id = %provider_call_id,
                        attempt,
                        attempts,
                        "Recording lookup failed: {}",
                        e
                    );
                }
            }
        }

        tracing::warn!(
            ultravox_call_id = %provider_call_id,
            attempts,
            "No recording URL after all attempts"
        );
        None
    }

    /// Whole conversation, or `None` if any page could not be retrieved
    pub async fn fetch_transcript(&self, provider_call_id: &str) -> Option<Transcript> {
        match self.collect_messages(provider_call_id).await {
            Ok((messages, truncated)) => {
                let transcript = Transcript::from_messages(&messages, truncated);
                tracing::info!(
                    ultravox_call_id = %provider_call_id,
                    messages = messages.len(),
                    truncated,
                    "Transcript compiled"
                );
                Some(transcript)
            }
            Err(e) => {
                tracing::warn!(
                    ultravox_call_id = %provider_call_id,
                    "Transcript retrieval failed: {}",
                    e
                );
                None
            }
        }
    }

    async fn collect_messages(
        &self,
        provider_call_id: &str,
    ) -> Result<(Vec<TranscriptMessage>, bool), DomainError> {
        let mut messages = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page = self
                .provider
                .list_messages(provider_call_id, cursor.as_deref())
                .await?;
            pages += 1;
            messages.extend(page.messages);

            let Some(next) = page.next_cursor else {
                return Ok((messages, false));
            };

            if let Some(max_pages) = self.config.transcript_max_pages {
                if pages >= max_pages {
                    tracing::warn!(
                        ultravox_call_id = %provider_call_id,
                        pages,
                        "Transcript page cap reached, truncating"
                    );
                    return Ok((messages, true));
                }
            }

            cursor = Some(next);
        }
    }
}
