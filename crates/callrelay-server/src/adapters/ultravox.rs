//! Ultravox Voice Provider
//!
//! Creates voice sessions and reads back recordings and message history
//! over the Ultravox REST API.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use callrelay::{
    CallSession, DomainError, MessagePage, RecordingProbe, SessionRequest, SpeakerRole,
    TranscriptMessage, VoiceProvider,
};

use crate::config::UltravoxConfig;

const SERVICE: &str = "Ultravox";

/// HTTP implementation of VoiceProvider
pub struct UltravoxClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl UltravoxClient {
    pub fn new(config: &UltravoxConfig, timeout: Duration) -> Result<Self, DomainError> {
        Ok(Self {
            client: super::http_client(timeout)?,
            base_url: normalize_base_url(&config.api_url),
            api_key: config.api_key.clone(),
        })
    }

    fn call_url(&self, provider_call_id: &str, suffix: &str) -> Result<Url, DomainError> {
        let raw = format!("{}/calls/{}{}", self.base_url, provider_call_id, suffix);
        Url::parse(&raw).map_err(|e| DomainError::Validation(format!("Invalid URL {raw}: {e}")))
    }
}

/// Accept both the API root and the create-call endpoint as configured URL
fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    trimmed
        .strip_suffix("/calls")
        .unwrap_or(trimmed)
        .to_string()
}

// ============================================
// Request/Response Types
// ============================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateCallBody<'a> {
    system_prompt: &'a str,
    model: &'a str,
    voice: &'a str,
    temperature: f32,
    first_speaker: &'static str,
    selected_tools: Vec<SelectedTool>,
    medium: serde_json::Value,
    recording_enabled: bool,
    max_duration: String,
    join_timeout: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SelectedTool {
    tool_name: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCallResponse {
    call_id: String,
    join_url: Option<String>,
}

#[derive(Deserialize)]
struct MessageListResponse {
    #[serde(default)]
    results: Vec<WireMessage>,
    next: Option<String>,
}

#[derive(Deserialize)]
struct WireMessage {
    role: String,
    text: Option<String>,
}

impl<'a> CreateCallBody<'a> {
    fn from_request(request: &'a SessionRequest) -> Self {
        Self {
            system_prompt: &request.system_prompt,
            model: &request.model,
            voice: &request.voice,
            temperature: request.temperature,
            first_speaker: if request.user_speaks_first {
                "FIRST_SPEAKER_USER"
            } else {
                "FIRST_SPEAKER_AGENT"
            },
            selected_tools: vec![SelectedTool {
                tool_name: "hangUp",
            }],
            medium: serde_json::json!({ "twilio": {} }),
            recording_enabled: request.recording_enabled,
            max_duration: format!("{}s", request.max_duration_secs),
            join_timeout: format!("{}s", request.join_timeout_secs),
        }
    }
}

/// Pull the opaque cursor out of a `next` page link
fn cursor_from_next(next: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(next) = next.filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    let url = Url::parse(next)
        .map_err(|e| DomainError::Serialization(format!("Invalid next link {next}: {e}")))?;
    Ok(url
        .query_pairs()
        .find(|(key, _)| key == "cursor")
        .map(|(_, value)| value.into_owned())
        .filter(|cursor| !cursor.is_empty()))
}

#[async_trait]
impl VoiceProvider for UltravoxClient {
    async fn create_session(&self, request: &SessionRequest) -> Result<CallSession, DomainError> {
        let body = CreateCallBody::from_request(request);

        let response = self
            .client
            .post(format!("{}/calls", self.base_url))
            .header("X-API-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::external(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(DomainError::external(
                SERVICE,
                format!("create call returned {status}: {text}"),
            ));
        }

        let created: CreateCallResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Serialization(e.to_string()))?;

        let join_url = created
            .join_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| DomainError::external(SERVICE, "No joinUrl received"))?;

        Ok(CallSession::new(created.call_id, join_url))
    }

    async fn fetch_recording(
        &self,
        provider_call_id: &str,
    ) -> Result<RecordingProbe, DomainError> {
        let url = self.call_url(provider_call_id, "/recording")?;

        let response = self
            .client
            .get(url.clone())
            .header("X-API-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| DomainError::external(SERVICE, e))?;

        let status = response.status();
        if status.is_success() && response.url() != &url {
            return Ok(RecordingProbe::Ready(response.url().to_string()));
        }

        Ok(RecordingProbe::NotReady {
            status_code: Some(status.as_u16()),
        })
    }

    async fn list_messages(
        &self,
        provider_call_id: &str,
        cursor: Option<&str>,
    ) -> Result<MessagePage, DomainError> {
        let mut url = self.call_url(provider_call_id, "/messages")?;
        if let Some(cursor) = cursor {
            url.query_pairs_mut().append_pair("cursor", cursor);
        }

        let response = self
            .client
            .get(url)
            .header("X-API-Key", &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| DomainError::external(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::external(
                SERVICE,
                format!("list messages returned {status}"),
            ));
        }

        let list: MessageListResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Serialization(e.to_string()))?;

        Ok(MessagePage {
            next_cursor: cursor_from_next(list.next.as_deref())?,
            messages: list
                .results
                .into_iter()
                .map(|m| TranscriptMessage {
                    role: SpeakerRole::parse(&m.role),
                    text: m.text,
                })
                .collect(),
        })
    }
}
