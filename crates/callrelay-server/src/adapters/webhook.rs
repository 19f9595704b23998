//! HTTP Webhook Implementation
//!
//! Delivers call reports to the downstream automation endpoint using reqwest.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use callrelay::{DomainError, NotificationPayload, NotificationSink};

use crate::config::WebhookConfig;

/// HTTP implementation of NotificationSink
pub struct HttpNotifier {
    client: Client,
    url: String,
    secret: Option<String>,
}

impl HttpNotifier {
    pub fn new(config: &WebhookConfig, timeout: Duration) -> Result<Self, DomainError> {
        Ok(Self {
            client: super::http_client(timeout)?,
            url: config.url.clone(),
            secret: config.secret.clone(),
        })
    }

    /// HMAC-SHA256 over the body, hex-encoded with a `sha256=` prefix
    pub fn sign_payload(secret: &str, payload: &[u8]) -> Result<String, DomainError> {
        use hmac::{Hmac, Mac};
        use sha2::Sha256;

        type HmacSha256 = Hmac<Sha256>;

        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| DomainError::Validation(format!("Invalid signing key: {e}")))?;
        mac.update(payload);
        let bytes = mac.finalize().into_bytes();

        Ok(format!("sha256={}", hex::encode(bytes)))
    }
}

#[async_trait]
impl NotificationSink for HttpNotifier {
    async fn deliver(&self, payload: &NotificationPayload) -> Result<(), DomainError> {
        let body = serde_json::to_vec(payload)?;

        let mut request = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json");

        if let Some(secret) = &self.secret {
            request = request.header("X-Callrelay-Signature", Self::sign_payload(secret, &body)?);
        }

        let response = request
            .body(body)
            .send()
            .await
            .map_err(|e| DomainError::external("Webhook", e))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(status = status.as_u16(), "Webhook accepted delivery");
            Ok(())
        } else {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "No response body".to_string());
            Err(DomainError::external(
                "Webhook",
                format!("returned {status}: {text}"),
            ))
        }
    }
}
