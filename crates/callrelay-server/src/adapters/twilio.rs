//! Twilio Carrier
//!
//! Places outbound calls through the Twilio REST API and bridges the
//! answered call to the voice session with a `<Connect><Stream>` instruction.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use callrelay::{CallStatus, Carrier, DomainError, PlaceCallRequest};

use crate::config::TwilioConfig;

const SERVICE: &str = "Twilio";

/// HTTP implementation of Carrier
pub struct TwilioClient {
    client: Client,
    api_url: String,
    account_sid: String,
    auth_token: String,
}

impl TwilioClient {
    pub fn new(config: &TwilioConfig, timeout: Duration) -> Result<Self, DomainError> {
        Ok(Self {
            client: super::http_client(timeout)?,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    fn calls_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.api_url, self.account_sid
        )
    }
}

#[derive(Deserialize)]
struct CreatedCall {
    sid: String,
}

#[derive(Deserialize)]
struct TwilioErrorBody {
    message: Option<String>,
}

/// Markup that streams the answered call into the voice session
pub fn bridge_twiml(bridge_target: &str) -> String {
    format!(
        r#"<Response><Connect><Stream url="{}"/></Connect></Response>"#,
        escape_xml_attr(bridge_target)
    )
}

fn escape_xml_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Name Twilio uses for a status callback event subscription
fn callback_event_name(status: &CallStatus) -> &str {
    match status {
        CallStatus::InProgress => "answered",
        other => other.as_str(),
    }
}

#[async_trait]
impl Carrier for TwilioClient {
    async fn place_call(&self, request: &PlaceCallRequest) -> Result<String, DomainError> {
        let twiml = bridge_twiml(&request.bridge_target);

        let mut form: Vec<(&str, &str)> = vec![
            ("To", request.destination.as_str()),
            ("From", request.origin.as_str()),
            ("Twiml", twiml.as_str()),
            ("StatusCallback", request.status_callback_url.as_str()),
        ];
        form.extend(
            request
                .events_to_report
                .iter()
                .map(|event| ("StatusCallbackEvent", callback_event_name(event))),
        );

        let response = self
            .client
            .post(self.calls_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form)
            .send()
            .await
            .map_err(|e| DomainError::external(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<TwilioErrorBody>(&text)
                .ok()
                .and_then(|body| body.message)
                .unwrap_or(text);
            return Err(DomainError::external(
                SERVICE,
                format!("create call returned {status}: {detail}"),
            ));
        }

        let created: CreatedCall = response
            .json()
            .await
            .map_err(|e| DomainError::Serialization(e.to_string()))?;

        Ok(created.sid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::test_server;
    use axum::{
        extract::State,
        http::{header, HeaderMap, StatusCode},
        routing::post,
        Form, Json, Router,
    };
    use std::sync::{Arc, Mutex};

    type Captured = Arc<Mutex<Vec<(HeaderMap, Vec<(String, String)>)>>>;

    fn client(base_url: &str) -> TwilioClient {
        TwilioClient::new(
            &TwilioConfig {
                account_sid: "AC123".to_string(),
                auth_token: "secret".to_string(),
                phone_number: "+15550000000".to_string(),
                api_url: base_url.to_string(),
            },
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn place_request() -> PlaceCallRequest {
        PlaceCallRequest {
            destination: "+15551234567".to_string(),
            origin: "+15550000000".to_string(),
            bridge_target: "wss://voice/join?a=1&b=2".to_string(),
            status_callback_url: "https://relay.example.com/call-status".to_string(),
            events_to_report: PlaceCallRequest::default_events(),
        }
    }

    #[test]
    fn test_bridge_twiml_escapes_url() {
        assert_eq!(
            bridge_twiml("wss://voice/join?a=1&b=2"),
            r#"<Response><Connect><Stream url="wss://voice/join?a=1&amp;b=2"/></Connect></Response>"#
        );
    }

    #[tokio::test]
    async fn test_place_call_posts_form() {
        let captured: Captured = Arc::default();
        let app = Router::new()
            .route(
                "/2010-04-01/Accounts/AC123/Calls.json",
                post(
                    |State(captured): State<Captured>,
                     headers: HeaderMap,
                     Form(fields): Form<Vec<(String, String)>>| async move {
                        captured.lock().unwrap().push((headers, fields));
                        (
                            StatusCode::CREATED,
                            Json(serde_json::json!({ "sid": "CA1", "status": "queued" })),
                        )
                    },
                ),
            )
            .with_state(captured.clone());
        let base = test_server::spawn(app).await;

        let sid = client(&base).place_call(&place_request()).await.unwrap();
        assert_eq!(sid, "CA1");

        let calls = captured.lock().unwrap();
        let (headers, fields) = &calls[0];
        assert!(headers[header::AUTHORIZATION]
            .to_str()
            .unwrap()
            .starts_with("Basic "));

        let value = |key: &str| {
            fields
                .iter()
                .filter(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
                .collect::<Vec<_>>()
        };
        assert_eq!(value("To"), vec!["+15551234567"]);
        assert_eq!(value("From"), vec!["+15550000000"]);
        assert_eq!(value("StatusCallback"), vec!["https://relay.example.com/call-status"]);
        assert_eq!(
            value("StatusCallbackEvent"),
            vec!["initiated", "ringing", "answered", "completed"]
        );
        assert!(value("Twiml")[0].contains("<Stream url=\"wss://voice/join?a=1&amp;b=2\"/>"));
    }

    #[tokio::test]
    async fn test_place_call_reports_carrier_message() {
        let app = Router::new().route(
            "/2010-04-01/Accounts/AC123/Calls.json",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({
                        "code": 21211,
                        "message": "The 'To' number is not a valid phone number."
                    })),
                )
            }),
        );
        let base = test_server::spawn(app).await;

        let err = client(&base).place_call(&place_request()).await.unwrap_err();
        assert!(err.to_string().contains("not a valid phone number"));
    }
}
