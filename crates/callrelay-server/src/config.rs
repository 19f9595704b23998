//! Runtime configuration
//!
//! Secrets and settings are read from the Shuttle secret store, falling
//! back to process environment variables (a local `.env` is loaded first).

use std::time::Duration;
use thiserror::Error;

use crate::application::ArtifactConfig;

const DEFAULT_ULTRAVOX_API_URL: &str = "https://api.ultravox.ai/api";
const DEFAULT_TWILIO_API_URL: &str = "https://api.twilio.com";

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are Steve, a professional and friendly caller. The current time is: {currentDateTime}

Your main tasks are:
1. Introduce yourself and confirm you're speaking with the right person
2. Explain the reason for your call using the provided details
3. Be polite and professional throughout the call

When the conversation naturally concludes, use the 'hangUp' tool to end the call.";

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Voice provider credentials and session knobs
#[derive(Debug, Clone)]
pub struct UltravoxConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: Option<String>,
    pub voice: Option<String>,
}

/// Carrier credentials
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub phone_number: String,
    pub api_url: String,
}

/// Downstream automation webhook
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub url: String,
    /// Enables HMAC-SHA256 signing of delivered bodies
    pub secret: Option<String>,
}

/// Call registry retention
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub ttl: Duration,
    pub sweep_interval: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ultravox: UltravoxConfig,
    pub twilio: TwilioConfig,
    pub webhook: WebhookConfig,
    /// Publicly reachable base URL of this server, used for carrier callbacks
    pub public_base_url: String,
    pub system_prompt: String,
    pub http_timeout: Duration,
    pub artifacts: ArtifactConfig,
    pub registry: RegistryConfig,
}

impl AppConfig {
    /// Load from Shuttle secrets with environment fallback
    pub fn from_secrets(secrets: &shuttle_runtime::SecretStore) -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {}", e);
        }
        Self::from_lookup(|key| secrets.get(key).or_else(|| std::env::var(key).ok()))
    }

    /// Load from an arbitrary key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let ultravox = UltravoxConfig {
            api_key: require("ULTRAVOX_API_KEY")?,
            api_url: get("ULTRAVOX_API_URL").unwrap_or_else(|| DEFAULT_ULTRAVOX_API_URL.to_string()),
            model: get("ULTRAVOX_MODEL"),
            voice: get("ULTRAVOX_VOICE"),
        };

        let twilio = TwilioConfig {
            account_sid: require("TWILIO_ACCOUNT_SID")?,
            auth_token: require("TWILIO_AUTH_TOKEN")?,
            phone_number: require("TWILIO_PHONE_NUMBER")?,
            api_url: get("TWILIO_API_URL").unwrap_or_else(|| DEFAULT_TWILIO_API_URL.to_string()),
        };

        let webhook = WebhookConfig {
            url: require("MAKE_WEBHOOK_URL")?,
            secret: get("MAKE_WEBHOOK_SECRET"),
        };

        let public_base_url = require("PUBLIC_BASE_URL")?
            .trim_end_matches('/')
            .to_string();

        let defaults = ArtifactConfig::default();
        let artifacts = ArtifactConfig {
            recording_attempts: parse_or(&get, "RECORDING_MAX_ATTEMPTS", defaults.recording_attempts)?,
            recording_retry_delay: Duration::from_secs(parse_or(
                &get,
                "RECORDING_RETRY_DELAY_SECS",
                defaults.recording_retry_delay.as_secs(),
            )?),
            transcript_max_pages: match get("TRANSCRIPT_MAX_PAGES") {
                // 0 disables the cap
                Some(v) => match v.trim().parse::<usize>() {
                    Ok(0) => None,
                    Ok(n) => Some(n),
                    Err(_) => {
                        return Err(ConfigError::Invalid {
                            key: "TRANSCRIPT_MAX_PAGES",
                            value: v,
                        })
                    }
                },
                None => defaults.transcript_max_pages,
            },
        };

        let registry = RegistryConfig {
            ttl: Duration::from_secs(parse_or(&get, "REGISTRY_TTL_SECS", 86_400)?),
            sweep_interval: Duration::from_secs(parse_or(&get, "REGISTRY_SWEEP_INTERVAL_SECS", 600)?),
        };

        // A zero timeout would fail every outbound request
        let http_timeout_secs: u64 = parse_or(&get, "HTTP_TIMEOUT_SECS", 30)?;
        if http_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "HTTP_TIMEOUT_SECS",
                value: http_timeout_secs.to_string(),
            });
        }
        let http_timeout = Duration::from_secs(http_timeout_secs);

        Ok(Self {
            ultravox,
            twilio,
            webhook,
            public_base_url,
            system_prompt: get("SYSTEM_PROMPT").unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            http_timeout,
            artifacts,
            registry,
        })
    }

    /// Where the carrier posts lifecycle callbacks
    pub fn status_callback_url(&self) -> String {
        format!("{}/call-status", self.public_base_url)
    }
}

fn parse_or<G, T>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    G: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match get(key) {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: v }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn required() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("ULTRAVOX_API_KEY", "uv-key"),
            ("TWILIO_ACCOUNT_SID", "AC123"),
            ("TWILIO_AUTH_TOKEN", "token"),
            ("TWILIO_PHONE_NUMBER", "+15550000000"),
            ("MAKE_WEBHOOK_URL", "https://hook.example.com/abc"),
            ("PUBLIC_BASE_URL", "https://relay.example.com/"),
        ])
    }

    fn load(vars: &HashMap<&'static str, &'static str>) -> Result<AppConfig, ConfigError> {
        AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_defaults_applied() {
        let config = load(&required()).unwrap();

        assert_eq!(config.ultravox.api_url, DEFAULT_ULTRAVOX_API_URL);
        assert_eq!(config.twilio.api_url, DEFAULT_TWILIO_API_URL);
        assert_eq!(config.status_callback_url(), "https://relay.example.com/call-status");
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.artifacts.recording_attempts, 3);
        assert_eq!(config.artifacts.recording_retry_delay, Duration::from_secs(5));
        assert_eq!(config.artifacts.transcript_max_pages, Some(100));
        assert_eq!(config.registry.ttl, Duration::from_secs(86_400));
        assert!(config.webhook.secret.is_none());
        assert!(config.system_prompt.contains("{currentDateTime}"));
    }

    #[test]
    fn test_missing_secret_is_reported() {
        let mut vars = required();
        vars.insert("TWILIO_AUTH_TOKEN", "   ");

        let err = load(&vars).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("TWILIO_AUTH_TOKEN")));
    }

    #[test]
    fn test_invalid_number_is_reported() {
        let mut vars = required();
        vars.insert("RECORDING_RETRY_DELAY_SECS", "soon");

        let err = load(&vars).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "RECORDING_RETRY_DELAY_SECS",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_http_timeout_is_rejected() {
        let mut vars = required();
        vars.insert("HTTP_TIMEOUT_SECS", "0");

        let err = load(&vars).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "HTTP_TIMEOUT_SECS",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_page_cap_disables_it() {
        let mut vars = required();
        vars.insert("TRANSCRIPT_MAX_PAGES", "0");

        let config = load(&vars).unwrap();
        assert_eq!(config.artifacts.transcript_max_pages, None);
    }
}
