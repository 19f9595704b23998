//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod twilio;
pub mod ultravox;
pub mod webhook;

use reqwest::Client;
use std::time::Duration;

use callrelay::DomainError;

// Re-exports
pub use twilio::TwilioClient;
pub use ultravox::UltravoxClient;
pub use webhook::HttpNotifier;

const USER_AGENT: &str = concat!("Callrelay/", env!("CARGO_PKG_VERSION"));

/// Shared client settings; every outbound request gets an explicit timeout
fn http_client(timeout: Duration) -> Result<Client, DomainError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| DomainError::ExternalService(format!("Failed to build HTTP client: {e}")))
}
