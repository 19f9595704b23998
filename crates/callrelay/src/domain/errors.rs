//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DomainError {
    /// Wrap an upstream failure with the name of the service that produced it
    pub fn external<S: AsRef<str>>(service: S, detail: impl std::fmt::Display) -> Self {
        Self::ExternalService(format!("{}: {}", service.as_ref(), detail))
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
