//! Callrelay Domain Library
//!
//! Core domain types and interfaces for outbound voice call orchestration.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure entities and logic
//!   - `entities/`: CallRequest, CallSession, RegistryEntry, StatusEvent,
//!     Transcript, NotificationPayload
//!   - `value_objects/`: CallStatus, SpeakerRole
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `services/`: voice provider and carrier
//!   - `webhook`: downstream notification delivery
//!
//! # Usage
//!
//! ```rust,ignore
//! use callrelay::{CallRequest, StatusEvent, CallStatus};
//! use callrelay::{VoiceProvider, Carrier, NotificationSink};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    CallArtifacts, CallDetails, CallRequest, CallSession, CallStatus, DomainError, MessagePage,
    NotificationPayload, RegistryEntry, SpeakerRole, StatusEvent, Transcript, TranscriptMessage,
};
pub use ports::{
    Carrier, NotificationSink, PlaceCallRequest, RecordingProbe, SessionRequest, VoiceProvider,
};
