//! Application Layer (Use Cases)
//!
//! Call lifecycle orchestration and post-call assembly, coordinating the
//! voice provider, the carrier and the downstream webhook.

mod artifacts;
mod dispatcher;
mod orchestrator;
mod prompt;
mod registry;

#[cfg(test)]
pub(crate) mod testing;

pub use artifacts::{ArtifactConfig, ArtifactFetcher};
pub use dispatcher::NotificationDispatcher;
pub use orchestrator::{CallOrchestrator, CallSettings, CallbackReceipt};
pub use registry::CallRegistry;
