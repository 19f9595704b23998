//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Call: outbound request, provider session, registry entry
//! - StatusEvent: carrier lifecycle callback
//! - Transcript: provider message list and assembled conversation
//! - Notification: consolidated post-call report

mod call;
mod notification;
mod status_event;
mod transcript;

pub use call::*;
pub use notification::*;
pub use status_event::*;
pub use transcript::*;
