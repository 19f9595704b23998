//! Service Ports
//!
//! Abstract interfaces for external services.

mod carrier;
mod voice_provider;

pub use carrier::*;
pub use voice_provider::*;
