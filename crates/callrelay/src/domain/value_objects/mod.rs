//! Value Objects
//!
//! Immutable domain values without identity.

mod call_status;
mod speaker_role;

pub use call_status::*;
pub use speaker_role::*;
