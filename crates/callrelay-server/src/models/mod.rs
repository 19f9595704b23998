//! Callrelay Data Models
//!
//! Wire DTOs for the HTTP API.

mod call;

pub use call::*;
