//! Callrelay API Routes
//!
//! - /outbound-call - Place a call bridged to a voice session
//! - /call-status - Carrier status callbacks

pub mod call;
pub mod status;
pub mod swagger;
