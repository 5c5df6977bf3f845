//! Process activation: singleton election and the cross-process channel.
//!
//! - [`singleton`] - named exclusive lock electing one primary per session
//! - [`channel`] - unix-socket channel carrying activation payloads
//! - [`payload`] - the tagged payload type and its wire codec

pub mod channel;
pub mod payload;
pub mod singleton;

pub use channel::{ActivationChannel, forward};
pub use payload::ActivationPayload;
pub use singleton::{Election, LockGuard, acquire};
