//! Coaching Backend
//!
//! Abstraction over the remote TradeLingo coaching API. The engine talks to
//! the backend through the [`CoachBackend`] trait so the controller can be
//! exercised against scripted backends in tests and against the production
//! HTTP API in binaries.

mod http;
mod traits;

pub use http::HttpCoachBackend;
pub use traits::{CoachBackend, CoachRequest, StructuredReply, UserProfile};
