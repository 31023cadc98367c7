//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Matched route (tier known):
//!     → auth.rs (AuthGate decides, yields Identity or 401/403)
//!     → Pass to handler or redirect
//! Every response:
//!     → headers.rs (nosniff, frame and referrer policy)
//! ```
//!
//! # Design Decisions
//! - Authorization depends on the tier only, never on the individual route
//! - Fail closed: a credentialed tier without a valid token is rejected
//! - Redirect routes are gated like any other route of their tier

pub mod auth;
pub mod headers;

pub use auth::{AuthGate, AuthRejection, Identity, OpenGate, TokenGate};
