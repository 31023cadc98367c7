//! Catalog API gateway.
//!
//! Tiered HTTP route table for a metadata catalog node: every request is
//! resolved against five tiers of declarative routes, authorized for its
//! tier, then either redirected to its canonical location or forwarded to
//! a named handler.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────▶ http::server (request ID, trace span, limits, timeout)
//!             ──▶ http::dispatcher
//!                   ├─ routing (resolve: Matched | 405 | 404)
//!                   ├─ security (tier gate: Identity | 401 | 403)
//!                   ├─ Redirect ──▶ 308 / 302 + Location
//!                   └─ Forward  ──▶ handlers (catalog by name)
//!     ◀────── response (+ x-request-id, security headers)
//!
//!     Cross-cutting: config, observability, lifecycle
//! ```

// Core subsystems
pub mod config;
pub mod handlers;
pub mod http;
pub mod net;
pub mod routing;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::GatewayConfig;
pub use http::{Dispatcher, HttpServer};
pub use lifecycle::Shutdown;
