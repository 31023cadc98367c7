//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher and startup produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!     → spans.rs (one span per request with request ID and route)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Request ID flows through every log line of a request
//! - Route names, not paths, label metrics (bounded cardinality)

pub mod logging;
pub mod metrics;
pub mod spans;
