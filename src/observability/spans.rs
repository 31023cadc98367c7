//! Per-request spans.
//!
//! The HTTP trace layer opens one span per request carrying the request ID;
//! the dispatcher records the matched route and tier on it.

use axum::http::Request;
use tower_http::trace::MakeSpan;
use tracing::Span;

use crate::http::request::request_id;

/// Builds the request span with empty route fields to fill after matching.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let request_id = request_id(request).unwrap_or("unknown");

        tracing::info_span!(
            "request",
            request_id = %request_id,
            method = %request.method(),
            path = %request.uri().path(),
            route = tracing::field::Empty,
            tier = tracing::field::Empty,
        )
    }
}

/// Attach the matched route to the current request span.
pub fn record_route(route: &str, tier: &str) {
    let span = Span::current();
    span.record("route", route);
    span.record("tier", tier);
}
