//! Request dispatch.
//!
//! # Responsibilities
//! - Resolve each request against the tier registry
//! - Apply the tier's auth gate before any action runs
//! - Answer redirects directly, forward everything else to its handler
//! - Record per-route metrics and span fields
//!
//! # Design Decisions
//! - One fallback handler sees every request; axum's own router is unused
//! - A malformed redirect suffix answers 404, never a broken Location
//! - Every handler name is checked against the catalog at construction

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;

use crate::handlers::{HandlerCatalog, HandlerContext};
use crate::http::response::ApiError;
use crate::observability::{metrics, spans};
use crate::routing::{HandlerRef, MatchOutcome, RouteAction, TierRegistry};
use crate::security::AuthGate;

#[derive(Debug, thiserror::Error)]
#[error("no handler registered for: {}", names(.0))]
pub struct MissingHandlers(pub Vec<HandlerRef>);

fn names(refs: &[HandlerRef]) -> String {
    refs.iter().map(HandlerRef::name).collect::<Vec<_>>().join(", ")
}

pub struct Dispatcher {
    registry: Arc<TierRegistry>,
    handlers: HandlerCatalog,
    gate: Arc<dyn AuthGate>,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<TierRegistry>,
        handlers: HandlerCatalog,
        gate: Arc<dyn AuthGate>,
    ) -> Result<Self, MissingHandlers> {
        let missing = handlers.missing(&registry.handler_refs());
        if !missing.is_empty() {
            return Err(MissingHandlers(missing));
        }
        Ok(Self {
            registry,
            handlers,
            gate,
        })
    }

    pub fn registry(&self) -> &TierRegistry {
        &self.registry
    }

    pub async fn dispatch(&self, request: Request<Body>) -> Response {
        let start = Instant::now();
        let method = request.method().clone();
        let path = request.uri().path().to_string();

        let bound = match self.registry.resolve(&method, &path) {
            MatchOutcome::Matched(bound) => bound,
            MatchOutcome::MethodNotAllowed { allowed } => {
                tracing::debug!(method = %method, path = %path, ?allowed, "Method not allowed");
                metrics::record_miss(method.as_str(), 405);
                return ApiError::MethodNotAllowed {
                    method: method.to_string(),
                    path,
                    allowed,
                }
                .into_response();
            }
            MatchOutcome::NotFound => {
                tracing::debug!(method = %method, path = %path, "No route matched");
                metrics::record_miss(method.as_str(), 404);
                return ApiError::NotFound {
                    method: method.to_string(),
                    path,
                }
                .into_response();
            }
        };

        let route = Arc::clone(&bound.route);
        spans::record_route(&route.name, route.tier.as_str());

        let identity = match self.gate.authorize(route.tier, request.headers()).await {
            Ok(identity) => identity,
            Err(rejection) => {
                tracing::warn!(route = %route.name, tier = %route.tier, reason = %rejection, "Request rejected");
                let response = rejection.into_response();
                metrics::record_request(&route.name, route.tier.as_str(), method.as_str(), response.status().as_u16(), start);
                return response;
            }
        };

        let response = match &route.action {
            RouteAction::Redirect(rule) => {
                match rule.respond(bound.wildcard.as_deref(), request.uri().query()) {
                    Ok(response) => response,
                    Err(e) => {
                        tracing::debug!(route = %route.name, error = %e, "Redirect refused");
                        ApiError::NotFound {
                            method: method.to_string(),
                            path,
                        }
                        .into_response()
                    }
                }
            }
            RouteAction::Forward(handler_ref) => match self.handlers.get(handler_ref) {
                Some(handler) => {
                    let handler = Arc::clone(handler);
                    handler
                        .call(HandlerContext {
                            bound,
                            identity,
                            request,
                        })
                        .await
                }
                None => {
                    tracing::error!(route = %route.name, handler = %handler_ref, "Handler vanished from catalog");
                    ApiError::Internal(format!("no handler for {}", handler_ref)).into_response()
                }
            },
        };

        metrics::record_request(&route.name, route.tier.as_str(), method.as_str(), response.status().as_u16(), start);
        response
    }
}

/// Axum fallback handler feeding every request to the dispatcher.
pub async fn dispatch_request(State(dispatcher): State<Arc<Dispatcher>>, request: Request<Body>) -> Response {
    dispatcher.dispatch(request).await
}
