//! Handler seam: the capability the dispatcher invokes for forward routes.
//!
//! # Data Flow
//! ```text
//! Dispatcher (matched route + identity)
//!     → HandlerCatalog lookup by HandlerRef
//!     → RouteHandler::call(HandlerContext)
//!     → Response
//! ```
//!
//! # Design Decisions
//! - The router only ever holds names; concrete handlers live in the catalog
//! - Handlers are async and own their request; the router never awaits
//!   anything except the handler it forwards to
//! - `default_catalog` wires the handlers bundled with the binary

pub mod objects;
pub mod placeholder;
pub mod system;

use axum::{body::Body, http::Request, response::Response};
use futures_util::future::BoxFuture;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::routing::{refs, BoundRequest, HandlerRef};
use crate::security::Identity;

use self::objects::{GenericObjectHandler, ObjectOperation, ObjectStores, SearchableFieldsHandler};
use self::placeholder::NotImplemented;
use self::system::{SystemHandler, SystemInfo};

/// Everything a handler receives for one request.
pub struct HandlerContext {
    pub bound: BoundRequest,
    pub identity: Identity,
    pub request: Request<Body>,
}

impl HandlerContext {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.bound.param(name)
    }

    pub fn query(&self) -> Option<&str> {
        self.request.uri().query()
    }

    pub fn route_name(&self) -> &str {
        self.bound.route_name()
    }
}

/// An external operation bound to one or more routes.
pub trait RouteHandler: Send + Sync + 'static {
    fn call(&self, ctx: HandlerContext) -> BoxFuture<'static, Response>;
}

/// Adapter turning an async closure into a [`RouteHandler`].
#[derive(Clone)]
pub struct FnHandler<F>(F);

pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F>
where
    F: Fn(HandlerContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    FnHandler(f)
}

impl<F, Fut> RouteHandler for FnHandler<F>
where
    F: Fn(HandlerContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn call(&self, ctx: HandlerContext) -> BoxFuture<'static, Response> {
        Box::pin((self.0)(ctx))
    }
}

/// Handlers by name.
#[derive(Clone, Default)]
pub struct HandlerCatalog {
    handlers: HashMap<&'static str, Arc<dyn RouteHandler>>,
}

impl HandlerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a handler to a name, replacing any previous binding.
    pub fn register(&mut self, handler_ref: HandlerRef, handler: impl RouteHandler) -> &mut Self {
        self.handlers.insert(handler_ref.name(), Arc::new(handler));
        self
    }

    pub fn register_shared(&mut self, handler_ref: HandlerRef, handler: Arc<dyn RouteHandler>) -> &mut Self {
        self.handlers.insert(handler_ref.name(), handler);
        self
    }

    pub fn get(&self, handler_ref: &HandlerRef) -> Option<&Arc<dyn RouteHandler>> {
        self.handlers.get(handler_ref.name())
    }

    pub fn contains(&self, handler_ref: &HandlerRef) -> bool {
        self.handlers.contains_key(handler_ref.name())
    }

    /// Names from `required` with no binding.
    pub fn missing(&self, required: &[HandlerRef]) -> Vec<HandlerRef> {
        required.iter().filter(|r| !self.contains(r)).copied().collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// The handlers shipped with the binary.
///
/// System diagnostics and the generic object handler are real; every other
/// domain operation answers 501 until its collaborator is registered.
pub fn default_catalog(config: &GatewayConfig, stores: ObjectStores) -> HandlerCatalog {
    let mut catalog = HandlerCatalog::new();
    let info = Arc::new(SystemInfo::from_config(&config.system));

    for (handler_ref, kind) in system::SYSTEM_HANDLERS {
        catalog.register(handler_ref, SystemHandler::new(kind, Arc::clone(&info)));
    }

    let stores = Arc::new(stores);
    for handler_ref in refs::OBJECT_HANDLERS {
        if let Some(op) = ObjectOperation::for_handler(handler_ref) {
            catalog.register(handler_ref, GenericObjectHandler::new(op, Arc::clone(&stores)));
        }
    }
    catalog.register(refs::GET_SEARCHABLE_FIELDS, SearchableFieldsHandler::new(stores));

    for handler_ref in placeholder::PLACEHOLDER_HANDLERS {
        catalog.register(handler_ref, NotImplemented);
    }

    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::build_registry;
    use axum::response::IntoResponse;

    #[test]
    fn test_default_catalog_covers_builtin_table() {
        let config = GatewayConfig::default();
        let registry = build_registry(&config.routing).unwrap();
        let catalog = default_catalog(&config, ObjectStores::new());
        assert!(catalog.missing(&registry.handler_refs()).is_empty());
    }

    #[test]
    fn test_missing_reports_unbound_names() {
        let mut catalog = HandlerCatalog::new();
        catalog.register(refs::GET_LOGS, handler_fn(|_| async { "logs".into_response() }));
        assert!(catalog.contains(&refs::GET_LOGS));
        assert_eq!(
            catalog.missing(&[refs::GET_LOGS, refs::SEARCH_LOGS]),
            vec![refs::SEARCH_LOGS]
        );
    }
}
