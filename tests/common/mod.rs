//! Shared utilities for gateway integration tests.

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::response::IntoResponse;
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use catalog_gateway::config::GatewayConfig;
use catalog_gateway::handlers::{handler_fn, HandlerCatalog};
use catalog_gateway::http::{Dispatcher, HttpServer};
use catalog_gateway::routing::build_registry;
use catalog_gateway::security::TokenGate;

pub const PORTAL_TOKEN: &str = "portal-token";
pub const BACK_OFFICE_TOKEN: &str = "back-office-token";
pub const DEV_TOKEN: &str = "dev-token";

pub fn test_config() -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.auth.portal_tokens = vec![PORTAL_TOKEN.to_string()];
    config.auth.back_office_token = BACK_OFFICE_TOKEN.to_string();
    config.auth.dev_token = DEV_TOKEN.to_string();
    config
}

/// Every handler answers with what it was given.
pub fn echo_catalog(config: &GatewayConfig) -> HandlerCatalog {
    let registry = build_registry(&config.routing).expect("valid route table");
    let mut catalog = HandlerCatalog::new();
    for handler_ref in registry.handler_refs() {
        catalog.register(
            handler_ref,
            handler_fn(move |ctx| async move {
                let params: serde_json::Map<String, Value> = ctx
                    .bound
                    .params
                    .iter()
                    .map(|(k, v)| (k.clone(), json!(v)))
                    .collect();
                axum::Json(json!({
                    "route": ctx.route_name(),
                    "handler": handler_ref.name(),
                    "tier": ctx.bound.tier().as_str(),
                    "params": params,
                    "wildcard": ctx.bound.wildcard.clone(),
                    "identity": ctx.identity.as_str(),
                    "query": ctx.query(),
                }))
                .into_response()
            }),
        );
    }
    catalog
}

pub fn router(config: GatewayConfig, catalog: HandlerCatalog) -> Router {
    let registry = build_registry(&config.routing).expect("valid route table");
    let gate = Arc::new(TokenGate::from_config(&config.auth));
    let dispatcher = Dispatcher::new(Arc::new(registry), catalog, gate).expect("every handler bound");
    HttpServer::new(config, Arc::new(dispatcher)).router()
}

pub fn echo_router() -> Router {
    let config = test_config();
    let catalog = echo_catalog(&config);
    router(config, catalog)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("JSON body")
    }

    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }
}

pub async fn send(router: &Router, method: Method, uri: &str, token: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let response = router
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();
    TestResponse { status, headers, body }
}
