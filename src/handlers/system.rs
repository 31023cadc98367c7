//! Diagnostic handlers answering from configuration and build metadata.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures_util::future::BoxFuture;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::SystemConfig;
use crate::handlers::{HandlerContext, RouteHandler};
use crate::http::response::ApiError;
use crate::routing::{refs, HandlerRef};

/// Static facts about the running node.
#[derive(Debug, Clone)]
pub struct SystemInfo {
    pub app_env: String,
    pub git_hash: String,
    pub app_hash: String,
    pub favicon_path: Option<String>,
}

impl SystemInfo {
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            app_env: config.app_env.clone(),
            git_hash: config.git_hash.clone(),
            app_hash: config.app_hash.clone(),
            favicon_path: config.favicon_path.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemKind {
    Favicon,
    ApiVersion,
    GitHash,
    AppHash,
    Environment,
    RuntimeVersions,
    Uuid,
    Test,
}

pub const SYSTEM_HANDLERS: [(HandlerRef, SystemKind); 8] = [
    (refs::SERVE_FAVICON, SystemKind::Favicon),
    (refs::GET_API_VERSION, SystemKind::ApiVersion),
    (refs::GET_GIT_HASH, SystemKind::GitHash),
    (refs::GET_APP_HASH, SystemKind::AppHash),
    (refs::GET_ENVIRONMENT, SystemKind::Environment),
    (refs::GET_RUNTIME_VERSIONS, SystemKind::RuntimeVersions),
    (refs::GENERATE_UUID, SystemKind::Uuid),
    (refs::TEST_PROBE, SystemKind::Test),
];

pub struct SystemHandler {
    kind: SystemKind,
    info: Arc<SystemInfo>,
}

impl SystemHandler {
    pub fn new(kind: SystemKind, info: Arc<SystemInfo>) -> Self {
        Self { kind, info }
    }
}

impl RouteHandler for SystemHandler {
    fn call(&self, ctx: HandlerContext) -> BoxFuture<'static, Response> {
        let info = Arc::clone(&self.info);
        let kind = self.kind;
        Box::pin(async move {
            match kind {
                SystemKind::Favicon => favicon(info.favicon_path.as_deref()).await,
                SystemKind::ApiVersion => env!("CARGO_PKG_VERSION").into_response(),
                SystemKind::GitHash => info.git_hash.clone().into_response(),
                SystemKind::AppHash => info.app_hash.clone().into_response(),
                SystemKind::Environment => info.app_env.clone().into_response(),
                SystemKind::RuntimeVersions => Json(json!({
                    "name": env!("CARGO_PKG_NAME"),
                    "version": env!("CARGO_PKG_VERSION"),
                    "os": std::env::consts::OS,
                    "arch": std::env::consts::ARCH,
                }))
                .into_response(),
                SystemKind::Uuid => Uuid::new_v4().to_string().into_response(),
                SystemKind::Test => Json(json!({
                    "status": "ok",
                    "route": ctx.route_name(),
                    "identity": ctx.identity.as_str(),
                }))
                .into_response(),
            }
        })
    }
}

async fn favicon(path: Option<&str>) -> Response {
    let Some(path) = path else {
        return ApiError::NotFoundResource("no favicon configured".into()).into_response();
    };
    match tokio::fs::read(path).await {
        Ok(bytes) => (StatusCode::OK, [(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Err(e) => {
            tracing::warn!(path, error = %e, "Failed to read favicon");
            ApiError::NotFoundResource("favicon unavailable".into()).into_response()
        }
    }
}
