//! Error responses.
//!
//! # Responsibilities
//! - Map dispatch and handler failures to HTTP status codes
//! - Render a uniform JSON body: `{"error": <reason>, "message": <detail>}`
//! - Attach `Allow` to 405 responses

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::routing::RouteMethod;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("no route for {method} {path}")]
    NotFound { method: String, path: String },
    #[error("{method} is not allowed on {path}")]
    MethodNotAllowed {
        method: String,
        path: String,
        allowed: Vec<RouteMethod>,
    },
    #[error("{0}")]
    NotFoundResource(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0} is not implemented on this node")]
    NotImplemented(String),
    #[error("{0}")]
    ServiceUnavailable(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } | ApiError::NotFoundResource(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = error_response(self.status(), self.to_string());
        if let ApiError::MethodNotAllowed { allowed, .. } = &self {
            if let Ok(value) = HeaderValue::from_str(&allow_header(allowed)) {
                response.headers_mut().insert(header::ALLOW, value);
            }
        }
        response
    }
}

/// JSON error body with the canonical reason as `error`.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = json!({
        "error": status.canonical_reason().unwrap_or("Error"),
        "message": message.into(),
    });
    (status, Json(body)).into_response()
}

pub fn allow_header(allowed: &[RouteMethod]) -> String {
    allowed
        .iter()
        .map(RouteMethod::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
