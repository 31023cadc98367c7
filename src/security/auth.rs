//! Tier authorization.
//!
//! # Responsibilities
//! - Decide whether a request may reach a route of a given tier
//! - Produce the [`Identity`] handed to the handler
//!
//! # Design Decisions
//! - The gate is a trait so deployments can plug in their own token checks
//! - Public and unrestricted-private tiers never consult credentials
//! - A missing token is 401, a token that does not open the tier is 403

use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::future::BoxFuture;

use crate::config::AuthConfig;
use crate::http::response::error_response;
use crate::routing::Tier;

/// Who the gate let through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    Portal,
    BackOffice,
    Developer,
}

impl Identity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Identity::Anonymous => "anonymous",
            Identity::Portal => "portal",
            Identity::BackOffice => "back_office",
            Identity::Developer => "developer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthRejection {
    #[error("{0} routes require a bearer token")]
    MissingCredentials(Tier),
    #[error("token does not grant access to {0} routes")]
    InvalidCredentials(Tier),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::MissingCredentials(_) => {
                let mut response = error_response(StatusCode::UNAUTHORIZED, self.to_string());
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
                response
            }
            AuthRejection::InvalidCredentials(_) => error_response(StatusCode::FORBIDDEN, self.to_string()),
        }
    }
}

/// Per-tier access decision.
pub trait AuthGate: Send + Sync + 'static {
    fn authorize<'a>(&'a self, tier: Tier, headers: &'a HeaderMap) -> BoxFuture<'a, Result<Identity, AuthRejection>>;
}

/// Static bearer tokens from configuration.
#[derive(Debug, Clone)]
pub struct TokenGate {
    portal_tokens: Vec<String>,
    back_office_token: String,
    dev_token: String,
}

impl TokenGate {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            portal_tokens: config.portal_tokens.clone(),
            back_office_token: config.back_office_token.clone(),
            dev_token: config.dev_token.clone(),
        }
    }

    pub fn check(&self, tier: Tier, headers: &HeaderMap) -> Result<Identity, AuthRejection> {
        if !tier.requires_credentials() {
            return Ok(Identity::Anonymous);
        }
        let token = bearer_token(headers).ok_or(AuthRejection::MissingCredentials(tier))?;

        let identity = match tier {
            Tier::Portal if self.portal_tokens.iter().any(|t| t == token) => Some(Identity::Portal),
            Tier::BackOffice if token == self.back_office_token => Some(Identity::BackOffice),
            Tier::BackOffice | Tier::Dev if token == self.dev_token => Some(Identity::Developer),
            _ => None,
        };
        identity.ok_or(AuthRejection::InvalidCredentials(tier))
    }
}

impl AuthGate for TokenGate {
    fn authorize<'a>(&'a self, tier: Tier, headers: &'a HeaderMap) -> BoxFuture<'a, Result<Identity, AuthRejection>> {
        let decision = self.check(tier, headers);
        Box::pin(async move { decision })
    }
}

/// Lets every request through as anonymous.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGate;

impl AuthGate for OpenGate {
    fn authorize<'a>(&'a self, _tier: Tier, _headers: &'a HeaderMap) -> BoxFuture<'a, Result<Identity, AuthRejection>> {
        Box::pin(async { Ok(Identity::Anonymous) })
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> TokenGate {
        TokenGate::from_config(&AuthConfig {
            portal_tokens: vec!["portal-a".into(), "portal-b".into()],
            back_office_token: "bo".into(),
            dev_token: "dev".into(),
        })
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, format!("Bearer {}", token).parse().unwrap());
        headers
    }

    #[test]
    fn test_open_tiers_ignore_credentials() {
        let gate = gate();
        assert_eq!(gate.check(Tier::Public, &HeaderMap::new()), Ok(Identity::Anonymous));
        assert_eq!(gate.check(Tier::UnrestrictedPrivate, &bearer("junk")), Ok(Identity::Anonymous));
    }

    #[test]
    fn test_missing_and_wrong_tokens() {
        let gate = gate();
        assert_eq!(
            gate.check(Tier::BackOffice, &HeaderMap::new()),
            Err(AuthRejection::MissingCredentials(Tier::BackOffice))
        );
        assert_eq!(
            gate.check(Tier::Dev, &bearer("bo")),
            Err(AuthRejection::InvalidCredentials(Tier::Dev))
        );
        assert_eq!(
            gate.check(Tier::Portal, &bearer("bo")),
            Err(AuthRejection::InvalidCredentials(Tier::Portal))
        );
    }

    #[test]
    fn test_tokens_open_their_tiers() {
        let gate = gate();
        assert_eq!(gate.check(Tier::Portal, &bearer("portal-b")), Ok(Identity::Portal));
        assert_eq!(gate.check(Tier::BackOffice, &bearer("bo")), Ok(Identity::BackOffice));
        assert_eq!(gate.check(Tier::BackOffice, &bearer("dev")), Ok(Identity::Developer));
        assert_eq!(gate.check(Tier::Dev, &bearer("dev")), Ok(Identity::Developer));
    }

    #[test]
    fn test_rejection_statuses() {
        let missing = AuthRejection::MissingCredentials(Tier::Dev).into_response();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(missing.headers()[header::WWW_AUTHENTICATE], "Bearer");
        let invalid = AuthRejection::InvalidCredentials(Tier::Dev).into_response();
        assert_eq!(invalid.status(), StatusCode::FORBIDDEN);
    }
}
