//! Redirect engine.
//!
//! # Responsibilities
//! - Compute the canonical location for a redirect route
//! - Preserve the raw query string and the wildcard suffix verbatim
//! - Build the redirect response
//!
//! # Design Decisions
//! - Alias redirects answer 308 so clients repeat the same method and body
//!   (some aliased routes are called with PUT)
//! - Simple redirects answer 302 and ignore any wildcard suffix
//! - A malformed suffix is reported as `RedirectError`, which the
//!   dispatcher answers with 404

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

/// Which redirect flavor a route uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    /// 308: method and body preserved, suffix appended.
    PermanentAlias,
    /// 302: always the fixed target.
    Simple,
}

impl RedirectKind {
    pub fn status(&self) -> StatusCode {
        match self {
            RedirectKind::PermanentAlias => StatusCode::PERMANENT_REDIRECT,
            RedirectKind::Simple => StatusCode::FOUND,
        }
    }
}

/// Redirect action of a route: flavor plus canonical target path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRule {
    pub kind: RedirectKind,
    pub target: String,
}

impl RedirectRule {
    pub fn permanent_alias(target: impl Into<String>) -> Self {
        Self {
            kind: RedirectKind::PermanentAlias,
            target: target.into(),
        }
    }

    pub fn simple(target: impl Into<String>) -> Self {
        Self {
            kind: RedirectKind::Simple,
            target: target.into(),
        }
    }

    /// Canonical location for a matched request.
    pub fn location(&self, wildcard: Option<&str>, query: Option<&str>) -> Result<String, RedirectError> {
        let mut location = self.target.clone();

        if self.kind == RedirectKind::PermanentAlias {
            if let Some(suffix) = wildcard.filter(|s| !s.is_empty()) {
                check_suffix(suffix)?;
                location.push('/');
                location.push_str(suffix);
            }
        }

        if let Some(query) = query {
            location.push('?');
            location.push_str(query);
        }

        Ok(location)
    }

    /// Redirect response for a matched request.
    pub fn respond(&self, wildcard: Option<&str>, query: Option<&str>) -> Result<Response, RedirectError> {
        let location = self.location(wildcard, query)?;
        let value = HeaderValue::from_str(&location)
            .map_err(|_| RedirectError::InvalidLocation(location.clone()))?;

        tracing::debug!(status = %self.kind.status(), location = %location, "Redirecting");

        Ok((self.kind.status(), [(header::LOCATION, value)]).into_response())
    }
}

/// Target computation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RedirectError {
    #[error("wildcard suffix `{0}` contains a dot or empty segment")]
    MalformedSuffix(String),
    #[error("location `{0}` is not a valid header value")]
    InvalidLocation(String),
}

fn check_suffix(suffix: &str) -> Result<(), RedirectError> {
    let segments: Vec<&str> = suffix.split('/').collect();
    let last = segments.len() - 1;
    let malformed = segments
        .iter()
        .enumerate()
        .any(|(i, s)| *s == "." || *s == ".." || (s.is_empty() && i != last));
    if malformed {
        return Err(RedirectError::MalformedSuffix(suffix.to_string()));
    }
    Ok(())
}
