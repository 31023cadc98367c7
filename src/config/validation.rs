//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check route prefixes are well-formed and distinct
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::GatewayConfig;

/// One semantic problem in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field}: `{value}` is not a socket address")]
    InvalidAddress { field: &'static str, value: String },
    #[error("{field}: `{value}` must start with `/` and must not end with `/`")]
    InvalidPrefix { field: &'static str, value: String },
    #[error("routing prefixes `{0}` are used twice")]
    PrefixCollision(String),
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("listener.tls: certificate and key paths must be set")]
    IncompleteTls,
    #[error("auth.{0} must not be empty")]
    EmptyToken(&'static str),
}

/// Validate a configuration, collecting every problem.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::Zero("listener.max_connections"));
    }
    if let Some(tls) = &config.listener.tls {
        if tls.cert_path.is_empty() || tls.key_path.is_empty() {
            errors.push(ValidationError::IncompleteTls);
        }
    }

    let routing = &config.routing;
    let prefixes = [
        ("routing.public_prefix", &routing.public_prefix),
        ("routing.private_prefix", &routing.private_prefix),
        ("routing.check_prefix", &routing.check_prefix),
        ("routing.api_version_path", &routing.api_version_path),
    ];
    for (field, value) in prefixes {
        if !is_valid_prefix(value) {
            errors.push(ValidationError::InvalidPrefix {
                field,
                value: value.clone(),
            });
        }
    }
    for (i, (_, a)) in prefixes.iter().enumerate() {
        if prefixes[i + 1..].iter().any(|(_, b)| a == b) {
            errors.push(ValidationError::PrefixCollision((*a).clone()));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero("security.max_body_size"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.auth.back_office_token.is_empty() {
        errors.push(ValidationError::EmptyToken("back_office_token"));
    }
    if config.auth.dev_token.is_empty() {
        errors.push(ValidationError::EmptyToken("dev_token"));
    }
    if config.auth.portal_tokens.iter().any(String::is_empty) {
        errors.push(ValidationError::EmptyToken("portal_tokens"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_valid_prefix(prefix: &str) -> bool {
    prefix.len() > 1
        && prefix.starts_with('/')
        && !prefix.ends_with('/')
        && !prefix.contains("//")
        && !prefix.contains([':', '*'])
}
