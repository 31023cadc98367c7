//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::MatchStrategy;

/// Root configuration for the catalog gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, TLS).
    pub listener: ListenerConfig,

    /// Route table prefixes, tier toggles and match strategy.
    pub routing: RoutingConfig,

    /// Tokens checked by the bundled auth gate.
    pub auth: AuthConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Values served by the diagnostic handlers.
    pub system: SystemConfig,

    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3030").
    pub bind_address: String,

    /// Optional TLS configuration.
    pub tls: Option<TlsConfig>,

    /// Maximum requests processed concurrently (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3030".to_string(),
            tls: None,
            max_connections: 10_000,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Route table configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// How overlapping routes are ranked.
    pub match_strategy: MatchStrategy,

    /// Versioned public API prefix.
    pub public_prefix: String,

    /// Back-office and maintenance prefix.
    pub private_prefix: String,

    /// Monitoring/check prefix.
    pub check_prefix: String,

    /// Path answering the API version.
    pub api_version_path: String,

    /// Register the developer/maintenance tier.
    pub dev_routes_enabled: bool,

    /// Register the portal tier.
    pub portal_routes_enabled: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            match_strategy: MatchStrategy::Specificity,
            public_prefix: "/api/v1".to_string(),
            private_prefix: "/api/admin".to_string(),
            check_prefix: "/api/check".to_string(),
            api_version_path: "/api/version".to_string(),
            dev_routes_enabled: true,
            portal_routes_enabled: true,
        }
    }
}

/// Bearer tokens accepted per tier by the bundled gate.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Tokens issued by the portal.
    pub portal_tokens: Vec<String>,

    /// Back-office token.
    pub back_office_token: String,

    /// Administrative token (also accepted for back-office routes).
    pub dev_token: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            portal_tokens: Vec::new(),
            // WARNING: These are placeholders! Change them in production.
            back_office_token: "CHANGE_ME_BACK_OFFICE".to_string(),
            dev_token: "CHANGE_ME_DEV".to_string(),
        }
    }
}

/// Prefix shared by the shipped placeholder tokens.
pub const PLACEHOLDER_TOKEN_PREFIX: &str = "CHANGE_ME";

impl AuthConfig {
    /// Token fields still holding a shipped placeholder value.
    pub fn placeholder_tokens(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.back_office_token.starts_with(PLACEHOLDER_TOKEN_PREFIX) {
            fields.push("back_office_token");
        }
        if self.dev_token.starts_with(PLACEHOLDER_TOKEN_PREFIX) {
            fields.push("dev_token");
        }
        if self.portal_tokens.iter().any(|t| t.starts_with(PLACEHOLDER_TOKEN_PREFIX)) {
            fields.push("portal_tokens");
        }
        fields
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Grace period for in-flight requests on shutdown, in seconds.
    pub shutdown_grace_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            shutdown_grace_secs: 10,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Values reported by the diagnostic endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Deployment environment name.
    pub app_env: String,

    /// Git hash of the deployed sources.
    pub git_hash: String,

    /// Git hash the running binary was built from.
    pub app_hash: String,

    /// Favicon file served on `/favicon.png`.
    pub favicon_path: Option<String>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            app_env: "development".to_string(),
            git_hash: "unknown".to_string(),
            app_hash: "unknown".to_string(),
            favicon_path: None,
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable security headers.
    pub enable_headers: bool,
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_tokens_reported() {
        let mut auth = AuthConfig::default();
        assert_eq!(auth.placeholder_tokens(), vec!["back_office_token", "dev_token"]);

        auth.back_office_token = "s3cret-bo".into();
        auth.dev_token = "s3cret-dev".into();
        auth.portal_tokens = vec!["CHANGE_ME_PORTAL".into()];
        assert_eq!(auth.placeholder_tokens(), vec!["portal_tokens"]);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [routing]
            match_strategy = "registration_order"
            dev_routes_enabled = false

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.routing.match_strategy, MatchStrategy::RegistrationOrder);
        assert!(!config.routing.dev_routes_enabled);
        assert!(config.routing.portal_routes_enabled);
        assert_eq!(config.routing.public_prefix, "/api/v1");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.listener.bind_address, "0.0.0.0:3030");
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let parsed: Result<GatewayConfig, _> = toml::from_str("[routing]\nmatch_strategy = \"random\"\n");
        assert!(parsed.is_err());
    }
}
