//! Startup orchestration.
//!
//! # Responsibilities
//! - Compile the route table and log its warnings
//! - Bind every handler name to the catalog
//! - Start the metrics exporter, bind the listener, serve until signalled
//!
//! # Design Decisions
//! - Fail fast: an invalid route table or an unbound handler is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listeners start last (traffic only when ready)

use std::io;
use std::net::{AddrParseError, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::config::{ConfigError, GatewayConfig};
use crate::handlers::objects::ObjectStores;
use crate::handlers::{default_catalog, HandlerCatalog};
use crate::http::{Dispatcher, HttpServer, MissingHandlers};
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::wait_for_termination;
use crate::observability::metrics::init_metrics;
use crate::routing::{build_registry, RegistryError};
use crate::security::{AuthGate, TokenGate};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Handlers(#[from] MissingHandlers),
    #[error("failed to initialize logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
    #[error("invalid address: {0}")]
    Address(#[from] AddrParseError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}

/// Compile the route table and bind it to `handlers` behind `gate`.
pub fn assemble(
    config: &GatewayConfig,
    handlers: HandlerCatalog,
    gate: Arc<dyn AuthGate>,
) -> Result<Arc<Dispatcher>, StartupError> {
    let registry = build_registry(&config.routing)?;
    registry.log_warnings();
    for field in config.auth.placeholder_tokens() {
        tracing::warn!(
            field,
            "Auth token still holds its placeholder value; credentialed tiers accept a publicly known token"
        );
    }
    tracing::info!(
        routes = registry.len(),
        strategy = ?registry.strategy(),
        "Route table compiled"
    );

    let dispatcher = Dispatcher::new(Arc::new(registry), handlers, gate)?;
    Ok(Arc::new(dispatcher))
}

/// Assemble with the bundled handlers and the configured tokens.
pub fn assemble_default(config: &GatewayConfig) -> Result<Arc<Dispatcher>, StartupError> {
    assemble(
        config,
        default_catalog(config, ObjectStores::new()),
        Arc::new(TokenGate::from_config(&config.auth)),
    )
}

/// Serve until a termination signal, then drain for the grace period.
pub async fn serve(config: GatewayConfig, dispatcher: Arc<Dispatcher>) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            addr: config.listener.bind_address.clone(),
            source,
        })?;
    tracing::info!(
        address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        request_timeout_secs = config.timeouts.request_secs,
        "Listening for connections"
    );

    let grace = Duration::from_secs(config.timeouts.shutdown_grace_secs);
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, dispatcher);
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        joined = &mut server_task => return flatten(joined),
        signal = wait_for_termination() => match signal {
            Ok(name) => tracing::info!(signal = name, "Shutdown signal received"),
            Err(e) => tracing::warn!(error = %e, "Signal handler failed, shutting down"),
        },
    }

    shutdown.trigger();
    match tokio::time::timeout(grace, server_task).await {
        Ok(joined) => flatten(joined),
        Err(_) => {
            tracing::warn!(grace_secs = grace.as_secs(), "Grace period elapsed with requests in flight");
            Ok(())
        }
    }
}

fn flatten(joined: Result<io::Result<()>, tokio::task::JoinError>) -> Result<(), StartupError> {
    match joined {
        Ok(result) => result.map_err(StartupError::Serve),
        Err(e) => Err(StartupError::Serve(io::Error::other(e))),
    }
}
