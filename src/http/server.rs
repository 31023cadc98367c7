//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the dispatcher as its only handler
//! - Wire up middleware (request ID, tracing, limits, timeout, headers)
//! - Serve plain HTTP or TLS on the given listener
//! - Drain in-flight requests on shutdown

use axum::Router;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::http::dispatcher::{dispatch_request, Dispatcher};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::net::tls::load_tls_config;
use crate::observability::spans::RequestSpan;
use crate::security::headers::with_security_headers;

/// HTTP server for the catalog gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    pub fn new(config: GatewayConfig, dispatcher: Arc<Dispatcher>) -> Self {
        let router = Self::build_router(&config, dispatcher);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, dispatcher: Arc<Dispatcher>) -> Router {
        let mut router = Router::new().fallback(dispatch_request).with_state(dispatcher);
        if config.security.enable_headers {
            router = with_security_headers(router);
        }

        // Last layer added runs first: the ID must exist before the span.
        router
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(GlobalConcurrencyLimitLayer::new(config.listener.max_connections))
            .layer(TraceLayer::new_for_http().make_span_with(RequestSpan))
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for in-process requests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until `shutdown` fires.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let app = self.router.into_make_service();

        match &self.config.listener.tls {
            None => {
                tracing::info!(address = %addr, "HTTP server starting");
                axum::serve(listener, app)
                    .with_graceful_shutdown(async move {
                        let _ = shutdown.recv().await;
                    })
                    .await?;
            }
            Some(tls) => {
                let rustls = load_tls_config(Path::new(&tls.cert_path), Path::new(&tls.key_path)).await?;
                let handle = axum_server::Handle::new();
                let grace = Duration::from_secs(self.config.timeouts.shutdown_grace_secs);

                let signal = handle.clone();
                tokio::spawn(async move {
                    let _ = shutdown.recv().await;
                    signal.graceful_shutdown(Some(grace));
                });

                tracing::info!(address = %addr, "HTTPS server starting");
                axum_server::from_tcp_rustls(listener.into_std()?, rustls)
                    .handle(handle)
                    .serve(app)
                    .await?;
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
