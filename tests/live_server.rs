//! Gateway served on a real socket.

use reqwest::redirect::Policy;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use catalog_gateway::http::{Dispatcher, HttpServer};
use catalog_gateway::lifecycle::Shutdown;
use catalog_gateway::routing::build_registry;
use catalog_gateway::security::TokenGate;

mod common;

#[tokio::test]
async fn test_live_redirect_and_shutdown() {
    let config = common::test_config();
    let registry = build_registry(&config.routing).unwrap();
    let catalog = common::echo_catalog(&config);
    let gate = Arc::new(TokenGate::from_config(&config.auth));
    let dispatcher = Arc::new(Dispatcher::new(Arc::new(registry), catalog, gate).unwrap());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, dispatcher);
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let client = reqwest::Client::builder()
        .redirect(Policy::none())
        .no_proxy()
        .build()
        .unwrap();

    let res = client
        .get(format!("http://{}/resources/abc?lang=fr", addr))
        .send()
        .await
        .expect("gateway unreachable");
    assert_eq!(res.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(res.headers()["location"], "/api/v1/resources/abc?lang=fr");
    assert!(res.headers().contains_key("x-request-id"));

    let res = client
        .get(format!("http://{}/api/admin/git_hash", addr))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["x-request-id"], "trace-me");
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["route"], "dev_get_git_hash");

    drop(client);
    shutdown.trigger();
    let stopped = tokio::time::timeout(Duration::from_secs(5), handle).await;
    assert!(matches!(stopped, Ok(Ok(Ok(())))));
}
