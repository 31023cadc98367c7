//! End-to-end dispatch through the full middleware stack, in process.

use axum::http::{header, Method, StatusCode};
use catalog_gateway::handlers::{default_catalog, objects::ObjectStores};

mod common;
use common::{echo_router, router, send, test_config, BACK_OFFICE_TOKEN, DEV_TOKEN, PORTAL_TOKEN};

#[tokio::test]
async fn test_legacy_alias_is_permanent_redirect() {
    let app = echo_router();

    let res = send(&app, Method::GET, "/resources/abc", None).await;
    assert_eq!(res.status, StatusCode::PERMANENT_REDIRECT);
    assert_eq!(res.location(), Some("/api/v1/resources/abc"));

    let res = send(&app, Method::PUT, "/resources/abc/report?x=1", None).await;
    assert_eq!(res.status, StatusCode::PERMANENT_REDIRECT);
    assert_eq!(res.location(), Some("/api/v1/resources/abc/report?x=1"));
}

#[tokio::test]
async fn test_root_redirects_keep_query() {
    let app = echo_router();

    let res = send(&app, Method::GET, "/api", None).await;
    assert_eq!(res.status, StatusCode::FOUND);
    assert_eq!(res.location(), Some("/api/v1/resources"));

    let res = send(&app, Method::GET, "/api/v1?limit=5&offset=10", None).await;
    assert_eq!(res.status, StatusCode::FOUND);
    assert_eq!(res.location(), Some("/api/v1/resources?limit=5&offset=10"));
}

#[tokio::test]
async fn test_malformed_alias_suffix_is_not_found() {
    let app = echo_router();
    let res = send(&app, Method::GET, "/resources/../admin", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert!(res.location().is_none());
}

#[tokio::test]
async fn test_public_routes_bind_params() {
    let app = echo_router();

    let res = send(&app, Method::GET, "/api/v1/resources/abc?fields=title", None).await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["route"], "pub_get_one_metadata");
    assert_eq!(body["params"]["id"], "abc");
    assert_eq!(body["identity"], "anonymous");
    assert_eq!(body["query"], "fields=title");

    let res = send(&app, Method::GET, "/api/v1/resources/search", None).await;
    assert_eq!(res.json()["route"], "pub_search_metadata");

    let res = send(&app, Method::GET, "/api/v1/pub_keys/k1/owner", None).await;
    let body = res.json();
    assert_eq!(body["route"], "pub_get_one_pub_key_prop");
    assert_eq!(body["params"]["prop"], "owner");
}

#[tokio::test]
async fn test_reports_beat_generic_property() {
    let app = echo_router();

    let res = send(&app, Method::GET, "/api/admin/resources/abc/reports", Some(BACK_OFFICE_TOKEN)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["route"], "prv_get_obj_report_list");

    let res = send(&app, Method::GET, "/api/admin/resources/abc/title", Some(BACK_OFFICE_TOKEN)).await;
    let body = res.json();
    assert_eq!(body["route"], "prv_get_one_prop");
    assert_eq!(body["params"]["object"], "resources");
    assert_eq!(body["params"]["prop"], "title");
}

#[tokio::test]
async fn test_dev_literal_beats_back_office_generic() {
    let app = echo_router();

    let res = send(&app, Method::GET, "/api/admin/uuid", Some(DEV_TOKEN)).await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["route"], "dev_generate_uuid");
    assert_eq!(body["tier"], "dev");

    // Still the dev route: the back-office token does not open it.
    let res = send(&app, Method::GET, "/api/admin/uuid", Some(BACK_OFFICE_TOKEN)).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_method_not_allowed_lists_methods() {
    let app = echo_router();
    let res = send(&app, Method::PATCH, "/api/admin/resources/abc/reports/r1", None).await;
    assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers[header::ALLOW], "GET, DELETE");
    assert_eq!(res.json()["error"], "Method Not Allowed");

    let res = send(&app, Method::DELETE, "/api/v1/resources/abc", None).await;
    assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers[header::ALLOW], "GET");
}

#[tokio::test]
async fn test_head_follows_get_routes() {
    let app = echo_router();

    let res = send(&app, Method::HEAD, "/api/v1/resources", None).await;
    assert_eq!(res.status, StatusCode::OK);

    let res = send(&app, Method::HEAD, "/resources/abc", None).await;
    assert_eq!(res.status, StatusCode::PERMANENT_REDIRECT);
    assert_eq!(res.location(), Some("/api/v1/resources/abc"));

    let res = send(&app, Method::HEAD, "/api/admin/resources", None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = send(&app, Method::HEAD, "/nowhere", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_path_is_json_not_found() {
    let app = echo_router();
    let res = send(&app, Method::GET, "/nowhere/at/all", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    let body = res.json();
    assert_eq!(body["error"], "Not Found");
    assert!(body["message"].as_str().unwrap().contains("/nowhere/at/all"));
}

#[tokio::test]
async fn test_tier_gates() {
    let app = echo_router();

    let res = send(&app, Method::GET, "/api/admin/resources", None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.headers[header::WWW_AUTHENTICATE], "Bearer");

    let res = send(&app, Method::GET, "/api/admin/resources", Some(PORTAL_TOKEN)).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = send(&app, Method::GET, "/api/admin/resources", Some(DEV_TOKEN)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["identity"], "developer");

    let res = send(&app, Method::GET, "/api/v1/resources/abc/report", Some(PORTAL_TOKEN)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["route"], "portal_get_all_obj_report");

    // Unrestricted private routes never ask for a token.
    let res = send(&app, Method::GET, "/api/admin/env", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["tier"], "unrestricted_private");
}

#[tokio::test]
async fn test_extended_search_route() {
    let app = echo_router();
    let res = send(&app, Method::GET, "/api/admin/contacts/extended_search", Some(BACK_OFFICE_TOKEN)).await;
    let body = res.json();
    assert_eq!(body["route"], "prv_obj_ext_search");
    assert_eq!(body["handler"], "search_objects");
}

#[tokio::test]
async fn test_disabled_dev_tier_falls_back_to_generic() {
    let mut config = test_config();
    config.routing.dev_routes_enabled = false;
    let catalog = common::echo_catalog(&config);
    let app = router(config, catalog);

    let res = send(&app, Method::GET, "/api/admin/uuid", Some(BACK_OFFICE_TOKEN)).await;
    let body = res.json();
    assert_eq!(body["route"], "prv_get_all");
    assert_eq!(body["params"]["object"], "uuid");
}

#[tokio::test]
async fn test_bundled_handlers() {
    let config = test_config();
    let catalog = default_catalog(&config, ObjectStores::new());
    let app = router(config, catalog);

    let res = send(&app, Method::GET, "/api/version", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, env!("CARGO_PKG_VERSION").as_bytes());

    let res = send(&app, Method::GET, "/api/admin/env", None).await;
    assert_eq!(res.body, b"development");

    let res = send(&app, Method::GET, "/api/admin/widgets", Some(BACK_OFFICE_TOKEN)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = send(&app, Method::GET, "/api/admin/media", Some(BACK_OFFICE_TOKEN)).await;
    assert_eq!(res.status, StatusCode::NOT_IMPLEMENTED);

    let res = send(&app, Method::GET, "/api/admin/logs", Some(DEV_TOKEN)).await;
    assert_eq!(res.status, StatusCode::NOT_IMPLEMENTED);
    assert!(res.json()["message"].as_str().unwrap().contains("dev_get_logs"));
}

#[tokio::test]
async fn test_response_headers() {
    let app = echo_router();
    let res = send(&app, Method::GET, "/api/admin/env", None).await;
    assert!(res.headers.contains_key("x-request-id"));
    assert_eq!(res.headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(res.headers[header::X_FRAME_OPTIONS], "DENY");
}
