//! HTTP server integration tests.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceExt;

use subdomainify::config::{AppConfig, RootConfig};
use subdomainify::http::{AppServer, X_REQUEST_ID};
use subdomainify::lifecycle::Shutdown;

mod common;

async fn get(host: &str, path: &str) -> (StatusCode, Value) {
    get_with(common::blog_config(), host, path).await
}

async fn get_with(config: AppConfig, host: &str, path: &str) -> (StatusCode, Value) {
    let server = AppServer::new(config);
    let request = Request::builder()
        .uri(path)
        .header("Host", host)
        .body(Body::empty())
        .unwrap();

    let response = server.service().oneshot(request).await.unwrap();
    let status = response.status();
    assert!(response.headers().contains_key(X_REQUEST_ID));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_subdomain_request_is_dispatched_to_nested_route() {
    let (status, body) = get("alice.example.com", "/articles/3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["route"], "blog_article");
    assert_eq!(body["resource"], "articles");
    assert_eq!(body["action"], "show");
    assert_eq!(body["realm"], "subdomain");
    assert_eq!(body["params"]["blog_id"], "alice");
    assert_eq!(body["params"]["id"], "3");
    assert_eq!(body["path"], "/blogs/alice/articles/3");
    assert_eq!(body["original_path"], "/articles/3");
    assert_eq!(body["subdomain"], "alice");
    assert_eq!(body["url"], "http://alice.example.com/articles/3");
}

#[tokio::test]
async fn test_subdomain_root_is_the_member_page() {
    let (status, body) = get("alice.example.com", "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resource"], "blogs");
    assert_eq!(body["action"], "show");
    assert_eq!(body["params"]["id"], "alice");
    assert_eq!(body["url"], "http://alice.example.com/");
}

#[tokio::test]
async fn test_bare_host_is_not_rewritten() {
    let (status, body) = get("example.com", "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["route"], "root");
    assert_eq!(body["resource"], "pages");
    assert_eq!(body["realm"], "bare");
    assert_eq!(body["path"], "/");
    assert!(body["subdomain"].is_null());
    assert_eq!(body["url"], "/");
}

#[tokio::test]
async fn test_realm_follows_the_target_not_the_matched_route() {
    let config = AppConfig {
        root: Some(RootConfig {
            resource: "blogs".to_string(),
            action: "index".to_string(),
        }),
        ..common::blog_config()
    };
    let (status, body) = get_with(config, "example.com", "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["route"], "root");
    assert_eq!(body["resource"], "blogs");
    assert_eq!(body["realm"], "subdomain");
    assert_eq!(body["url"], "/");
}

#[tokio::test]
async fn test_encoded_id_round_trips() {
    let (status, body) = get("example.com", "/pages/a%2Fb").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["params"]["id"], "a/b");
    assert_eq!(body["url"], "/pages/a%2Fb");
}

#[tokio::test]
async fn test_www_host_reaches_canonical_path() {
    let (status, body) = get("www.example.com", "/blogs/alice/articles").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resource"], "articles");
    assert_eq!(body["action"], "index");
    assert_eq!(body["original_path"], "/blogs/alice/articles");
}

#[tokio::test]
async fn test_unmatched_path_is_404() {
    let (status, body) = get("alice.example.com", "/assets/app.css").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["path"], "/assets/app.css");
}

#[tokio::test]
async fn test_client_request_id_is_kept() {
    let server = AppServer::new(common::blog_config());
    let request = Request::builder()
        .uri("/pages/about")
        .header("Host", "example.com")
        .header(X_REQUEST_ID, "req-42")
        .body(Body::empty())
        .unwrap();

    let response = server.service().oneshot(request).await.unwrap();
    assert_eq!(response.headers()[X_REQUEST_ID], "req-42");
}

#[tokio::test]
async fn test_serves_over_tcp() {
    let (addr, shutdown) = common::start_server(common::blog_config()).await;

    let response = reqwest::get(format!("http://{}/pages/about", addr)).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["resource"], "pages");
    assert_eq!(body["action"], "show");
    assert_eq!(body["params"]["id"], "about");

    shutdown.trigger();
}

#[tokio::test]
async fn test_graceful_shutdown() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let shutdown = Shutdown::new();
    let server = AppServer::new(common::blog_config());

    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));
    shutdown.trigger();

    let result = tokio::time::timeout(Duration::from_secs(5), handle).await;
    assert!(matches!(result, Ok(Ok(Ok(())))));
}
