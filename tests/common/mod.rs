//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use subdomainify::compose::UrlComposer;
use subdomainify::config::{AppConfig, DefaultUrlOptions, ResourceConfig, RewriteConfig, RootConfig};
use subdomainify::http::AppServer;
use subdomainify::lifecycle::Shutdown;
use subdomainify::rewrite::PathRewriter;
use subdomainify::routing::RouteTable;

pub fn resource(name: &str) -> ResourceConfig {
    ResourceConfig {
        name: name.to_string(),
        ..Default::default()
    }
}

/// `baz` and `hoge` on the bare host, `foo` (with nested `bar`) on
/// subdomains.
pub fn sample_resources() -> Vec<ResourceConfig> {
    let mut foo = resource("foo");
    foo.subdomain = true;
    foo.nested.push(resource("bar"));
    vec![resource("baz"), resource("hoge"), foo]
}

pub fn sample_config() -> AppConfig {
    AppConfig {
        resources: sample_resources(),
        ..Default::default()
    }
}

pub fn sample_table() -> Arc<RouteTable> {
    Arc::new(sample_config().route_table())
}

pub fn rewriter(table: Arc<RouteTable>) -> PathRewriter {
    PathRewriter::new(table, RewriteConfig::default())
}

pub fn composer(defaults: DefaultUrlOptions) -> UrlComposer {
    let config = AppConfig {
        url_defaults: defaults,
        ..sample_config()
    };
    UrlComposer::from_config(Arc::new(config.route_table()), &config)
}

/// Blog application: `pages` on the bare host, `blogs` with nested
/// `articles` on subdomains.
pub fn blog_config() -> AppConfig {
    let mut blogs = resource("blogs");
    blogs.subdomain = true;
    blogs.nested.push(resource("articles"));

    let mut pages = resource("pages");
    pages.only = Some(vec!["index".to_string(), "show".to_string()]);

    AppConfig {
        root: Some(RootConfig {
            resource: "pages".to_string(),
            action: "index".to_string(),
        }),
        resources: vec![pages, blogs],
        ..Default::default()
    }
}

/// Start the server on an ephemeral port.
pub async fn start_server(config: AppConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();

    let server = AppServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}
