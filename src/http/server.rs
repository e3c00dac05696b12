//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the route table and link composer from configuration
//! - Create the Axum router with the dispatch handler
//! - Wire up middleware (timeout, tracing, request ID)
//! - Wrap everything in the subdomain rewrite layer
//! - Serve on a listener until shutdown is signalled

use axum::{extract::Request, routing::any, Router, ServiceExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::Layer;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::compose::UrlComposer;
use crate::config::AppConfig;
use crate::http::handlers::dispatch;
use crate::http::request::MakeRequestUuid;
use crate::rewrite::{PathRewriter, SubdomainRewrite, SubdomainRewriteLayer};
use crate::routing::RouteTable;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<RouteTable>,
    pub composer: Arc<UrlComposer>,
}

/// HTTP server hosting the route table behind the rewrite layer.
pub struct AppServer {
    service: SubdomainRewrite<Router>,
    config: AppConfig,
    table: Arc<RouteTable>,
}

impl AppServer {
    /// Create a new server with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let table = Arc::new(config.route_table());
        let composer = Arc::new(UrlComposer::from_config(table.clone(), &config));

        let state = AppState {
            table: table.clone(),
            composer,
        };

        let router = Self::build_router(&config, state);
        let rewriter = PathRewriter::new(table.clone(), config.rewrite.clone());
        let service = SubdomainRewriteLayer::new(rewriter).layer(router);

        Self {
            service,
            config,
            table,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            // Outermost: the ID must exist before tracing and propagation see the request.
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The complete request pipeline, rewrite layer included.
    pub fn service(&self) -> SubdomainRewrite<Router> {
        self.service.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.table.len(),
            "HTTP server starting"
        );

        let app = ServiceExt::<Request>::into_make_service(self.service);

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
