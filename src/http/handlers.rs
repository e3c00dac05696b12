//! Request dispatch.
//!
//! # Responsibilities
//! - Recognize the (already rewritten) path against the route table
//! - Describe the matched route and its parameters as JSON
//! - Compose the canonical link back to the matched target, using the
//!   matched route as recall context
//!
//! # Design Decisions
//! - A single catch-all handler; the route table is the router
//! - Explicit 404 rather than silent default
//! - A composition failure is reported in the body, not as a 5xx

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::time::Instant;

use crate::compose::options::{Recall, UrlOptions};
use crate::http::request::RequestIdExt;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::rewrite::layer::{request_host, OriginalPath, RequestSubdomain};
use crate::routing::realm::{realm_of, Realm};

/// Body returned for a recognized request.
#[derive(Debug, Serialize)]
pub struct DispatchResponse {
    pub route: Option<String>,
    pub resource: String,
    pub action: String,
    pub realm: Realm,
    pub params: BTreeMap<String, String>,
    pub path: String,
    pub original_path: String,
    pub subdomain: Option<String>,
    pub url: Option<String>,
    pub url_error: Option<String>,
}

/// Catch-all handler.
pub async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id().unwrap_or("unknown").to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let original_path = request
        .extensions()
        .get::<OriginalPath>()
        .map(|p| p.0.clone())
        .unwrap_or_else(|| path.clone());
    let subdomain = request.extensions().get::<RequestSubdomain>().map(|s| s.0.clone());
    let host = request_host(&request);

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        original_path = %original_path,
        "Dispatching request"
    );

    let matched = match state.table.recognize(&method, &path) {
        Some(m) => m,
        None => {
            tracing::warn!(request_id = %request_id, path = %path, "No route matched");
            metrics::record_request(404, start_time);
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "No matching route found", "path": path })),
            )
                .into_response();
        }
    };

    let route = matched.route;
    let realm = realm_of(Some(route.key()), &state.table);

    // Collection routes under a subdomain resource carry no label to link with.
    let labelled = state
        .table
        .topmost_subdomain_route()
        .map(|anchor| {
            matched.params.contains_key(&anchor.placeholder_key()) || matched.params.contains_key("id")
        })
        .unwrap_or(false);

    let recall = Recall::from_match(route, &matched.params);
    let options = UrlOptions {
        resource: recall.resource.clone(),
        action: recall.action.clone(),
        id: recall.id.clone(),
        params: recall.params.clone(),
        subdomainify: route.is_subdomain() && labelled,
        host: state.composer.defaults().host.clone().or(host),
        recall: Some(recall),
        ..Default::default()
    };

    let (url, url_error) = match state.composer.compose(&options) {
        Ok(url) => (Some(url), None),
        Err(e) => {
            tracing::warn!(request_id = %request_id, route = %route, error = %e, "Failed to compose self link");
            (None, Some(e.to_string()))
        }
    };

    let body = DispatchResponse {
        route: route.name().map(str::to_string),
        resource: route.key().resource.clone(),
        action: route.key().action.clone(),
        realm,
        params: matched.params,
        path,
        original_path,
        subdomain,
        url,
        url_error,
    };

    metrics::record_request(200, start_time);
    (StatusCode::OK, Json(body)).into_response()
}
