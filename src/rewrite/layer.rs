//! Tower middleware applying `PathRewriter` before routing.
//!
//! # Responsibilities
//! - Read the request host (`Host` header, falling back to the URI authority)
//! - Replace the URI path with the rewritten path, keeping the query string
//! - Record the original path and resolved subdomain as request extensions
//!
//! # Design Decisions
//! - Wraps the whole router (not a route layer) so matching sees the
//!   rewritten path
//! - Never rejects a request: an unbuildable URI is logged and the request
//!   passes through untouched

use axum::http::uri::PathAndQuery;
use axum::http::{header, Request, Uri};
use std::task::{Context, Poll};
use tower::{Layer, Service};

use crate::observability::metrics;
use crate::rewrite::rewriter::{PathRewriter, RewriteOutcome};

/// The request path as received, before rewriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalPath(pub String);

/// The subdomain label that triggered a rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSubdomain(pub String);

/// Layer that applies [`SubdomainRewrite`] to the wrapped service.
#[derive(Debug, Clone)]
pub struct SubdomainRewriteLayer {
    rewriter: PathRewriter,
}

impl SubdomainRewriteLayer {
    pub fn new(rewriter: PathRewriter) -> Self {
        Self { rewriter }
    }
}

impl<S> Layer<S> for SubdomainRewriteLayer {
    type Service = SubdomainRewrite<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SubdomainRewrite {
            inner,
            rewriter: self.rewriter.clone(),
        }
    }
}

/// Middleware service rewriting the request path from the host subdomain.
#[derive(Debug, Clone)]
pub struct SubdomainRewrite<S> {
    inner: S,
    rewriter: PathRewriter,
}

impl<S, B> Service<Request<B>> for SubdomainRewrite<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let host = request_host(&req).unwrap_or_default();
        let path = req.uri().path().to_string();
        let rewrite = self.rewriter.evaluate(&host, &path);
        metrics::record_rewrite(&rewrite.outcome);

        if let RewriteOutcome::Rewritten { subdomain } = rewrite.outcome {
            match with_path(req.uri(), &rewrite.path) {
                Some(uri) => {
                    tracing::debug!(
                        host = %host,
                        subdomain = %subdomain,
                        from = %path,
                        to = %rewrite.path,
                        "Rewrote request path"
                    );
                    *req.uri_mut() = uri;
                    req.extensions_mut().insert(RequestSubdomain(subdomain));
                }
                None => {
                    tracing::warn!(
                        host = %host,
                        path = %rewrite.path,
                        "Rewritten path is not a valid URI, passing request through"
                    );
                }
            }
        } else {
            tracing::trace!(host = %host, path = %path, outcome = rewrite.outcome.as_str(), "Path not rewritten");
        }

        req.extensions_mut().insert(OriginalPath(path));
        self.inner.call(req)
    }
}

/// Host the request was addressed to, including any port.
pub fn request_host<B>(req: &Request<B>) -> Option<String> {
    req.headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .or_else(|| req.uri().authority().map(|a| a.as_str().to_string()))
}

/// Replace the path of `uri`, keeping scheme, authority and query.
fn with_path(uri: &Uri, path: &str) -> Option<Uri> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse::<PathAndQuery>().ok()?);
    Uri::from_parts(parts).ok()
}
