//! Inbound path rewriting.
//!
//! # Responsibilities
//! - Turn `http://foo.example.com/articles/1` into `/blogs/foo/articles/1`
//!   before route matching
//! - Bypass excluded prefixes (static assets), bare hosts and reserved
//!   labels
//!
//! # Design Decisions
//! - Fails open: every inapplicable case passes the path through unchanged
//! - The anchor is the topmost subdomain-eligible route, never a union
//! - Output never contains repeated separators

use std::sync::Arc;

use crate::config::schema::RewriteConfig;
use crate::rewrite::host::subdomain_of;
use crate::routing::table::RouteTable;

/// Why a path was (or was not) rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// The path was prefixed with the anchor route for `subdomain`.
    Rewritten { subdomain: String },
    /// The host carries no subdomain.
    NoSubdomain,
    /// The subdomain is reserved (e.g. `www`).
    Reserved,
    /// The path starts with an excluded prefix.
    Excluded,
    /// The route table has no subdomain-eligible route.
    NoSubdomainRoute,
}

impl RewriteOutcome {
    /// Metric label for this outcome.
    pub fn as_str(&self) -> &'static str {
        match self {
            RewriteOutcome::Rewritten { .. } => "rewritten",
            RewriteOutcome::NoSubdomain => "no_subdomain",
            RewriteOutcome::Reserved => "reserved",
            RewriteOutcome::Excluded => "excluded",
            RewriteOutcome::NoSubdomainRoute => "no_subdomain_route",
        }
    }
}

/// Result of evaluating one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub path: String,
    pub outcome: RewriteOutcome,
}

/// Request-time path rewriter.
#[derive(Debug, Clone)]
pub struct PathRewriter {
    table: Arc<RouteTable>,
    config: RewriteConfig,
}

impl PathRewriter {
    pub fn new(table: Arc<RouteTable>, config: RewriteConfig) -> Self {
        Self { table, config }
    }

    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    pub fn config(&self) -> &RewriteConfig {
        &self.config
    }

    /// Rewrite `path` for a request addressed to `host`.
    pub fn rewrite(&self, host: &str, path: &str) -> String {
        self.evaluate(host, path).path
    }

    /// Rewrite `path` and report which case applied.
    pub fn evaluate(&self, host: &str, path: &str) -> Rewrite {
        let unchanged = |outcome| Rewrite {
            path: path.to_string(),
            outcome,
        };

        let subdomain = match subdomain_of(host, self.config.tld_length) {
            Some(s) => s,
            None => return unchanged(RewriteOutcome::NoSubdomain),
        };
        if self.config.is_reserved(&subdomain) {
            return unchanged(RewriteOutcome::Reserved);
        }
        if self.config.is_excluded(path) {
            return unchanged(RewriteOutcome::Excluded);
        }

        let anchor = match self.table.topmost_subdomain_route() {
            Some(route) => route,
            None => return unchanged(RewriteOutcome::NoSubdomainRoute),
        };

        let prefix = anchor.pattern().format_id(&subdomain);
        Rewrite {
            path: join_paths(&prefix, path),
            outcome: RewriteOutcome::Rewritten { subdomain },
        }
    }
}

/// Join `prefix` and `path`, dropping empty and `/` parts, then collapse
/// runs of `/` into one. Never returns an empty path.
pub fn join_paths(prefix: &str, path: &str) -> String {
    let joined = [prefix, path]
        .iter()
        .filter(|p| !p.is_empty() && **p != "/")
        .copied()
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        return "/".to_string();
    }
    collapse_separators(&joined)
}

/// Collapse every run of `/` into a single `/`.
pub fn collapse_separators(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_slash = false;
    for c in path.chars() {
        if c == '/' {
            if previous_slash {
                continue;
            }
            previous_slash = true;
        } else {
            previous_slash = false;
        }
        out.push(c);
    }
    out
}
