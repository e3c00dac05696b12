//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! subdomain router. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};

use crate::routing::table::{RouteTable, RESOURCE_ACTIONS};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Inbound path rewriting settings.
    pub rewrite: RewriteConfig,

    /// Defaults merged under every link-generation call.
    pub url_defaults: DefaultUrlOptions,

    /// Optional root route (`GET /`).
    pub root: Option<RootConfig>,

    /// Resource declarations, in precedence order (last = highest).
    pub resources: Vec<ResourceConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Build the immutable route table declared by this configuration.
    pub fn route_table(&self) -> RouteTable {
        let mut builder = RouteTable::builder();
        if let Some(root) = &self.root {
            builder = builder.root(root);
        }
        for resource in &self.resources {
            builder = builder.resources(resource);
        }
        builder.build()
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Inbound rewriting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Path prefixes that are never rewritten (static assets).
    pub excluded_prefixes: Vec<String>,

    /// Subdomain labels that address the bare realm (e.g. "www").
    pub reserved_labels: Vec<String>,

    /// Number of labels in the top-level domain ("com" = 1, "co.uk" = 2).
    pub tld_length: usize,
}

impl RewriteConfig {
    pub fn is_excluded(&self, path: &str) -> bool {
        self.excluded_prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }

    pub fn is_reserved(&self, label: &str) -> bool {
        self.reserved_labels.iter().any(|r| r.eq_ignore_ascii_case(label))
    }
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            excluded_prefixes: vec!["/assets/".to_string()],
            reserved_labels: vec!["www".to_string()],
            tld_length: 1,
        }
    }
}

/// Default link-generation options.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DefaultUrlOptions {
    /// Host used for absolute URLs when a call supplies none.
    pub host: Option<String>,

    /// Port appended to absolute URLs.
    pub port: Option<u16>,

    /// URL scheme for absolute URLs.
    pub scheme: String,

    /// Produce path-only URLs unless a call asks otherwise.
    pub only_path: bool,

    /// Subdomain label used when leaving the subdomain realm without an
    /// explicit id. `None` removes the subdomain from the host.
    pub subdomain: Option<String>,
}

impl Default for DefaultUrlOptions {
    fn default() -> Self {
        Self {
            host: None,
            port: None,
            scheme: "http".to_string(),
            only_path: true,
            subdomain: None,
        }
    }
}

/// Root route declaration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RootConfig {
    /// Resource identifier the root dispatches to.
    pub resource: String,

    /// Action identifier the root dispatches to.
    pub action: String,
}

/// Resourceful route declaration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ResourceConfig {
    /// Plural resource identifier, also the path segment.
    pub name: String,

    /// Restrict to these actions.
    #[serde(default)]
    pub only: Option<Vec<String>>,

    /// Exclude these actions.
    #[serde(default)]
    pub except: Vec<String>,

    /// Mark the resource (and everything nested in it) subdomain-eligible.
    #[serde(default)]
    pub subdomain: bool,

    /// Resources mounted under `/<name>/:<singular>_id`.
    #[serde(default)]
    pub nested: Vec<ResourceConfig>,
}

impl ResourceConfig {
    /// Whether `action` survives the `only`/`except` filters.
    pub fn includes_action(&self, action: &str) -> bool {
        let allowed = match &self.only {
            Some(only) => only.iter().any(|a| a == action),
            None => RESOURCE_ACTIONS.contains(&action),
        };
        allowed && !self.except.iter().any(|a| a == action)
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
