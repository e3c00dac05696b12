//! Subdomain-aware URL composition.
//!
//! # Responsibilities
//! - Decide whether a link needs the subdomain form (explicit flag or
//!   realm transfer)
//! - Resolve the subdomain label from the link's ids or the configured default
//! - Delegate building to a `UrlBuilder`, then strip the anchor route's
//!   prefix from the resulting path
//!
//! # Design Decisions
//! - Wraps the builder instead of replacing it; bare links pass straight
//!   through
//! - Subdomain links are always absolute
//! - Errors propagate to the caller: a wrong link is worse than no link

use std::sync::Arc;
use url::Url;

use crate::compose::builder::{RouteUrlBuilder, UrlBuilder};
use crate::compose::error::ComposeError;
use crate::compose::options::{SubdomainOption, UrlOptions};
use crate::config::schema::{AppConfig, DefaultUrlOptions, RewriteConfig};
use crate::observability::metrics;
use crate::rewrite::host::is_valid_subdomain;
use crate::routing::realm::{realm_of, Realm};
use crate::routing::table::RouteTable;

/// Link generator that understands subdomain realms.
#[derive(Debug, Clone)]
pub struct UrlComposer<B = RouteUrlBuilder> {
    table: Arc<RouteTable>,
    builder: B,
    defaults: DefaultUrlOptions,
    reserved_labels: Vec<String>,
}

impl UrlComposer<RouteUrlBuilder> {
    /// Composer using the table-backed builder and the configured defaults.
    pub fn from_config(table: Arc<RouteTable>, config: &AppConfig) -> Self {
        let builder = RouteUrlBuilder::new(table.clone(), config.rewrite.tld_length);
        Self::new(table, builder, config.url_defaults.clone())
            .with_reserved_labels(config.rewrite.reserved_labels.clone())
    }
}

impl<B: UrlBuilder> UrlComposer<B> {
    pub fn new(table: Arc<RouteTable>, builder: B, defaults: DefaultUrlOptions) -> Self {
        Self {
            table,
            builder,
            defaults,
            reserved_labels: RewriteConfig::default().reserved_labels,
        }
    }

    /// Labels that address the bare realm; links on these hosts keep the
    /// full canonical path.
    pub fn with_reserved_labels(mut self, labels: Vec<String>) -> Self {
        self.reserved_labels = labels;
        self
    }

    pub fn defaults(&self) -> &DefaultUrlOptions {
        &self.defaults
    }

    /// Whether `options` must be composed in subdomain form: either the
    /// caller asked for it, or the target and recall realms differ.
    pub fn needs_subdomain(&self, options: &UrlOptions) -> bool {
        if options.subdomainify {
            return true;
        }

        let target = realm_of(options.action_key().as_ref(), &self.table);
        let recall_key = options.recall.as_ref().and_then(|r| r.action_key());
        let current = realm_of(recall_key.as_ref(), &self.table);
        target != current
    }

    /// Compose a link for `options`.
    pub fn compose(&self, options: &UrlOptions) -> Result<String, ComposeError> {
        let result = self.compose_inner(options);
        if let Err(e) = &result {
            metrics::record_compose_error(e);
            tracing::debug!(error = %e, "Link composition failed");
        }
        result
    }

    fn compose_inner(&self, options: &UrlOptions) -> Result<String, ComposeError> {
        let mut options = options.clone().with_defaults(&self.defaults);

        if !self.needs_subdomain(&options) {
            let url = self.builder.url_for(&options)?;
            metrics::record_compose(Realm::Bare);
            return Ok(url);
        }

        options.only_path = Some(false);

        let anchor = self
            .table
            .topmost_subdomain_route()
            .ok_or(ComposeError::NoSubdomainRoute)?;
        let placeholder = anchor.placeholder_key();
        let subdomain_id = options.lookup(&placeholder).or_else(|| options.lookup("id"));

        let label = match subdomain_id {
            Some(id) if options.subdomainify => Some(id.to_string()),
            _ if options.subdomainify && self.defaults.subdomain.is_none() => {
                return Err(ComposeError::MissingSubdomainId { placeholder });
            }
            _ => self.defaults.subdomain.clone(),
        };
        if let Some(label) = label.as_deref().filter(|l| !is_valid_subdomain(l)) {
            return Err(ComposeError::InvalidSubdomain {
                label: label.to_string(),
            });
        }

        options.subdomain = match &label {
            Some(label) => SubdomainOption::Label(label.clone()),
            None => SubdomainOption::Remove,
        };

        let built = self.builder.url_for(&options)?;
        let url = match label {
            Some(label) if !self.is_reserved(&label) => {
                let prefix = anchor.pattern().format_id(&label);
                strip_path_prefix(&built, &prefix)?
            }
            _ => built,
        };

        tracing::debug!(
            target_key = ?options.action_key(),
            explicit = options.subdomainify,
            url = %url,
            "Composed subdomain URL"
        );
        metrics::record_compose(Realm::Subdomain);
        Ok(url)
    }

    fn is_reserved(&self, label: &str) -> bool {
        self.reserved_labels.iter().any(|r| r.eq_ignore_ascii_case(label))
    }
}

/// Remove `prefix` (and the separator after it) from the path of `url`.
///
/// The prefix must end on a segment boundary; `/foo/bar` strips from
/// `/foo/bar/baz` but not from `/foo/barn`.
fn strip_path_prefix(url: &str, prefix: &str) -> Result<String, ComposeError> {
    let mut parsed = Url::parse(url)?;
    if prefix == "/" {
        return Ok(parsed.to_string());
    }

    let stripped = {
        let path = parsed.path();
        if path == prefix {
            Some("/".to_string())
        } else {
            path.strip_prefix(prefix)
                .filter(|rest| rest.starts_with('/'))
                .map(str::to_string)
        }
    };
    if let Some(path) = stripped {
        parsed.set_path(&path);
    }

    Ok(parsed.to_string())
}
