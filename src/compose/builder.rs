//! Subdomain-unaware URL building.
//!
//! # Responsibilities
//! - Define the `UrlBuilder` seam the composer delegates to
//! - Provide `RouteUrlBuilder`, which turns options into a path or an
//!   absolute URL using the route table
//!
//! # Design Decisions
//! - Generation uses the first route (table order) whose required
//!   parameters are all available
//! - Leftover parameters become a sorted query string
//! - Path-only output unless `only_path` is explicitly false
//! - Parameter values are percent-encoded into their own segment

use std::collections::BTreeMap;
use std::sync::Arc;
use url::form_urlencoded;

use crate::compose::error::ComposeError;
use crate::compose::options::{SubdomainOption, UrlOptions};
use crate::rewrite::host::{domain_of, is_valid_subdomain, split_port};
use crate::routing::table::RouteTable;

/// The underlying URL builder the composer wraps.
pub trait UrlBuilder: Send + Sync {
    /// Build a URL (or path) for `options`.
    fn url_for(&self, options: &UrlOptions) -> Result<String, ComposeError>;
}

impl<F> UrlBuilder for F
where
    F: Fn(&UrlOptions) -> Result<String, ComposeError> + Send + Sync,
{
    fn url_for(&self, options: &UrlOptions) -> Result<String, ComposeError> {
        self(options)
    }
}

/// `UrlBuilder` backed by a `RouteTable`.
#[derive(Debug, Clone)]
pub struct RouteUrlBuilder {
    table: Arc<RouteTable>,
    tld_length: usize,
}

impl RouteUrlBuilder {
    pub fn new(table: Arc<RouteTable>, tld_length: usize) -> Self {
        Self { table, tld_length }
    }

    fn path_for(&self, options: &UrlOptions) -> Result<String, ComposeError> {
        let key = options
            .action_key()
            .or_else(|| options.recall.as_ref().and_then(|r| r.action_key()))
            .ok_or(ComposeError::MissingTarget)?;

        let route = self
            .table
            .matching(&key)
            .find(|r| r.pattern().required_params().all(|p| options.lookup(p).is_some()))
            .ok_or_else(|| ComposeError::NoRouteMatches {
                resource: key.resource.clone(),
                action: key.action.clone(),
            })?;

        let mut path_params = BTreeMap::new();
        for name in route.pattern().required_params() {
            if let Some(value) = options.lookup(name) {
                // Dot segments would be resolved away by any URL parser.
                if value == "." || value == ".." {
                    return Err(ComposeError::InvalidPathParam {
                        name: name.to_string(),
                        value: value.to_string(),
                    });
                }
                path_params.insert(name.to_string(), value.to_string());
            }
        }
        let mut path = route.pattern().format(&path_params);

        let mut query = form_urlencoded::Serializer::new(String::new());
        let mut has_query = false;
        let leftover_id = options.id.iter().filter(|_| !path_params.contains_key("id"));
        for id in leftover_id {
            query.append_pair("id", id);
            has_query = true;
        }
        for (name, value) in &options.params {
            if !path_params.contains_key(name) {
                query.append_pair(name, value);
                has_query = true;
            }
        }
        if has_query {
            path.push('?');
            path.push_str(&query.finish());
        }

        if let Some(anchor) = options.anchor.as_deref().filter(|a| !a.is_empty()) {
            path.push('#');
            path.push_str(anchor);
        }

        Ok(path)
    }

    fn authority_for(&self, options: &UrlOptions) -> Result<String, ComposeError> {
        let host = options
            .host
            .as_deref()
            .filter(|h| !h.is_empty())
            .ok_or(ComposeError::MissingHost)?;
        let (name, host_port) = split_port(host);

        let name = match &options.subdomain {
            SubdomainOption::Keep => name.to_string(),
            SubdomainOption::Remove => domain_of(name, self.tld_length),
            SubdomainOption::Label(label) if label.is_empty() => domain_of(name, self.tld_length),
            SubdomainOption::Label(label) if is_valid_subdomain(label) => {
                format!("{}.{}", label, domain_of(name, self.tld_length))
            }
            SubdomainOption::Label(label) => {
                return Err(ComposeError::InvalidSubdomain { label: label.clone() });
            }
        };

        let port = options.port.map(|p| p.to_string()).or(host_port.map(str::to_string));
        Ok(match port {
            Some(port) => format!("{}:{}", name, port),
            None => name,
        })
    }
}

impl UrlBuilder for RouteUrlBuilder {
    fn url_for(&self, options: &UrlOptions) -> Result<String, ComposeError> {
        let path = self.path_for(options)?;
        if options.only_path.unwrap_or(true) {
            return Ok(path);
        }

        let scheme = options.scheme.as_deref().unwrap_or("http");
        let authority = self.authority_for(options)?;
        Ok(format!("{}://{}{}", scheme, authority, path))
    }
}
