//! Route definitions.
//!
//! # Responsibilities
//! - Describe one registered route (method, pattern, action key, name)
//! - Carry the subdomain-eligibility annotation as a typed field
//!
//! # Design Decisions
//! - Routes are immutable once built into a `RouteTable`
//! - Precedence is not stored on the route; it is the route's position
//!   in the table

use axum::http::Method;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::routing::inflect::singularize;
use crate::routing::pattern::RoutePattern;

/// The (resource, action) pair a route dispatches to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionKey {
    pub resource: String,
    pub action: String,
}

impl ActionKey {
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
        }
    }

    /// A key with an empty resource or action identifies nothing.
    pub fn is_empty(&self) -> bool {
        self.resource.is_empty() || self.action.is_empty()
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.resource, self.action)
    }
}

/// A single registered route.
#[derive(Debug, Clone)]
pub struct Route {
    method: Method,
    pattern: RoutePattern,
    key: ActionKey,
    name: Option<String>,
    subdomain: bool,
}

impl Route {
    pub fn new(method: Method, pattern: RoutePattern, key: ActionKey) -> Self {
        Self {
            method,
            pattern,
            key,
            name: None,
            subdomain: false,
        }
    }

    /// Attach a symbolic route name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Mark the route as subdomain-eligible (or not).
    pub fn with_subdomain(mut self, subdomain: bool) -> Self {
        self.subdomain = subdomain;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn key(&self) -> &ActionKey {
        &self.key
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether the route is addressed through a subdomain.
    pub fn is_subdomain(&self) -> bool {
        self.subdomain
    }

    /// Name of the link option that carries this route's id when the route
    /// is the subdomain anchor: `<name>_id`, where `<name>` is the route
    /// name or, failing that, the singular resource identifier.
    pub fn placeholder_key(&self) -> String {
        let base = match self.name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                let resource = self.key.resource.rsplit('/').next().unwrap_or_default();
                singularize(resource)
            }
        };
        format!("{}_id", base)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} => {}", self.method, self.pattern, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_key_empty() {
        assert!(ActionKey::new("", "show").is_empty());
        assert!(ActionKey::new("blogs", "").is_empty());
        assert!(!ActionKey::new("blogs", "show").is_empty());
    }

    #[test]
    fn test_placeholder_key_from_resource() {
        let route = Route::new(
            Method::DELETE,
            RoutePattern::parse("/blogs/:id"),
            ActionKey::new("blogs", "destroy"),
        );
        assert_eq!(route.placeholder_key(), "blog_id");
    }

    #[test]
    fn test_placeholder_key_from_namespaced_resource() {
        let route = Route::new(
            Method::GET,
            RoutePattern::parse("/admin/blogs/:id"),
            ActionKey::new("admin/blogs", "show"),
        );
        assert_eq!(route.placeholder_key(), "blog_id");
    }

    #[test]
    fn test_placeholder_key_prefers_name() {
        let route = Route::new(
            Method::GET,
            RoutePattern::parse("/sites/:id"),
            ActionKey::new("sites", "show"),
        )
        .with_name("space");
        assert_eq!(route.placeholder_key(), "space_id");
    }

    #[test]
    fn test_display() {
        let route = Route::new(
            Method::GET,
            RoutePattern::parse("/blogs/:id"),
            ActionKey::new("blogs", "show"),
        );
        assert_eq!(route.to_string(), "GET /blogs/:id => blogs#show");
    }
}
