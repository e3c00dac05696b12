//! Route table storage and lookup.
//!
//! # Responsibilities
//! - Store routes in declaration order
//! - Answer action-key and annotation queries for the realm logic
//! - Expand resource declarations into conventional routes
//! - Recognize a concrete request path (used by the demo dispatcher)
//!
//! # Design Decisions
//! - Immutable after `build()` (thread-safe without locks)
//! - Annotation and action-key lookups are last-match-wins
//! - Path recognition is first-match-wins, like any ordinary router
//! - O(n) scans; route tables are small and built once

use axum::http::Method;
use std::collections::BTreeMap;

use crate::config::schema::{ResourceConfig, RootConfig};
use crate::routing::inflect::singularize;
use crate::routing::pattern::{RoutePattern, Segment};
use crate::routing::route::{ActionKey, Route};

/// Conventional resource actions, in expansion order.
pub const RESOURCE_ACTIONS: &[&str] = &["index", "create", "new", "edit", "show", "update", "destroy"];

/// A recognized request: the route and the parameters extracted from the path.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: BTreeMap<String, String>,
}

/// Ordered, read-only collection of routes.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// An empty table. Every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// All routes dispatching to `key`, in table order.
    pub fn matching<'a>(&'a self, key: &'a ActionKey) -> impl Iterator<Item = &'a Route> + 'a {
        self.routes.iter().filter(move |r| r.key() == key)
    }

    /// The highest-precedence route dispatching to `key`.
    pub fn last_matching(&self, key: &ActionKey) -> Option<&Route> {
        self.routes.iter().rev().find(|r| r.key() == key)
    }

    /// The highest-precedence subdomain-eligible route: the anchor for both
    /// rewrite directions.
    pub fn topmost_subdomain_route(&self) -> Option<&Route> {
        self.routes.iter().rev().find(|r| r.is_subdomain())
    }

    /// Find the first route matching `method` and `path`.
    ///
    /// `HEAD` requests are answered by `GET` routes.
    pub fn recognize(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        self.routes
            .iter()
            .filter(|r| r.method() == method || (method == Method::HEAD && r.method() == Method::GET))
            .find_map(|route| {
                route
                    .pattern()
                    .match_path(path)
                    .map(|params| RouteMatch { route, params })
            })
    }
}

/// Builder for `RouteTable`.
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    routes: Vec<Route>,
}

impl RouteTableBuilder {
    /// Append a single route. Later routes take precedence for annotation
    /// lookups.
    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Append the root route (`GET /`).
    pub fn root(self, root: &RootConfig) -> Self {
        self.route(
            Route::new(
                Method::GET,
                RoutePattern::default(),
                ActionKey::new(&root.resource, &root.action),
            )
            .with_name("root"),
        )
    }

    /// Expand a resource declaration, including its nested resources.
    pub fn resources(mut self, resource: &ResourceConfig) -> Self {
        expand_resource(&mut self.routes, resource, &RoutePattern::default(), None, false);
        self
    }

    pub fn build(self) -> RouteTable {
        tracing::debug!(
            routes = self.routes.len(),
            subdomain_routes = self.routes.iter().filter(|r| r.is_subdomain()).count(),
            "Route table built"
        );
        RouteTable { routes: self.routes }
    }
}

fn expand_resource(
    routes: &mut Vec<Route>,
    resource: &ResourceConfig,
    parent: &RoutePattern,
    name_prefix: Option<&str>,
    inherited_subdomain: bool,
) {
    let plural = resource.name.as_str();
    let singular = singularize(plural);
    let subdomain = inherited_subdomain || resource.subdomain;
    let scoped = |name: &str| match name_prefix {
        Some(prefix) => format!("{}_{}", prefix, name),
        None => name.to_string(),
    };

    let collection = parent.join(&RoutePattern::from_segments(vec![Segment::Literal(plural.to_string())]));
    let member = collection.join(&RoutePattern::from_segments(vec![Segment::Param("id".to_string())]));

    // Nested resources precede the parent's own routes.
    if !resource.nested.is_empty() {
        let nested_parent = collection.join(&RoutePattern::from_segments(vec![Segment::Param(format!(
            "{}_id",
            singular
        ))]));
        let nested_prefix = scoped(&singular);
        for nested in &resource.nested {
            expand_resource(routes, nested, &nested_parent, Some(&nested_prefix), subdomain);
        }
    }

    let index_name = if singular == plural {
        format!("{}_index", plural)
    } else {
        plural.to_string()
    };
    let edit = member.join(&RoutePattern::parse("/edit"));
    let new = collection.join(&RoutePattern::parse("/new"));

    let mut push = |action: &str, method: Method, pattern: &RoutePattern, name: Option<String>| {
        if !resource.includes_action(action) {
            return;
        }
        let mut route = Route::new(method, pattern.clone(), ActionKey::new(plural, action)).with_subdomain(subdomain);
        if let Some(name) = name {
            route = route.with_name(name);
        }
        routes.push(route);
    };

    push("index", Method::GET, &collection, Some(scoped(&index_name)));
    push("create", Method::POST, &collection, None);
    push("new", Method::GET, &new, Some(format!("new_{}", scoped(&singular))));
    push("edit", Method::GET, &edit, Some(format!("edit_{}", scoped(&singular))));
    push("show", Method::GET, &member, Some(scoped(&singular)));
    push("update", Method::PATCH, &member, None);
    push("update", Method::PUT, &member, None);
    push("destroy", Method::DELETE, &member, None);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(name: &str) -> ResourceConfig {
        ResourceConfig {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn sample_table() -> RouteTable {
        let mut foo = resource("foo");
        foo.subdomain = true;
        foo.nested.push(resource("bar"));

        RouteTable::builder()
            .resources(&resource("baz"))
            .resources(&resource("hoge"))
            .resources(&foo)
            .build()
    }

    #[test]
    fn test_resource_expansion_order() {
        let table = RouteTable::builder().resources(&resource("blogs")).build();
        let rendered: Vec<String> = table.routes().iter().map(|r| r.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "GET /blogs => blogs#index",
                "POST /blogs => blogs#create",
                "GET /blogs/new => blogs#new",
                "GET /blogs/:id/edit => blogs#edit",
                "GET /blogs/:id => blogs#show",
                "PATCH /blogs/:id => blogs#update",
                "PUT /blogs/:id => blogs#update",
                "DELETE /blogs/:id => blogs#destroy",
            ]
        );
        assert_eq!(table.routes()[0].name(), Some("blogs"));
        assert_eq!(table.routes()[4].name(), Some("blog"));
        assert_eq!(table.routes()[7].name(), None);
    }

    #[test]
    fn test_only_filter() {
        let mut blogs = resource("blogs");
        blogs.only = Some(vec!["show".to_string()]);
        let table = RouteTable::builder().resources(&blogs).build();
        assert_eq!(table.len(), 1);
        assert_eq!(table.routes()[0].key(), &ActionKey::new("blogs", "show"));
    }

    #[test]
    fn test_nested_routes_inherit_subdomain() {
        let table = sample_table();
        let bar_show = table.last_matching(&ActionKey::new("bar", "show")).unwrap();
        assert!(bar_show.is_subdomain());
        assert_eq!(bar_show.pattern().to_string(), "/foo/:foo_id/bar/:id");
        assert_eq!(bar_show.name(), Some("foo_bar"));

        let baz_show = table.last_matching(&ActionKey::new("baz", "show")).unwrap();
        assert!(!baz_show.is_subdomain());
    }

    #[test]
    fn test_singular_resource_index_name() {
        let table = sample_table();
        let foo_index = table.last_matching(&ActionKey::new("foo", "index")).unwrap();
        assert_eq!(foo_index.name(), Some("foo_index"));
    }

    #[test]
    fn test_topmost_subdomain_route_is_last() {
        let table = sample_table();
        let topmost = table.topmost_subdomain_route().unwrap();
        assert_eq!(topmost.key(), &ActionKey::new("foo", "destroy"));
        assert_eq!(topmost.pattern().format_id("bar"), "/foo/bar");
    }

    #[test]
    fn test_empty_table() {
        let table = RouteTable::empty();
        assert!(table.is_empty());
        assert!(table.topmost_subdomain_route().is_none());
        assert!(table.recognize(&Method::GET, "/").is_none());
    }

    #[test]
    fn test_recognize_first_match() {
        let table = sample_table();
        let m = table.recognize(&Method::GET, "/foo/x/bar/1").unwrap();
        assert_eq!(m.route.key(), &ActionKey::new("bar", "show"));
        assert_eq!(m.params.get("foo_id").map(String::as_str), Some("x"));

        let m = table.recognize(&Method::GET, "/baz/new").unwrap();
        assert_eq!(m.route.key(), &ActionKey::new("baz", "new"));

        let m = table.recognize(&Method::HEAD, "/hoge/1").unwrap();
        assert_eq!(m.route.key(), &ActionKey::new("hoge", "show"));

        assert!(table.recognize(&Method::GET, "/nope").is_none());
    }

    #[test]
    fn test_root_route() {
        let table = RouteTable::builder()
            .root(&RootConfig {
                resource: "blogs".to_string(),
                action: "index".to_string(),
            })
            .build();
        let m = table.recognize(&Method::GET, "/").unwrap();
        assert_eq!(m.route.name(), Some("root"));
    }
}
