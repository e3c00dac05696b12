//! Realm classification.
//!
//! A realm tells whether a target is addressed through a subdomain label
//! (`Subdomain`) or purely by path (`Bare`). Both the inbound rewriter and
//! the outbound composer classify through here.

use serde::Serialize;
use std::fmt;

use crate::routing::route::ActionKey;
use crate::routing::table::RouteTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Realm {
    Bare,
    Subdomain,
}

impl Realm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Realm::Bare => "bare",
            Realm::Subdomain => "subdomain",
        }
    }
}

impl fmt::Display for Realm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify `key` against `table`.
///
/// Absent keys and keys with no matching route are `Bare`; otherwise the
/// last matching route decides.
pub fn realm_of(key: Option<&ActionKey>, table: &RouteTable) -> Realm {
    let key = match key {
        Some(k) if !k.is_empty() => k,
        _ => return Realm::Bare,
    };

    match table.last_matching(key) {
        Some(route) if route.is_subdomain() => Realm::Subdomain,
        _ => Realm::Bare,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ResourceConfig;
    use crate::routing::pattern::RoutePattern;
    use crate::routing::route::Route;
    use axum::http::Method;

    fn table() -> RouteTable {
        let foo = ResourceConfig {
            name: "foo".to_string(),
            subdomain: true,
            nested: vec![ResourceConfig {
                name: "bar".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        RouteTable::builder()
            .resources(&ResourceConfig {
                name: "baz".to_string(),
                ..Default::default()
            })
            .resources(&foo)
            .build()
    }

    #[test]
    fn test_bare_for_plain_route() {
        assert_eq!(realm_of(Some(&ActionKey::new("baz", "show")), &table()), Realm::Bare);
    }

    #[test]
    fn test_bare_for_absent_key() {
        assert_eq!(realm_of(None, &table()), Realm::Bare);
        assert_eq!(realm_of(Some(&ActionKey::new("", "")), &table()), Realm::Bare);
    }

    #[test]
    fn test_bare_for_unknown_key() {
        assert_eq!(realm_of(Some(&ActionKey::new("nope", "show")), &table()), Realm::Bare);
    }

    #[test]
    fn test_subdomain_for_annotated_route_and_subroute() {
        let table = table();
        assert_eq!(realm_of(Some(&ActionKey::new("foo", "show")), &table), Realm::Subdomain);
        assert_eq!(realm_of(Some(&ActionKey::new("bar", "show")), &table), Realm::Subdomain);
    }

    #[test]
    fn test_last_match_wins() {
        let key = ActionKey::new("pages", "show");
        let table = RouteTable::builder()
            .route(Route::new(Method::GET, RoutePattern::parse("/pages/:id"), key.clone()).with_subdomain(true))
            .route(Route::new(Method::GET, RoutePattern::parse("/p/:id"), key.clone()))
            .build();
        assert_eq!(realm_of(Some(&key), &table), Realm::Bare);
    }
}
