//! Link-generation options.
//!
//! # Responsibilities
//! - Typed replacement for the free-form option map passed to link helpers
//! - Carry the recall context (the currently matched route)
//! - Merge configured defaults under per-call options

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

use crate::config::schema::DefaultUrlOptions;
use crate::routing::route::{ActionKey, Route};

/// What to do with the subdomain part of the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubdomainOption {
    /// Keep the host as given.
    #[default]
    Keep,
    /// Strip any subdomain, leaving the registered domain.
    Remove,
    /// Replace the subdomain with this label.
    Label(String),
}

/// The currently matched route, supplied to link generation for realm
/// comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recall {
    pub resource: Option<String>,
    pub action: Option<String>,
    pub id: Option<String>,
    pub params: BTreeMap<String, String>,
}

impl Recall {
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: Some(resource.into()),
            action: Some(action.into()),
            ..Default::default()
        }
    }

    /// Recall context for a recognized route and its path parameters.
    pub fn from_match(route: &Route, params: &BTreeMap<String, String>) -> Self {
        let mut params = params.clone();
        let id = params.remove("id");
        Self {
            resource: Some(route.key().resource.clone()),
            action: Some(route.key().action.clone()),
            id,
            params,
        }
    }

    pub fn id(mut self, id: impl Display) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn action_key(&self) -> Option<ActionKey> {
        key_of(&self.resource, &self.action)
    }
}

/// Options for one link-generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlOptions {
    /// Target resource identifier.
    pub resource: Option<String>,
    /// Target action identifier.
    pub action: Option<String>,
    /// Member id.
    pub id: Option<String>,
    /// Other parameters: `<resource>_id` values for nesting levels, and
    /// extra values that end up in the query string.
    pub params: BTreeMap<String, String>,
    /// Explicit request to link into the subdomain realm.
    pub subdomainify: bool,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub scheme: Option<String>,
    pub subdomain: SubdomainOption,
    /// Produce a path instead of an absolute URL.
    pub only_path: Option<bool>,
    pub anchor: Option<String>,
    #[serde(rename = "_recall")]
    pub recall: Option<Recall>,
}

impl UrlOptions {
    /// Options targeting `resource#action`.
    pub fn to(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: Some(resource.into()),
            action: Some(action.into()),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: impl Display) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.params.insert(name.into(), value.to_string());
        self
    }

    pub fn subdomainify(mut self) -> Self {
        self.subdomainify = true;
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn only_path(mut self, only_path: bool) -> Self {
        self.only_path = Some(only_path);
        self
    }

    pub fn anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    pub fn recall(mut self, recall: Recall) -> Self {
        self.recall = Some(recall);
        self
    }

    pub fn action_key(&self) -> Option<ActionKey> {
        key_of(&self.resource, &self.action)
    }

    /// Value for a path parameter: `id` comes from the id field, anything
    /// else from `params`.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        let value = if name == "id" {
            self.id.as_deref()
        } else {
            self.params.get(name).map(String::as_str)
        };
        value.filter(|v| !v.is_empty())
    }

    /// Fill unset fields from `defaults`.
    pub fn with_defaults(mut self, defaults: &DefaultUrlOptions) -> Self {
        if self.host.is_none() {
            self.host = defaults.host.clone();
        }
        if self.port.is_none() {
            self.port = defaults.port;
        }
        if self.scheme.is_none() {
            self.scheme = Some(defaults.scheme.clone());
        }
        if self.only_path.is_none() {
            self.only_path = Some(defaults.only_path);
        }
        self
    }
}

fn key_of(resource: &Option<String>, action: &Option<String>) -> Option<ActionKey> {
    match (resource, action) {
        (Some(resource), Some(action)) if !resource.is_empty() && !action.is_empty() => {
            Some(ActionKey::new(resource.as_str(), action.as_str()))
        }
        _ => None,
    }
}
