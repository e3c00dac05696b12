//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check resource declarations (names, action filters, sibling clashes)
//! - Validate rewrite and URL default settings
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::{AppConfig, ResourceConfig};
use crate::routing::table::RESOURCE_ACTIONS;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("resource name '{0}' must be non-empty lowercase [a-z0-9_]")]
    ResourceName(String),

    #[error("resource '{resource}' declared twice under the same parent")]
    DuplicateResource { resource: String },

    #[error("resource '{resource}' references unknown action '{action}'")]
    UnknownAction { resource: String, action: String },

    #[error("root route needs both a resource and an action")]
    Root,

    #[error("excluded prefix '{0}' must start with '/'")]
    ExcludedPrefix(String),

    #[error("reserved subdomain labels must be non-empty")]
    ReservedLabel,

    #[error("tld_length must be at least 1")]
    TldLength,

    #[error("unsupported URL scheme '{0}' (expected http or https)")]
    Scheme(String),

    #[error("default host '{0}' must be a bare host name without scheme or path")]
    DefaultHost(String),
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if let Some(root) = &config.root {
        if root.resource.is_empty() || root.action.is_empty() {
            errors.push(ValidationError::Root);
        }
    }

    validate_resources(&config.resources, &mut errors);

    for prefix in &config.rewrite.excluded_prefixes {
        if !prefix.starts_with('/') {
            errors.push(ValidationError::ExcludedPrefix(prefix.clone()));
        }
    }
    if config.rewrite.reserved_labels.iter().any(|l| l.is_empty()) {
        errors.push(ValidationError::ReservedLabel);
    }
    if config.rewrite.tld_length == 0 {
        errors.push(ValidationError::TldLength);
    }

    let scheme = config.url_defaults.scheme.as_str();
    if scheme != "http" && scheme != "https" {
        errors.push(ValidationError::Scheme(scheme.to_string()));
    }
    if let Some(host) = &config.url_defaults.host {
        if host.is_empty() || host.contains('/') || host.contains("://") {
            errors.push(ValidationError::DefaultHost(host.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_resources(resources: &[ResourceConfig], errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();

    for resource in resources {
        let name = resource.name.as_str();
        let well_formed = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !well_formed {
            errors.push(ValidationError::ResourceName(name.to_string()));
        }
        if !seen.insert(name) {
            errors.push(ValidationError::DuplicateResource {
                resource: name.to_string(),
            });
        }

        let filters = resource.only.iter().flatten().chain(resource.except.iter());
        for action in filters {
            if !RESOURCE_ACTIONS.contains(&action.as_str()) {
                errors.push(ValidationError::UnknownAction {
                    resource: name.to_string(),
                    action: action.clone(),
                });
            }
        }

        validate_resources(&resource.nested, errors);
    }
}
