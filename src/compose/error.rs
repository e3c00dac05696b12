//! Link-generation error definitions.

use thiserror::Error;

/// Errors that can occur while composing a URL.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// Subdomain composition was required but no route is subdomain-eligible.
    #[error("no subdomain-eligible route is registered")]
    NoSubdomainRoute,

    /// An explicit subdomain link carried neither an id nor a default label.
    #[error("subdomain link requires '{placeholder}' or 'id', and no default subdomain is configured")]
    MissingSubdomainId { placeholder: String },

    /// The resolved subdomain is not a valid DNS label sequence.
    #[error("'{label}' is not a valid subdomain label")]
    InvalidSubdomain { label: String },

    /// A path parameter would resolve to a dot segment.
    #[error("path parameter '{name}' cannot be '{value}'")]
    InvalidPathParam { name: String, value: String },

    /// Neither the options nor the recall context name a target.
    #[error("link target has no resource and action")]
    MissingTarget,

    /// No route dispatches to the target with the supplied parameters.
    #[error("no route matches {resource}#{action} with the supplied parameters")]
    NoRouteMatches { resource: String, action: String },

    /// An absolute URL was requested without a host.
    #[error("missing host to link to")]
    MissingHost,

    /// The underlying builder produced something that is not a URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ComposeError {
    /// Metric label for this error.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComposeError::NoSubdomainRoute => "no_subdomain_route",
            ComposeError::MissingSubdomainId { .. } => "missing_subdomain_id",
            ComposeError::InvalidSubdomain { .. } => "invalid_subdomain",
            ComposeError::InvalidPathParam { .. } => "invalid_path_param",
            ComposeError::MissingTarget => "missing_target",
            ComposeError::NoRouteMatches { .. } => "no_route_matches",
            ComposeError::MissingHost => "missing_host",
            ComposeError::InvalidUrl(_) => "invalid_url",
        }
    }
}
