//! Subdomain ↔ canonical-path translation for resourceful routes.

// Core subsystems
pub mod config;
pub mod routing;

// Translation
pub mod compose;
pub mod rewrite;

// Serving
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use compose::{ComposeError, UrlComposer, UrlOptions};
pub use config::schema::AppConfig;
pub use http::AppServer;
pub use lifecycle::Shutdown;
pub use rewrite::PathRewriter;
pub use routing::{Realm, RouteTable};
