//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → route_table() builds the RouteTable once at startup
//!     → shared via Arc to the rewriter and the composer
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload because the
//!   route table must not change under in-flight requests
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::AppConfig;
pub use schema::DefaultUrlOptions;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::ResourceConfig;
pub use schema::RewriteConfig;
pub use schema::RootConfig;
