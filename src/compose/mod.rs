//! Outbound link composition subsystem.
//!
//! # Data Flow
//! ```text
//! UrlOptions (target + _recall) + DefaultUrlOptions
//!     → composer.rs (merge defaults, realm comparison)
//!         ├─ same realm, no flag → builder.rs → "/hoge/1"
//!         └─ subdomain / realm transfer
//!              → resolve label (id, <anchor>_id, or default)
//!              → builder.rs (absolute URL with label.domain)
//!              → strip anchor prefix → "http://foo.example.com/bar/1"
//! ```
//!
//! # Design Decisions
//! - The subdomain-unaware builder is a trait seam, not patched in place
//! - The route table is passed explicitly, never looked up ambiently
//! - Configuration errors surface as `ComposeError`, never as a silent
//!   wrong URL

pub mod builder;
pub mod composer;
pub mod error;
pub mod options;

pub use builder::{RouteUrlBuilder, UrlBuilder};
pub use composer::UrlComposer;
pub use error::ComposeError;
pub use options::{Recall, SubdomainOption, UrlOptions};
