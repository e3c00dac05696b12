//! Inbound rewriting subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (host, path)
//!     → layer.rs (tower middleware, runs before routing)
//!     → host.rs (extract subdomain label)
//!     → rewriter.rs (bypass checks, anchor route lookup, path join)
//!     → Request with rewritten path → router
//! ```
//!
//! # Design Decisions
//! - Stateless per request; the only shared input is the RouteTable
//! - Fail open: no rewrite case ever rejects a request
//! - Static assets are never intercepted

pub mod host;
pub mod layer;
pub mod rewriter;

pub use layer::{OriginalPath, RequestSubdomain, SubdomainRewrite, SubdomainRewriteLayer};
pub use rewriter::{PathRewriter, Rewrite, RewriteOutcome};
