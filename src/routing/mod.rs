//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     RootConfig + ResourceConfig[]
//!     → table.rs (resourceful expansion, declaration order kept)
//!     → Freeze as immutable RouteTable, shared via Arc
//!
//! Queries (per request / per link):
//!     ActionKey → realm.rs → Realm { Bare, Subdomain }
//!     topmost_subdomain_route() → anchor route for rewrite and compose
//!     recognize(method, path) → RouteMatch or NoMatch
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Later declaration = higher precedence for annotation lookups
//! - First match wins for path recognition
//! - Eligibility is a typed field, not an option bag entry

pub mod inflect;
pub mod pattern;
pub mod realm;
pub mod route;
pub mod table;

pub use inflect::singularize;
pub use pattern::{RoutePattern, Segment};
pub use realm::{realm_of, Realm};
pub use route::{ActionKey, Route};
pub use table::{RouteMatch, RouteTable, RouteTableBuilder};
