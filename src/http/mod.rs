//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → rewrite layer (host subdomain → canonical path)
//!     → server.rs (Axum router, timeout, request ID, tracing)
//!     → handlers.rs (recognize against RouteTable, compose self link)
//!     → JSON response
//! ```

pub mod handlers;
pub mod request;
pub mod server;

pub use handlers::DispatchResponse;
pub use request::{MakeRequestUuid, RequestIdExt, X_REQUEST_ID};
pub use server::{AppServer, AppState};
