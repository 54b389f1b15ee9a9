//! HTTP hosting subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     mount pass attaches sub-routers via ServerHandle
//!         → server.rs freezes them into one Axum router
//!         → middleware applied (request ID, trace, timeout)
//!         → listener bound, serving until shutdown
//!
//! Per request:
//!     request.rs stamps x-request-id
//!         → TraceLayer span
//!         → mounted sub-router for the path prefix
//! ```

pub mod request;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{HttpServer, ServeError, ServerContext, ServerHandle};
