//! Dynamic route discovery and mounting for a versioned HTTP API.
//!
//! At startup the server scans a routes directory, resolves each entry to a
//! route factory registered at init time, and mounts the factory's
//! sub-router at `/v{major}/{name}`. The route table is then frozen and
//! served until shutdown.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routes;
pub mod routing;

pub use config::schema::ServerConfig;
pub use http::server::{HttpServer, ServerContext, ServerHandle};
pub use lifecycle::Shutdown;
pub use routing::{FactoryRegistry, MountError, RouteFactory, RouteMounter};
