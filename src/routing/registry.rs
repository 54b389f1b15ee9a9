//! Route factory contract and registry.
//!
//! # Responsibilities
//! - Define the factory contract every route module implements
//! - Hold the name → factory table built during process init
//! - Resolve directory entries to factories during the mount pass
//!
//! # Design Decisions
//! - Factories are registered at init time; Rust resolves modules at build
//!   time, so there is no runtime code loading
//! - Registration alone mounts nothing: a factory is only invoked when a
//!   matching entry exists in the routes directory
//! - Closures with the factory shape get a blanket impl

use std::collections::HashMap;

use axum::Router;
use tower::BoxError;

use crate::http::server::ServerContext;

/// Contract for a route module.
///
/// The mounter invokes `build` exactly once per discovered directory entry,
/// synchronously within the mount pass, handing it a fresh empty sub-router
/// and the shared server context. The returned router is attached under the
/// entry's mount path with no transformation.
pub trait RouteFactory: Send + Sync {
    /// Build the sub-router served under this route's mount path.
    fn build(&self, router: Router, context: &ServerContext) -> Result<Router, BoxError>;
}

impl<F> RouteFactory for F
where
    F: Fn(Router, &ServerContext) -> Result<Router, BoxError> + Send + Sync,
{
    fn build(&self, router: Router, context: &ServerContext) -> Result<Router, BoxError> {
        self(router, context)
    }
}

/// Name → factory table consulted by the mount pass.
///
/// Names must match the base file name (extension stripped) of the directory
/// entry that should activate them.
#[derive(Default)]
pub struct FactoryRegistry {
    factories: HashMap<String, Box<dyn RouteFactory>>,
}

impl FactoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under a route name.
    ///
    /// Registering the same name twice replaces the earlier factory.
    pub fn register(&mut self, name: impl Into<String>, factory: impl RouteFactory + 'static) {
        let name = name.into();
        if self.factories.insert(name.clone(), Box::new(factory)).is_some() {
            tracing::debug!(route = %name, "Replaced previously registered route factory");
        }
    }

    /// Look up the factory registered under `name`.
    pub fn get(&self, name: &str) -> Option<&dyn RouteFactory> {
        self.factories.get(name).map(|f| f.as_ref())
    }

    /// Number of registered factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// True if no factory has been registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
