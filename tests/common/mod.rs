//! Shared utilities for integration tests.

use std::fs::File;

use axum::routing::get;
use axum::Router;
use tempfile::TempDir;

use dynamic_router::http::server::ServerContext;
use dynamic_router::routing::FactoryRegistry;

/// Registry with plain-text factories for the given route names.
///
/// Each factory serves its own name at the sub-router root, so a response
/// body identifies which module handled the request.
pub fn test_registry(names: &[&'static str]) -> FactoryRegistry {
    let mut registry = FactoryRegistry::new();
    for name in names {
        let reply = *name;
        registry.register(reply, move |router: Router, _ctx: &ServerContext| {
            Ok(router.route("/", get(move || async move { reply })))
        });
    }
    registry
}

/// Temporary routes directory populated with empty marker files.
pub fn routes_dir(files: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for file in files {
        File::create(dir.path().join(file)).unwrap();
    }
    dir
}
