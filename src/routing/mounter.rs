//! The mount pass: directory scan → factory invocation → attachment.
//!
//! # Responsibilities
//! - Enumerate the routes directory (one suspending listing, then per-entry
//!   work)
//! - Derive each entry's route name and version-prefixed mount path
//! - Resolve and invoke the entry's factory, attach the result
//! - Short-circuit on the first per-entry failure
//!
//! # Design Decisions
//! - The version tag is computed once, before any filesystem access; a bad
//!   version never reaches the listing stage
//! - Entries are processed sequentially in sorted name order. Order is not
//!   part of the contract; sorting keeps startup logs reproducible
//! - No rollback: handlers attached before a failure stay attached, and the
//!   caller is expected to treat the failure as fatal to startup
//! - Duplicate derived names collide on one mount path; the host's
//!   last-attach-wins semantics apply and are not corrected here

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tower::BoxError;

use crate::http::server::ServerHandle;
use crate::observability::metrics;
use crate::routing::registry::FactoryRegistry;
use crate::routing::version::version_tag;

/// Errors raised by a mount pass, naming the failing stage and entry.
#[derive(Debug, Error)]
pub enum MountError {
    /// The supplied API version is not valid semver. Raised before any
    /// filesystem access.
    #[error("invalid API version {version:?}: {source}")]
    Version {
        version: String,
        #[source]
        source: semver::Error,
    },

    /// The routes directory could not be enumerated. Raised before any entry
    /// is processed; nothing has been attached.
    #[error("failed to list routes directory {dir:?}: {source}")]
    List {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory entry could not be resolved to a route factory.
    #[error("failed to load route module {entry:?}: {reason}")]
    Load { entry: String, reason: String },

    /// A factory failed while building its sub-router.
    #[error("route factory {entry:?} failed: {source}")]
    Factory {
        entry: String,
        #[source]
        source: BoxError,
    },
}

/// Result type for mount operations.
pub type MountResult<T> = Result<T, MountError>;

/// Mounts every route module found in a directory onto a server.
pub struct RouteMounter {
    registry: FactoryRegistry,
}

impl RouteMounter {
    /// Create a mounter resolving entries against `registry`.
    pub fn new(registry: FactoryRegistry) -> Self {
        Self { registry }
    }

    /// The registry entries are resolved against.
    pub fn registry(&self) -> &FactoryRegistry {
        &self.registry
    }

    /// Run one mount pass over `routes_dir`.
    ///
    /// Every entry's base name (extension stripped) selects a registered
    /// factory; the factory's router is attached at
    /// `/v{major}/{name}`. The first failing entry aborts the remaining
    /// entries and propagates; handlers attached before the failure stay
    /// attached.
    ///
    /// A relative `routes_dir` resolves against `../<dir>`, a
    /// backward-compatibility quirk. Pass an absolute path wherever
    /// possible.
    pub async fn mount(
        &self,
        server: &mut dyn ServerHandle,
        routes_dir: &Path,
        full_version: &str,
    ) -> MountResult<()> {
        let tag = version_tag(full_version).map_err(|source| MountError::Version {
            version: full_version.to_string(),
            source,
        })?;

        let dir = resolve_routes_dir(routes_dir);
        let mut reader = fs::read_dir(&dir).await.map_err(|source| MountError::List {
            dir: dir.clone(),
            source,
        })?;

        let mut entries = Vec::new();
        while let Some(entry) = reader.next_entry().await.map_err(|source| MountError::List {
            dir: dir.clone(),
            source,
        })? {
            entries.push(entry);
        }
        entries.sort_by_key(|entry| entry.file_name());

        let context = server.context();
        for entry in entries {
            let file_name = entry.file_name();
            let name = route_name(&file_name);
            let mount = mount_path(&tag, &name);

            tracing::info!(route = %name, mount = %mount, "Mounting route");

            let file_type = entry.file_type().await.map_err(|e| MountError::Load {
                entry: name.clone(),
                reason: format!("entry type unreadable: {e}"),
            })?;
            if file_type.is_dir() {
                return Err(MountError::Load {
                    entry: name,
                    reason: "entry is a directory; nested route directories are not supported"
                        .to_string(),
                });
            }

            let factory = self.registry.get(&name).ok_or_else(|| MountError::Load {
                entry: name.clone(),
                reason: "no route factory registered under this name".to_string(),
            })?;

            let handler = factory
                .build(server.router_builder(), &context)
                .map_err(|source| MountError::Factory {
                    entry: name.clone(),
                    source,
                })?;

            server.attach(&mount, handler);
            metrics::record_route_mounted(&name);
        }

        Ok(())
    }
}

/// Resolve the routes directory argument.
///
/// Relative paths resolve one level above the working directory, reproducing
/// the historical `join("..", dir)` fallback. Callers should pass absolute
/// paths.
fn resolve_routes_dir(dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        Path::new("..").join(dir)
    }
}

/// Route name for a directory entry: the file base name, extension stripped.
fn route_name(file_name: &OsStr) -> String {
    let path = Path::new(file_name);
    path.file_stem()
        .unwrap_or(file_name)
        .to_string_lossy()
        .into_owned()
}

/// Absolute mount path for a route, separators normalized to `/`.
fn mount_path(tag: &str, name: &str) -> String {
    format!("/{tag}/{name}").replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::sync::Arc;

    use axum::routing::get;
    use axum::Router;
    use tempfile::TempDir;

    use super::*;
    use crate::config::schema::ServerConfig;
    use crate::http::server::ServerContext;
    use crate::routing::registry::RouteFactory;

    /// Server double that records attach calls instead of serving.
    struct RecordingServer {
        context: ServerContext,
        attached: Vec<String>,
    }

    impl RecordingServer {
        fn new() -> Self {
            Self {
                context: ServerContext::new(Arc::new(ServerConfig::default())),
                attached: Vec::new(),
            }
        }
    }

    impl ServerHandle for RecordingServer {
        fn router_builder(&self) -> Router {
            Router::new()
        }

        fn context(&self) -> ServerContext {
            self.context.clone()
        }

        fn attach(&mut self, mount_path: &str, _handler: Router) {
            self.attached.push(mount_path.to_string());
        }
    }

    fn passing(reply: &'static str) -> impl RouteFactory {
        move |router: Router, _ctx: &ServerContext| {
            Ok(router.route("/", get(move || async move { reply })))
        }
    }

    fn routes_dir(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for file in files {
            File::create(dir.path().join(file)).unwrap();
        }
        dir
    }

    #[tokio::test]
    async fn test_mounts_all_entries_under_version_prefix() {
        let dir = routes_dir(&["users", "orders"]);
        let mut registry = FactoryRegistry::new();
        registry.register("users", passing("users"));
        registry.register("orders", passing("orders"));

        let mut server = RecordingServer::new();
        let mounter = RouteMounter::new(registry);
        mounter
            .mount(&mut server, dir.path(), "2.4.0")
            .await
            .unwrap();

        assert_eq!(server.attached, vec!["/v2/orders", "/v2/users"]);
    }

    #[tokio::test]
    async fn test_empty_directory_mounts_nothing() {
        let dir = routes_dir(&[]);
        let mut server = RecordingServer::new();
        let mounter = RouteMounter::new(FactoryRegistry::new());

        mounter
            .mount(&mut server, dir.path(), "1.0.0")
            .await
            .unwrap();
        assert!(server.attached.is_empty());
    }

    #[tokio::test]
    async fn test_missing_directory_fails_before_any_attach() {
        let dir = routes_dir(&[]);
        let missing = dir.path().join("missing");

        let mut server = RecordingServer::new();
        let mounter = RouteMounter::new(FactoryRegistry::new());
        let err = mounter
            .mount(&mut server, &missing, "1.0.0")
            .await
            .unwrap_err();

        assert!(matches!(err, MountError::List { .. }));
        assert!(server.attached.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_version_precedes_directory_listing() {
        // The directory does not exist either; the version error must win.
        let mut server = RecordingServer::new();
        let mounter = RouteMounter::new(FactoryRegistry::new());
        let err = mounter
            .mount(&mut server, Path::new("/definitely/not/here"), "not-a-version")
            .await
            .unwrap_err();

        assert!(matches!(err, MountError::Version { .. }));
        assert!(server.attached.is_empty());
    }

    #[tokio::test]
    async fn test_load_failure_keeps_earlier_mounts() {
        let dir = routes_dir(&["alpha", "bravo"]);
        let mut registry = FactoryRegistry::new();
        registry.register("alpha", passing("alpha"));
        // "bravo" left unregistered; it sorts after "alpha".

        let mut server = RecordingServer::new();
        let mounter = RouteMounter::new(registry);
        let err = mounter
            .mount(&mut server, dir.path(), "1.0.0")
            .await
            .unwrap_err();

        match err {
            MountError::Load { entry, .. } => assert_eq!(entry, "bravo"),
            other => panic!("expected Load error, got {other:?}"),
        }
        assert_eq!(server.attached, vec!["/v1/alpha"]);
    }

    #[tokio::test]
    async fn test_factory_error_aborts_pass() {
        let dir = routes_dir(&["boom"]);
        let mut registry = FactoryRegistry::new();
        registry.register("boom", |_router: Router, _ctx: &ServerContext| {
            Err("factory exploded".into())
        });

        let mut server = RecordingServer::new();
        let mounter = RouteMounter::new(registry);
        let err = mounter
            .mount(&mut server, dir.path(), "1.0.0")
            .await
            .unwrap_err();

        match err {
            MountError::Factory { entry, .. } => assert_eq!(entry, "boom"),
            other => panic!("expected Factory error, got {other:?}"),
        }
        assert!(server.attached.is_empty());
    }

    #[tokio::test]
    async fn test_subdirectory_is_a_load_failure() {
        let dir = routes_dir(&[]);
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        // A factory registered under the same name must not save it.
        let mut registry = FactoryRegistry::new();
        registry.register("nested", passing("nested"));

        let mut server = RecordingServer::new();
        let mounter = RouteMounter::new(registry);
        let err = mounter
            .mount(&mut server, dir.path(), "1.0.0")
            .await
            .unwrap_err();

        match err {
            MountError::Load { entry, reason } => {
                assert_eq!(entry, "nested");
                assert!(reason.contains("directory"));
            }
            other => panic!("expected Load error, got {other:?}"),
        }
        assert!(server.attached.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_derived_names_collide_on_one_path() {
        let dir = routes_dir(&["orders", "orders.bak"]);
        let mut registry = FactoryRegistry::new();
        registry.register("orders", passing("orders"));

        let mut server = RecordingServer::new();
        let mounter = RouteMounter::new(registry);
        mounter
            .mount(&mut server, dir.path(), "2.0.0")
            .await
            .unwrap();

        // Both entries normalize to "orders" and both attach; precedence at
        // the shared path is the host's concern.
        assert_eq!(server.attached, vec!["/v2/orders", "/v2/orders"]);
    }

    #[tokio::test]
    async fn test_extension_stripped_from_mount_path() {
        let dir = routes_dir(&["users.toml"]);
        let mut registry = FactoryRegistry::new();
        registry.register("users", passing("users"));

        let mut server = RecordingServer::new();
        let mounter = RouteMounter::new(registry);
        mounter
            .mount(&mut server, dir.path(), "3.1.4")
            .await
            .unwrap();

        assert_eq!(server.attached, vec!["/v3/users"]);
    }

    #[test]
    fn test_route_name_derivation() {
        assert_eq!(route_name(OsStr::new("users")), "users");
        assert_eq!(route_name(OsStr::new("users.toml")), "users");
        assert_eq!(route_name(OsStr::new("orders.bak")), "orders");
        assert_eq!(route_name(OsStr::new(".hidden")), ".hidden");
    }

    #[test]
    fn test_mount_path_normalizes_separators() {
        assert_eq!(mount_path("v2", "users"), "/v2/users");
        assert_eq!(mount_path("v2", r"odd\name"), "/v2/odd/name");
    }

    #[test]
    fn test_relative_routes_dir_resolves_one_level_up() {
        assert_eq!(
            resolve_routes_dir(Path::new("backend/routes")),
            PathBuf::from("../backend/routes")
        );
        assert_eq!(
            resolve_routes_dir(Path::new("/srv/routes")),
            PathBuf::from("/srv/routes")
        );
    }
}
