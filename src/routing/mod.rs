//! Route discovery and mounting subsystem.
//!
//! # Data Flow
//! ```text
//! At startup:
//!     routes directory listing
//!         → mounter.rs (derive name + mount path per entry)
//!         → registry.rs (resolve the entry's RouteFactory)
//!         → factory builds a sub-router
//!         → ServerHandle::attach(mount_path, sub_router)
//!
//! Mount path shape:
//!     /{v<major>}/{entry name}     (version.rs derives the tag once)
//! ```
//!
//! # Design Decisions
//! - The directory is the only registration switch: an entry's presence is
//!   what mounts a route, no manifest is read
//! - Factories are registered at init time and resolved by name; there is no
//!   runtime module loading
//! - First per-entry failure aborts the remaining entries; handlers attached
//!   before the failure stay attached (no rollback)
//! - One flat level: subdirectories are rejected, not recursed into

pub mod mounter;
pub mod registry;
pub mod version;

pub use mounter::{MountError, MountResult, RouteMounter};
pub use registry::{FactoryRegistry, RouteFactory};
pub use version::version_tag;
