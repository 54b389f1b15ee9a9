//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     config → logging → registry → mount pass → listeners
//!
//! Shutdown:
//!     SIGINT/SIGTERM (signals.rs)
//!         → Shutdown::trigger (shutdown.rs)
//!         → serving task drains and exits
//! ```
//!
//! # Design Decisions
//! - Listeners start last: traffic only after the mount pass succeeded
//! - A failed mount pass is fatal; there is no degraded startup

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::shutdown_on_signal;
