//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, all errors collected)
//!     → ServerConfig (validated, immutable)
//!     → shared via Arc through ServerContext
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; route mounting happens once at
//!   startup, so there is no reload path
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ListenerConfig, ObservabilityConfig, RoutesConfig, ServerConfig, TimeoutConfig};
