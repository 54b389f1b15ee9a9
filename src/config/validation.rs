//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and formats before config is accepted
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ServerConfig → Result<(), Vec<ValidationError>>

use semver::Version;

use crate::config::schema::ServerConfig;

/// A single semantic configuration problem.
#[derive(Debug)]
pub enum ValidationError {
    /// The listen port is zero.
    ZeroPort,
    /// The routes directory is empty.
    EmptyRoutesDir,
    /// The API version is not valid semver.
    InvalidApiVersion(String),
    /// The log level is not one of trace/debug/info/warn/error.
    InvalidLogLevel(String),
    /// The metrics address is not a valid socket address.
    InvalidMetricsAddress(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::ZeroPort => write!(f, "listener.port must be non-zero"),
            ValidationError::EmptyRoutesDir => write!(f, "routes.dir must not be empty"),
            ValidationError::InvalidApiVersion(v) => {
                write!(f, "routes.api_version {v:?} is not valid semver")
            }
            ValidationError::InvalidLogLevel(level) => {
                write!(f, "observability.log_level {level:?} is not a known level")
            }
            ValidationError::InvalidMetricsAddress(addr) => {
                write!(f, "observability.metrics_address {addr:?} is not a socket address")
            }
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    if config.routes.dir.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyRoutesDir);
    }

    if Version::parse(&config.routes.api_version).is_err() {
        errors.push(ValidationError::InvalidApiVersion(
            config.routes.api_version.clone(),
        ));
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
