//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML config files.
//! Every section has defaults so a minimal (or absent) config file works.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the route server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind host, port).
    pub listener: ListenerConfig,

    /// Route discovery configuration.
    pub routes: RoutesConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Host to bind (e.g. "0.0.0.0").
    pub bind_host: String,

    /// Port to listen on.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Route discovery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Directory scanned for route modules at startup. Relative paths
    /// resolve one level above the working directory; prefer absolute
    /// paths.
    pub dir: PathBuf,

    /// Full semantic version of the API. Only the major number appears in
    /// mount paths.
    pub api_version: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("backend/routes"),
            api_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON instead of human-readable lines.
    pub log_json: bool,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_json: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.listener.port, 8080);
        assert_eq!(config.routes.dir, PathBuf::from("backend/routes"));
        assert_eq!(config.routes.api_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.timeouts.request_secs, 30);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_minimal_toml_round_trip() {
        let config: ServerConfig = toml::from_str(
            r#"
            [listener]
            port = 9000

            [routes]
            dir = "/srv/api/routes"
            api_version = "2.4.0"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.port, 9000);
        assert_eq!(config.listener.bind_host, "0.0.0.0");
        assert_eq!(config.routes.dir, PathBuf::from("/srv/api/routes"));
        assert_eq!(config.routes.api_version, "2.4.0");
    }
}
