//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Mount pass and request handling produce:
//!     → logging.rs (structured log events, request IDs in spans)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
pub use metrics::init_metrics;
