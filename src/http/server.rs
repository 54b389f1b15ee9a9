//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Provide the capability surface the mounter consumes (sub-router
//!   builders, attachment, shared context)
//! - Accumulate attached handlers and freeze them into one Axum router
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind the listen port and serve until shutdown
//!
//! # Design Decisions
//! - The route table is mutable only through `attach` during the mount pass
//!   and frozen before serving starts; no runtime synchronization is needed
//! - Attaching twice at one prefix replaces the earlier handler (the defined
//!   semantics for the duplicate-name collision case)
//! - Bind and serve failures are delivered on a channel, never returned
//!   synchronously from `start`

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::schema::ServerConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::observability::metrics;

/// Shared state handed to every route factory.
///
/// Cheap to clone; route factories typically move a clone into their
/// sub-router via `with_state`.
#[derive(Clone)]
pub struct ServerContext {
    config: Arc<ServerConfig>,
    started_at: Instant,
}

impl ServerContext {
    /// Create the context for one server process.
    pub fn new(config: Arc<ServerConfig>) -> Self {
        Self {
            config,
            started_at: Instant::now(),
        }
    }

    /// The server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Time elapsed since the context was created.
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// Capabilities the mount pass requires from a host server.
pub trait ServerHandle {
    /// Produce a fresh, empty sub-router to hand to a route factory.
    fn router_builder(&self) -> Router;

    /// Shared context passed to every route factory.
    fn context(&self) -> ServerContext;

    /// Register `handler` to serve all requests under `mount_path`.
    ///
    /// Attaching twice at the same prefix replaces the earlier handler.
    fn attach(&mut self, mount_path: &str, handler: Router);
}

/// Errors delivered on the server's failure channel.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The listen address could not be bound (port in use, permission).
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The server failed while serving connections.
    #[error("server error: {source}")]
    Serve {
        #[source]
        source: std::io::Error,
    },
}

/// The HTTP server hosting all mounted routes.
pub struct HttpServer {
    config: ServerConfig,
    context: ServerContext,
    mounts: Vec<(String, Router)>,
}

impl HttpServer {
    /// Create a server with an empty route table.
    pub fn new(config: ServerConfig) -> Self {
        let context = ServerContext::new(Arc::new(config.clone()));
        Self {
            config,
            context,
            mounts: Vec::new(),
        }
    }

    /// Mount paths currently attached, in attachment order.
    pub fn mount_paths(&self) -> Vec<&str> {
        self.mounts.iter().map(|(path, _)| path.as_str()).collect()
    }

    /// Collapse the accumulated mount table into the final router and apply
    /// the middleware stack. The route table is immutable afterwards.
    pub fn freeze(self) -> Router {
        let mut app = Router::new();
        for (path, handler) in self.mounts {
            app = app.nest(&path, handler);
        }

        app.layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    self.config.timeouts.request_secs,
                )))
                .layer(propagate_request_id_layer()),
        )
        .layer(middleware::from_fn(track_requests))
    }

    /// Serve the frozen route table on an already-bound listener until the
    /// shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.freeze();
        axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Start accepting connections on `port`.
    ///
    /// Returns immediately; bind and serve failures arrive on the returned
    /// channel. The channel closing without an error means the server shut
    /// down cleanly.
    pub fn start(
        self,
        port: u16,
        shutdown: broadcast::Receiver<()>,
    ) -> mpsc::UnboundedReceiver<ServeError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let address = format!("{}:{}", self.config.listener.bind_host, port);

        tokio::spawn(async move {
            let listener = match TcpListener::bind(&address).await {
                Ok(listener) => listener,
                Err(source) => {
                    tracing::error!(address = %address, error = %source, "Failed to bind listen address");
                    let _ = tx.send(ServeError::Bind { address, source });
                    return;
                }
            };

            if let Err(source) = self.run(listener, shutdown).await {
                let _ = tx.send(ServeError::Serve { source });
            }
        });

        rx
    }
}

impl ServerHandle for HttpServer {
    fn router_builder(&self) -> Router {
        Router::new()
    }

    fn context(&self) -> ServerContext {
        self.context.clone()
    }

    fn attach(&mut self, mount_path: &str, handler: Router) {
        if self.mounts.iter().any(|(path, _)| path == mount_path) {
            tracing::warn!(mount = %mount_path, "Replacing handler already attached at this prefix");
            self.mounts.retain(|(path, _)| path != mount_path);
        }
        self.mounts.push((mount_path.to_string(), handler));
    }
}

/// Record request metrics once the response is ready.
async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();

    let response = next.run(request).await;
    metrics::record_request(&method, response.status().as_u16(), start);
    response
}

async fn wait_for_shutdown(mut shutdown: broadcast::Receiver<()>) {
    let _ = shutdown.recv().await;
    tracing::info!("Shutdown signal received");
}
