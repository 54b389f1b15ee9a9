//! Liveness route module.

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower::BoxError;

use crate::http::server::ServerContext;
use crate::routing::registry::RouteFactory;

#[derive(Serialize)]
pub struct HealthReport {
    pub status: &'static str,
}

/// Factory for the `health` route module.
pub struct HealthRoutes;

impl RouteFactory for HealthRoutes {
    fn build(&self, router: Router, _context: &ServerContext) -> Result<Router, BoxError> {
        Ok(router
            .route("/", get(get_health))
            .route("/live", get(get_live)))
    }
}

async fn get_health() -> Json<HealthReport> {
    Json(HealthReport {
        status: "operational",
    })
}

async fn get_live() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "alive": true }))
}
