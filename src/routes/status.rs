//! Process status route module.
//!
//! Reports the running API version and uptime out of the shared server
//! context.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower::BoxError;

use crate::http::server::ServerContext;
use crate::routing::registry::RouteFactory;

#[derive(Serialize)]
pub struct StatusReport {
    pub version: String,
    pub uptime_secs: u64,
}

/// Factory for the `status` route module.
pub struct StatusRoutes;

impl RouteFactory for StatusRoutes {
    fn build(&self, router: Router, context: &ServerContext) -> Result<Router, BoxError> {
        let stateful = Router::new()
            .route("/", get(get_status))
            .with_state(context.clone());
        Ok(router.merge(stateful))
    }
}

async fn get_status(State(context): State<ServerContext>) -> Json<StatusReport> {
    Json(StatusReport {
        version: context.config().routes.api_version.clone(),
        uptime_secs: context.uptime().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::schema::ServerConfig;

    #[test]
    fn test_factory_builds_router() {
        let context = ServerContext::new(Arc::new(ServerConfig::default()));
        assert!(StatusRoutes.build(Router::new(), &context).is_ok());
    }
}
