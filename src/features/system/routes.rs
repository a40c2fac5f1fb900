use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::system::handlers;
use crate::features::system::service::SystemService;

/// Health and discovery routes (no authentication)
pub fn routes(service: Arc<SystemService>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/api", get(handlers::api_root))
        .route("/health", get(handlers::health_check))
        .with_state(service)
}
