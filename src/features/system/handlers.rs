use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::features::system::dtos::{DiscoveryDto, HealthDto};
use crate::features::system::service::SystemService;
use crate::shared::constants::MSG_ENDPOINT_NOT_FOUND;
use crate::shared::types::ApiResponse;

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is alive", body = HealthDto)
    ),
    tag = "system"
)]
pub async fn health_check(State(service): State<Arc<SystemService>>) -> Json<HealthDto> {
    Json(service.health().await)
}

pub async fn root(State(service): State<Arc<SystemService>>) -> Json<DiscoveryDto> {
    Json(service.root())
}

pub async fn api_root(State(service): State<Arc<SystemService>>) -> Json<DiscoveryDto> {
    Json(service.api())
}

/// Catch-all for unmatched routes
pub async fn not_found() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error(
            Some(MSG_ENDPOINT_NOT_FOUND.to_string()),
            None,
        )),
    )
}
