use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthDto {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
    pub database: String,
}

/// Endpoint listing served from `/` and `/api`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DiscoveryDto {
    pub message: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    pub endpoints: BTreeMap<String, String>,
}
