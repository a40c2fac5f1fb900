use std::sync::Arc;

use chrono::Utc;

use crate::features::contacts::store::ContactStore;
use crate::features::system::dtos::{DiscoveryDto, HealthDto};

/// Liveness and discovery information
pub struct SystemService {
    environment: String,
    store: Arc<dyn ContactStore>,
}

impl SystemService {
    pub fn new(environment: String, store: Arc<dyn ContactStore>) -> Self {
        Self { environment, store }
    }

    /// Always reports OK; the database field says whether the store answers
    pub async fn health(&self) -> HealthDto {
        let database = match self.store.ping().await {
            Ok(()) => "connected",
            Err(e) => {
                tracing::warn!("Health check could not reach {} store: {}", self.store.backend(), e);
                "disconnected"
            }
        };

        HealthDto {
            status: "OK".to_string(),
            timestamp: Utc::now(),
            environment: self.environment.clone(),
            database: database.to_string(),
        }
    }

    pub fn root(&self) -> DiscoveryDto {
        DiscoveryDto {
            message: "Contact Form Backend API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: Some(self.environment.clone()),
            endpoints: [
                ("POST /api/contact", "Submit a contact form"),
                ("GET /api/contacts", "Get all contact submissions"),
                ("GET /api/contact/{id}", "Get a contact submission"),
                ("DELETE /api/contact/{id}", "Delete a contact submission"),
                ("GET /health", "Health check"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        }
    }

    pub fn api(&self) -> DiscoveryDto {
        DiscoveryDto {
            message: "Contact Form API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: None,
            endpoints: [
                ("POST /api/contact", "Submit a contact form"),
                ("GET /api/contacts", "Get all contact submissions"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        }
    }
}
