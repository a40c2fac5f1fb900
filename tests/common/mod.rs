#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use contact_form_service::app::build_router;
use contact_form_service::core::config::{
    AppConfig, Config, RateLimitConfig, StoreConfig, SwaggerConfig,
};
use contact_form_service::features::contacts::InMemoryContactStore;

pub fn test_config(max_requests: u32) -> Config {
    Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            cors_allowed_origins: vec!["http://localhost:3000".to_string()],
            max_request_body_size: 64 * 1024,
        },
        store: StoreConfig::Memory,
        rate_limit: RateLimitConfig {
            max_requests,
            window: Duration::from_secs(900),
            trust_proxy: false,
        },
        swagger: SwaggerConfig {
            username: None,
            password: None,
            title: "Contact Form API".to_string(),
            version: "test".to_string(),
            description: "test".to_string(),
        },
    }
}

/// Server over a fresh in-memory store with rate limiting off
pub fn test_server() -> (TestServer, Arc<InMemoryContactStore>) {
    test_server_with(test_config(0))
}

pub fn test_server_with(config: Config) -> (TestServer, Arc<InMemoryContactStore>) {
    let store = Arc::new(InMemoryContactStore::new());
    let app = build_router(&config, store.clone());
    let server = TestServer::new(app).expect("failed to start test server");
    (server, store)
}
