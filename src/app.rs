//! Router assembly shared by the server binary and the HTTP tests.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    middleware::from_fn_with_state,
    Router,
};
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::Config;
use crate::core::middleware;
use crate::core::openapi::{api_doc, SwaggerInfoModifier};
use crate::core::rate_limiter::RateLimiter;
use crate::features::contacts::{routes as contacts_routes, ContactService, ContactStore};
use crate::features::system::{handlers as system_handlers, routes as system_routes, SystemService};

pub fn build_router(config: &Config, store: Arc<dyn ContactStore>) -> Router {
    let contact_service = Arc::new(ContactService::new(Arc::clone(&store)));
    let system_service = Arc::new(SystemService::new(
        config.app.environment.clone(),
        Arc::clone(&store),
    ));
    tracing::info!("Contact services initialized (store: {})", store.backend());

    // Build swagger router with dynamic info
    let openapi = api_doc(&SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    });
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn_with_state(
                Arc::new(credentials),
                middleware::docs_basic_auth,
            ))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    let mut app = Router::new()
        .merge(swagger)
        .merge(contacts_routes::routes(contact_service))
        .merge(system_routes::routes(system_service))
        .fallback(system_handlers::not_found);

    let limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));
    if limiter.enabled() {
        tracing::info!(
            "Rate limiting enabled: {} requests per {:?} per client (trust proxy: {})",
            config.rate_limit.max_requests,
            config.rate_limit.window,
            config.rate_limit.trust_proxy
        );
        app = app.layer(from_fn_with_state(limiter, middleware::rate_limit_middleware));
    }

    app.layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("SAMEORIGIN"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::REFERRER_POLICY,
                    HeaderValue::from_static("no-referrer"),
                )),
        )
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}
