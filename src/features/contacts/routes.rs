use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::contacts::handlers;
use crate::features::contacts::services::ContactService;

/// Create routes for the contacts feature
///
/// Submission is public; listing, fetch and delete are meant for operators
/// and should sit behind the deployment's own access control.
pub fn routes(service: Arc<ContactService>) -> Router {
    Router::new()
        .route("/api/contact", post(handlers::submit_contact))
        .route("/api/contacts", get(handlers::list_contacts))
        .route(
            "/api/contact/{id}",
            get(handlers::get_contact).delete(handlers::delete_contact),
        )
        .with_state(service)
}
