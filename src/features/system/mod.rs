//! Health, discovery and the JSON catch-all for unmatched routes.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod service;

pub use service::SystemService;
