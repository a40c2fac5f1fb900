//! Contact form submissions.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/contact` | Submit a contact form |
//! | GET | `/api/contacts?page&limit` | Paginated list, newest first |
//! | GET | `/api/contact/{id}` | Fetch one submission |
//! | DELETE | `/api/contact/{id}` | Delete one submission |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use services::ContactService;
pub use store::{ContactStore, InMemoryContactStore, PgContactStore};
