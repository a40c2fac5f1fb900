pub mod contact_service;

pub use contact_service::{parse_contact_id, ContactService};
