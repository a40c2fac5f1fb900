//! Form-side submission flow.
//!
//! The client validates a visitor's form with the same rules the server
//! enforces, gates it behind a small arithmetic captcha and posts it to the
//! contact API. When the API cannot be reached the submission is appended to
//! a local lead log instead, so nothing the visitor typed is lost.

pub mod api;
pub mod captcha;
pub mod config;
pub mod flow;
pub mod leads;

pub use api::{ContactApi, HttpContactApi, SubmissionReceipt};
pub use captcha::MathCaptcha;
pub use config::ClientConfig;
pub use flow::{ContactForm, SubmissionFlow, SubmitOutcome};
pub use leads::{FileKeyValueStore, KeyValueStore, LeadLog, LocalLead, MemoryKeyValueStore};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Contact API rejected the submission (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("No contact API is configured")]
    ApiUnavailable,

    #[error("Local storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether the submission should be kept in the local lead log
    pub fn is_network_error(&self) -> bool {
        !matches!(self, ClientError::Storage(_))
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
