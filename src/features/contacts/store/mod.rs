//! Record store for contact submissions.
//!
//! The service only talks to [`ContactStore`]; PostgreSQL backs production and
//! the in-process store serves local development and tests.

mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::contacts::models::{Contact, NewContact};

pub use memory::InMemoryContactStore;
pub use postgres::PgContactStore;

#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Short backend name used in logs
    fn backend(&self) -> &'static str;

    /// Cheap connectivity check for the health endpoint
    async fn ping(&self) -> Result<()>;

    /// Persist a record; the store assigns `id` and audit timestamps
    async fn insert(&self, contact: NewContact) -> Result<Contact>;

    async fn count(&self) -> Result<i64>;

    /// Records ordered by `submitted_at` descending, ties by id descending
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Contact>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>>;

    /// Remove a record, returning it when it existed
    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Contact>>;
}
