use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::contacts::models::{Contact, NewContact};
use crate::features::contacts::store::ContactStore;

/// In-process contact store. Contents live as long as the process.
#[derive(Default)]
pub struct InMemoryContactStore {
    contacts: RwLock<Vec<Contact>>,
}

impl InMemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn insert(&self, contact: NewContact) -> Result<Contact> {
        let now = Utc::now();
        let record = Contact {
            id: Uuid::now_v7(),
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            subject: contact.subject,
            message: contact.message,
            submitted_at: contact.submitted_at,
            source_address: contact.source_address,
            created_at: now,
            updated_at: now,
        };

        self.contacts.write().await.push(record.clone());
        Ok(record)
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.contacts.read().await.len() as i64)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Contact>> {
        let mut contacts = self.contacts.read().await.clone();
        contacts.sort_by_key(|c| Reverse((c.submitted_at, c.id)));

        Ok(contacts
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>> {
        Ok(self
            .contacts
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Contact>> {
        let mut contacts = self.contacts.write().await;
        Ok(contacts
            .iter()
            .position(|c| c.id == id)
            .map(|idx| contacts.remove(idx)))
    }
}
