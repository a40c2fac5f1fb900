use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::contacts::dtos::{ContactReceiptDto, ContactResponseDto, CreateContactDto};
use crate::features::contacts::models::{Contact, NewContact};
use crate::features::contacts::store::ContactStore;
use crate::shared::constants::{MSG_CONTACT_NOT_FOUND, MSG_INVALID_CONTACT_ID};
use crate::shared::types::{Pagination, PaginationQuery};
use crate::shared::validation::{check_contact_fields, collect_messages};

/// Parse a path identifier before any store lookup
pub fn parse_contact_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::BadRequest(MSG_INVALID_CONTACT_ID.into()))
}

/// Service for contact submissions and their retrieval
pub struct ContactService {
    store: Arc<dyn ContactStore>,
}

impl ContactService {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ContactStore> {
        &self.store
    }

    /// Validate, normalize and persist one submission
    pub async fn submit(
        &self,
        dto: CreateContactDto,
        source_address: String,
    ) -> Result<ContactReceiptDto> {
        check_contact_fields(&dto.fields()).map_err(|rule| AppError::Validation(rule.to_string()))?;

        let contact = NewContact::from_submission(&dto, source_address, Utc::now());
        contact
            .validate()
            .map_err(|e| AppError::InvalidRecord(collect_messages(&e)))?;

        let saved = self.store.insert(contact).await?;

        tracing::info!(
            "Contact saved: id={}, email={}, backend={}",
            saved.id,
            saved.email,
            self.store.backend()
        );

        Ok(ContactReceiptDto::from(&saved))
    }

    /// Page of contacts, newest submission first
    pub async fn list(
        &self,
        query: &PaginationQuery,
    ) -> Result<(Vec<ContactResponseDto>, Pagination)> {
        let total = self.store.count().await?;
        let contacts = self.store.list(query.offset(), query.limit()).await?;

        Ok((
            contacts.into_iter().map(ContactResponseDto::from).collect(),
            Pagination::new(total, query),
        ))
    }

    pub async fn get_by_id(&self, raw_id: &str) -> Result<ContactResponseDto> {
        let id = parse_contact_id(raw_id)?;

        self.store
            .find_by_id(id)
            .await?
            .map(ContactResponseDto::from)
            .ok_or_else(|| AppError::NotFound(MSG_CONTACT_NOT_FOUND.into()))
    }

    pub async fn delete_by_id(&self, raw_id: &str) -> Result<Contact> {
        let id = parse_contact_id(raw_id)?;

        let deleted = self
            .store
            .delete_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(MSG_CONTACT_NOT_FOUND.into()))?;

        tracing::info!("Contact deleted: id={}, name={}", deleted.id, deleted.name);

        Ok(deleted)
    }
}
