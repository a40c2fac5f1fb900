use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::contacts::models::Contact;
use crate::shared::validation::ContactFields;

/// Request DTO for a contact form submission
///
/// Every field is optional at the wire level so that missing values surface
/// as rule failures ("Name is required") instead of JSON errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactDto {
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
    #[schema(example = "+1 234-567-8900")]
    pub phone: Option<String>,
    #[schema(example = "Partnership inquiry")]
    pub subject: Option<String>,
    #[schema(example = "Hello, I would like to know more about your services.")]
    pub message: Option<String>,
}

impl CreateContactDto {
    pub fn fields(&self) -> ContactFields<'_> {
        ContactFields {
            name: self.name.as_deref(),
            email: self.email.as_deref(),
            phone: self.phone.as_deref(),
            subject: self.subject.as_deref(),
            message: self.message.as_deref(),
        }
    }
}

/// Confirmation returned for an accepted submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactReceiptDto {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
}

/// Full contact record for admin consumers
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponseDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
    pub source_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identity of a deleted record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedContactDto {
    pub id: Uuid,
}

impl From<Contact> for ContactResponseDto {
    fn from(c: Contact) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            phone: c.phone,
            subject: c.subject,
            message: c.message,
            submitted_at: c.submitted_at,
            source_address: c.source_address,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

impl From<&Contact> for ContactReceiptDto {
    fn from(c: &Contact) -> Self {
        Self {
            id: c.id,
            submitted_at: c.submitted_at,
        }
    }
}
