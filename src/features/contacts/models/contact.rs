use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::features::contacts::dtos::CreateContactDto;
use crate::shared::validation::{validate_phone_format, EMAIL_RECORD_REGEX};

/// Database model for a contact submission
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Contact {
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

/// Normalized submission ready to be persisted
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewContact {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(
        length(min = 1, max = 255, message = "Email must be between 1 and 255 characters"),
        regex(path = *EMAIL_RECORD_REGEX, message = "Please enter a valid email")
    )]
    pub email: String,

    #[validate(custom(function = "validate_phone_format"))]
    pub phone: String,

    #[validate(length(min = 1, max = 200, message = "Subject must be between 1 and 200 characters"))]
    pub subject: String,

    #[validate(length(min = 1, max = 2000, message = "Message must be between 1 and 2000 characters"))]
    pub message: String,

    pub submitted_at: DateTime<Utc>,
    pub source_address: String,
}

impl NewContact {
    /// Trim every field, lowercase the email and default the phone to empty
    pub fn from_submission(
        dto: &CreateContactDto,
        source_address: String,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        let trimmed = |v: &Option<String>| v.as_deref().unwrap_or_default().trim().to_string();

        Self {
            name: trimmed(&dto.name),
            email: trimmed(&dto.email).to_lowercase(),
            phone: trimmed(&dto.phone),
            subject: trimmed(&dto.subject),
            message: trimmed(&dto.message),
            submitted_at,
            source_address,
        }
    }
}
