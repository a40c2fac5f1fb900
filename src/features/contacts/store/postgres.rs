use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::contacts::models::{Contact, NewContact};
use crate::features::contacts::store::ContactStore;

const CONTACT_COLUMNS: &str = "id, name, email, phone, subject, message, submitted_at, \
     source_address, created_at, updated_at";

/// Convert database error to a more specific AppError.
///
/// Constraint violations mean the record itself is unacceptable and map to a
/// client error; everything else stays a generic database failure.
fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        let code = db_err.code();
        match code.as_deref() {
            // check_violation
            Some("23514") => {
                let constraint = db_err.constraint().unwrap_or("contacts");
                return AppError::InvalidRecord(vec![format!(
                    "Contact violates constraint '{}'",
                    constraint
                )]);
            }
            // not_null_violation
            Some("23502") => {
                return AppError::InvalidRecord(vec![
                    "Contact is missing a required field".to_string()
                ]);
            }
            // string_data_right_truncation
            Some("22001") => {
                return AppError::InvalidRecord(vec![
                    "Contact field exceeds its maximum length".to_string(),
                ]);
            }
            _ => {}
        }
    }

    AppError::Database(e)
}

/// PostgreSQL-backed contact store
pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactStore for PgContactStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn insert(&self, contact: NewContact) -> Result<Contact> {
        let query = format!(
            r#"
            INSERT INTO contacts (name, email, phone, subject, message, submitted_at, source_address)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            CONTACT_COLUMNS
        );

        sqlx::query_as::<_, Contact>(&query)
            .bind(&contact.name)
            .bind(&contact.email)
            .bind(&contact.phone)
            .bind(&contact.subject)
            .bind(&contact.message)
            .bind(contact.submitted_at)
            .bind(&contact.source_address)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert contact: {:?}", e);
                handle_db_error(e)
            })
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contacts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count contacts: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Contact>> {
        let query = format!(
            r#"
            SELECT {}
            FROM contacts
            ORDER BY submitted_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
            CONTACT_COLUMNS
        );

        sqlx::query_as::<_, Contact>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list contacts: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>> {
        let query = format!("SELECT {} FROM contacts WHERE id = $1", CONTACT_COLUMNS);

        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get contact by id: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Contact>> {
        let query = format!(
            "DELETE FROM contacts WHERE id = $1 RETURNING {}",
            CONTACT_COLUMNS
        );

        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete contact: {:?}", e);
                AppError::Database(e)
            })
    }
}
