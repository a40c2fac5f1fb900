use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, ClientAddress};
use crate::features::contacts::dtos::{
    ContactReceiptDto, ContactResponseDto, CreateContactDto, DeletedContactDto,
};
use crate::features::contacts::services::ContactService;
use crate::shared::constants::{MSG_CONTACT_DELETED, MSG_CONTACT_SUBMITTED};
use crate::shared::types::{ApiResponse, PaginationQuery};

/// Submit a contact form
///
/// Public endpoint. The caller's address is recorded alongside the submission.
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = CreateContactDto,
    responses(
        (status = 201, description = "Contact form submitted successfully", body = ApiResponse<ContactReceiptDto>),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Internal server error")
    ),
    tag = "contacts"
)]
pub async fn submit_contact(
    State(service): State<Arc<ContactService>>,
    ClientAddress(source_address): ClientAddress,
    AppJson(dto): AppJson<CreateContactDto>,
) -> Result<(StatusCode, Json<ApiResponse<ContactReceiptDto>>)> {
    let receipt = service.submit(dto, source_address).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(receipt),
            Some(MSG_CONTACT_SUBMITTED.to_string()),
        )),
    ))
}

/// List contact submissions, newest first
#[utoipa::path(
    get,
    path = "/api/contacts",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of contact submissions", body = ApiResponse<Vec<ContactResponseDto>>),
        (status = 500, description = "Internal server error")
    ),
    tag = "contacts"
)]
pub async fn list_contacts(
    State(service): State<Arc<ContactService>>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ContactResponseDto>>>> {
    let (contacts, pagination) = service.list(&query).await?;
    Ok(Json(ApiResponse::paginated(contacts, pagination)))
}

/// Get a contact submission by ID
#[utoipa::path(
    get,
    path = "/api/contact/{id}",
    params(
        ("id" = String, Path, description = "Contact ID (UUID)")
    ),
    responses(
        (status = 200, description = "Contact found", body = ApiResponse<ContactResponseDto>),
        (status = 400, description = "Invalid contact ID format"),
        (status = 404, description = "Contact not found")
    ),
    tag = "contacts"
)]
pub async fn get_contact(
    State(service): State<Arc<ContactService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ContactResponseDto>>> {
    let contact = service.get_by_id(&id).await?;
    Ok(Json(ApiResponse::success(Some(contact), None)))
}

/// Delete a contact submission by ID
#[utoipa::path(
    delete,
    path = "/api/contact/{id}",
    params(
        ("id" = String, Path, description = "Contact ID (UUID)")
    ),
    responses(
        (status = 200, description = "Contact deleted successfully", body = ApiResponse<DeletedContactDto>),
        (status = 400, description = "Invalid contact ID format"),
        (status = 404, description = "Contact not found")
    ),
    tag = "contacts"
)]
pub async fn delete_contact(
    State(service): State<Arc<ContactService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedContactDto>>> {
    let deleted = service.delete_by_id(&id).await?;
    Ok(Json(ApiResponse::success(
        Some(DeletedContactDto { id: deleted.id }),
        Some(MSG_CONTACT_DELETED.to_string()),
    )))
}
