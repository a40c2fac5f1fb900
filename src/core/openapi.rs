use utoipa::{Modify, OpenApi};

use crate::features::contacts::{dtos as contacts_dtos, handlers as contacts_handlers};
use crate::features::system::{dtos as system_dtos, handlers as system_handlers};
use crate::shared::types::{ApiResponse, Pagination};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Contacts
        contacts_handlers::submit_contact,
        contacts_handlers::list_contacts,
        contacts_handlers::get_contact,
        contacts_handlers::delete_contact,
        // System
        system_handlers::health_check,
    ),
    components(
        schemas(
            // Shared
            Pagination,
            // Contacts
            contacts_dtos::CreateContactDto,
            contacts_dtos::ContactReceiptDto,
            contacts_dtos::ContactResponseDto,
            contacts_dtos::DeletedContactDto,
            ApiResponse<contacts_dtos::ContactReceiptDto>,
            ApiResponse<Vec<contacts_dtos::ContactResponseDto>>,
            ApiResponse<contacts_dtos::ContactResponseDto>,
            ApiResponse<contacts_dtos::DeletedContactDto>,
            // System
            system_dtos::HealthDto,
        )
    ),
    tags(
        (name = "contacts", description = "Contact form submissions"),
        (name = "system", description = "Liveness and discovery"),
    ),
    info(
        title = "Contact Form API",
        version = "0.1.0",
        description = "Contact form submission and retrieval API",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

/// OpenAPI document with the configured title, version and description
pub fn api_doc(modifier: &SwaggerInfoModifier) -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    modifier.modify(&mut openapi);
    openapi
}
