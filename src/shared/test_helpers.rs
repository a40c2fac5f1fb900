use crate::features::contacts::dtos::CreateContactDto;

pub fn sample_create_dto() -> CreateContactDto {
    CreateContactDto {
        name: Some("Jane Doe".to_string()),
        email: Some("jane@example.com".to_string()),
        phone: Some("+1 234-567-8900".to_string()),
        subject: Some("Partnership inquiry".to_string()),
        message: Some("Hello, I would like to know more.".to_string()),
    }
}
