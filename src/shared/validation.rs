//! Contact field rules shared by the HTTP handlers and the form client.
//!
//! `check_contact_fields` is the fail-fast request check: it reports the first
//! rule a payload breaks. Record-level constraints (lengths, strict email
//! pattern) live on `NewContact` via `validator` and are reported together.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use validator::{ValidationError, ValidationErrors};

lazy_static! {
    /// Loose address shape accepted from a form
    /// - Valid: "jane@example.com", "a.b+c@mail.example.org"
    /// - Invalid: "jane", "jane@example", "jane doe@example.com"
    pub static ref EMAIL_SHAPE_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();

    /// Strict address pattern enforced on stored records. Word characters
    /// are ASCII only.
    pub static ref EMAIL_RECORD_REGEX: Regex =
        Regex::new(r"(?-u)^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").unwrap();

    /// Phone numbers: optional leading `+` and `(`, then at least ten
    /// ASCII digits, spaces, hyphens or parentheses
    /// - Valid: "+1 234-567-8900", "(555) 123-4567", "0812345678"
    /// - Invalid: "12345", "phone: 1234567890", "١٢٣٤٥٦٧٨٩٠"
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^[+]?[(]?[0-9\s\-()]{10,}$").unwrap();
}

/// Borrowed view over the five submitted fields
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactFields<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub subject: Option<&'a str>,
    pub message: Option<&'a str>,
}

/// A broken request rule, in check order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRule {
    NameRequired,
    ValidEmailRequired,
    SubjectRequired,
    MessageRequired,
    InvalidPhone,
}

impl ContactRule {
    pub fn message(&self) -> &'static str {
        match self {
            ContactRule::NameRequired => "Name is required",
            ContactRule::ValidEmailRequired => "Valid email is required",
            ContactRule::SubjectRequired => "Subject is required",
            ContactRule::MessageRequired => "Message is required",
            ContactRule::InvalidPhone => "Invalid phone number format",
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ContactRule::NameRequired => "name",
            ContactRule::ValidEmailRequired => "email",
            ContactRule::SubjectRequired => "subject",
            ContactRule::MessageRequired => "message",
            ContactRule::InvalidPhone => "phone",
        }
    }
}

impl fmt::Display for ContactRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ContactRule {}

fn blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Check a payload and return the first rule it breaks
pub fn check_contact_fields(fields: &ContactFields<'_>) -> Result<(), ContactRule> {
    if blank(fields.name) {
        return Err(ContactRule::NameRequired);
    }

    match fields.email.map(str::trim) {
        Some(email) if EMAIL_SHAPE_REGEX.is_match(email) => {}
        _ => return Err(ContactRule::ValidEmailRequired),
    }

    if blank(fields.subject) {
        return Err(ContactRule::SubjectRequired);
    }

    if blank(fields.message) {
        return Err(ContactRule::MessageRequired);
    }

    // Matched untrimmed; only a blank phone is skipped
    if let Some(phone) = fields.phone.filter(|p| !p.trim().is_empty()) {
        if !PHONE_REGEX.is_match(phone) {
            return Err(ContactRule::InvalidPhone);
        }
    }

    Ok(())
}

/// `validator` hook for the optional phone column; empty means "not given"
pub fn validate_phone_format(phone: &str) -> Result<(), ValidationError> {
    if phone.is_empty() || PHONE_REGEX.is_match(phone) {
        return Ok(());
    }
    let mut err = ValidationError::new("phone_format");
    err.message = Some("Invalid phone number format".into());
    Err(err)
}

const FIELD_ORDER: [&str; 5] = ["name", "email", "phone", "subject", "message"];

/// Flatten `validator` errors into messages, in form field order
pub fn collect_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<(String, Vec<String>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let field = field.to_string();
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                })
                .collect();
            (field, messages)
        })
        .collect();

    fields.sort_by_key(|(field, _)| {
        FIELD_ORDER
            .iter()
            .position(|f| f == field)
            .unwrap_or(usize::MAX)
    });

    fields.into_iter().flat_map(|(_, m)| m).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ContactFields<'static> {
        ContactFields {
            name: Some("Jane Doe"),
            email: Some("jane@example.com"),
            phone: Some("+1 234-567-8900"),
            subject: Some("Hello"),
            message: Some("I would like to know more."),
        }
    }

    #[test]
    fn test_valid_payload_passes() {
        assert_eq!(check_contact_fields(&valid()), Ok(()));
    }

    #[test]
    fn test_each_required_field_is_named() {
        let cases = [
            (ContactFields { name: None, ..valid() }, "name"),
            (ContactFields { email: Some("  "), ..valid() }, "email"),
            (ContactFields { subject: Some("\t"), ..valid() }, "subject"),
            (ContactFields { message: None, ..valid() }, "message"),
        ];
        for (fields, field) in cases {
            let rule = check_contact_fields(&fields).unwrap_err();
            assert_eq!(rule.field(), field);
            assert!(rule.message().to_lowercase().contains(field));
        }
    }

    #[test]
    fn test_rules_are_checked_in_order() {
        let empty = ContactFields::default();
        assert_eq!(check_contact_fields(&empty), Err(ContactRule::NameRequired));

        let fields = ContactFields {
            subject: None,
            phone: Some("123"),
            ..valid()
        };
        assert_eq!(
            check_contact_fields(&fields),
            Err(ContactRule::SubjectRequired)
        );
    }

    #[test]
    fn test_email_shape() {
        for bad in ["jane", "jane@example", "jane doe@example.com", "@example.com"] {
            let fields = ContactFields {
                email: Some(bad),
                ..valid()
            };
            assert_eq!(
                check_contact_fields(&fields),
                Err(ContactRule::ValidEmailRequired),
                "{bad}"
            );
        }
        let padded = ContactFields {
            email: Some("  Jane@Example.COM "),
            ..valid()
        };
        assert_eq!(check_contact_fields(&padded), Ok(()));
    }

    #[test]
    fn test_phone_is_optional_but_checked() {
        let blank_phone = ContactFields {
            phone: Some("   "),
            ..valid()
        };
        assert_eq!(check_contact_fields(&blank_phone), Ok(()));

        let short = ContactFields {
            phone: Some("12345"),
            ..valid()
        };
        assert_eq!(check_contact_fields(&short), Err(ContactRule::InvalidPhone));
    }

    #[test]
    fn test_phone_is_matched_untrimmed() {
        let padded = ContactFields {
            phone: Some(" +1234567890"),
            ..valid()
        };
        assert_eq!(check_contact_fields(&padded), Err(ContactRule::InvalidPhone));

        let trailing = ContactFields {
            phone: Some("+1234567890 "),
            ..valid()
        };
        assert_eq!(check_contact_fields(&trailing), Ok(()));
    }

    #[test]
    fn test_non_ascii_digits_and_letters_are_rejected() {
        assert!(!PHONE_REGEX.is_match("١٢٣٤٥٦٧٨٩٠"));
        assert!(!PHONE_REGEX.is_match("+٩٦٦ ٥٠ ١٢٣ ٤٥٦٧"));
        assert!(!EMAIL_RECORD_REGEX.is_match("jöhn@example.com"));
        assert!(!EMAIL_RECORD_REGEX.is_match("jane@exämple.com"));
        assert!(EMAIL_RECORD_REGEX.is_match("john_99@example.com"));
    }

    #[test]
    fn test_phone_regex() {
        assert!(PHONE_REGEX.is_match("+1 234-567-8900"));
        assert!(PHONE_REGEX.is_match("(555) 123-4567"));
        assert!(PHONE_REGEX.is_match("0812345678"));
        assert!(!PHONE_REGEX.is_match("555-1234"));
        assert!(!PHONE_REGEX.is_match("call 1234567890"));
    }

    #[test]
    fn test_email_record_regex() {
        assert!(EMAIL_RECORD_REGEX.is_match("jane.doe@mail.example.com"));
        assert!(EMAIL_RECORD_REGEX.is_match("j-d@example.io"));
        assert!(!EMAIL_RECORD_REGEX.is_match("jane@example.museum"));
        assert!(!EMAIL_RECORD_REGEX.is_match("jane@@example.com"));
    }

    #[test]
    fn test_validate_phone_format_allows_empty() {
        assert!(validate_phone_format("").is_ok());
        assert!(validate_phone_format("+62 812 3456 7890").is_ok());
        assert!(validate_phone_format("12").is_err());
    }
}
