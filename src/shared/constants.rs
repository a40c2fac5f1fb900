/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Recorded when no origin address can be determined for a request
pub const UNKNOWN_SOURCE_ADDRESS: &str = "unknown";

/// Key under which the client keeps its fallback log
pub const LEADS_STORAGE_KEY: &str = "leads";

// =============================================================================
// RESPONSE MESSAGES
// =============================================================================

pub const MSG_CONTACT_SUBMITTED: &str = "Contact form submitted successfully";
pub const MSG_CONTACT_DELETED: &str = "Contact deleted successfully";
pub const MSG_CONTACT_NOT_FOUND: &str = "Contact not found";
pub const MSG_INVALID_CONTACT_ID: &str = "Invalid contact ID format";
pub const MSG_ENDPOINT_NOT_FOUND: &str = "Endpoint not found";
pub const MSG_INTERNAL_ERROR: &str = "Internal server error. Please try again later.";
pub const MSG_RATE_LIMITED: &str = "Too many requests from this IP, please try again later.";
