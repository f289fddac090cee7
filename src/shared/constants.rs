/// Where form handlers send the browser back to
pub const CONTACT_REDIRECT: &str = "/#contact";

// =============================================================================
// FLASH MESSAGES
// =============================================================================

pub const FLASH_MISSING_FIELDS: &str = "Please fill in all fields";

pub const FLASH_INVALID_EMAIL: &str = "Please enter a valid email address";

pub const FLASH_CONTACT_SUCCESS: &str = "Thank you for your message! We'll get back to you soon.";

pub const FLASH_GENERIC_ERROR: &str =
    "Sorry, something went wrong while sending your message. Please try again later.";

// =============================================================================
// MIGRATION
// =============================================================================

/// Default first offset of a migration run
pub const DEFAULT_MIGRATION_START: i64 = 0;

/// Default end offset of a migration run (exclusive)
pub const DEFAULT_MIGRATION_END: i64 = 1_000_000;

/// Visitor page size of the all-tables copy
pub const FULL_COPY_VISITOR_PAGE_SIZE: i64 = 50;

/// Contact page size of the all-tables copy
pub const FULL_COPY_CONTACT_PAGE_SIZE: i64 = 20;

/// Fallback for location fields the lookup service did not return
pub const UNKNOWN_LOCATION: &str = "Unknown";
