//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Entity identifiers
pub const FIELD_DOCUMENT_ID: &str = "document_id";
pub const FIELD_AS_OF: &str = "as_of";
pub const FIELD_DATE_A: &str = "date_a";
pub const FIELD_DATE_B: &str = "date_b";

// Cache fields
pub const FIELD_CACHE_KIND: &str = "cache_kind";
pub const FIELD_CACHE_TIER: &str = "cache_tier";
pub const FIELD_CACHE_KEY: &str = "cache_key";

// Collection sizes
pub const FIELD_SECTION_COUNT: &str = "section_count";
pub const FIELD_AMENDMENT_COUNT: &str = "amendment_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Cache tier names
pub const TIER_L1: &str = "l1";
pub const TIER_L2: &str = "l2";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_DOCUMENT_ID.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_tier_names_are_distinct() {
        assert_ne!(TIER_L1, TIER_L2);
    }
}
