use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias using the canonical error facility
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on
/// programmatically and that appears in structured log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,
    InvalidDateRange,
    InvalidSectionKey,

    // Lookup
    NotFound,

    // Persistence collaborator
    Persistence,
    Serialization,

    // Shared cache tier (always recovered locally)
    CacheBackendUnavailable,
    Timeout,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidDateRange => "ERR_INVALID_DATE_RANGE",
            ExErrorKind::InvalidSectionKey => "ERR_INVALID_SECTION_KEY",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::CacheBackendUnavailable => "ERR_CACHE_BACKEND_UNAVAILABLE",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// True for kinds that describe a bad request rather than a system fault
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ExErrorKind::InvalidInput
                | ExErrorKind::InvalidDateRange
                | ExErrorKind::InvalidSectionKey
                | ExErrorKind::NotFound
        )
    }
}

/// Canonical structured error type
///
/// Carries a classification plus optional context for debugging. Cloneable
/// so that a single computation failure can be handed to every caller
/// waiting on the same cache key.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (document id, cache key, ...)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised by reconstruction, diffing and the cache tiers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LawHistoryError {
    /// The document key is unknown to the persistence collaborator
    #[error("Legal document not found: {document_id}")]
    DocumentNotFound { document_id: String },

    /// The section key has neither current text nor change history
    #[error("Section {section} not found in document {document_id}")]
    SectionNotFound {
        document_id: String,
        section: String,
    },

    /// Diff requested with an inverted date range
    #[error("Invalid date range: {date_a} is after {date_b}")]
    InvalidDateRange { date_a: NaiveDate, date_b: NaiveDate },

    /// A section key could not be parsed or is empty
    #[error("Invalid section key: {reason}")]
    InvalidSectionKey { reason: String },

    /// The shared cache tier could not be reached or answered with garbage
    #[error("Cache backend unavailable ({tier}): {reason}")]
    CacheBackendUnavailable { tier: String, reason: String },

    /// Cached payload could not be encoded/decoded
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<LawHistoryError> for ExError {
    fn from(err: LawHistoryError) -> Self {
        match err {
            LawHistoryError::DocumentNotFound { document_id } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_entity_id(document_id)
                    .with_message("Legal document not found")
            }
            LawHistoryError::SectionNotFound {
                document_id,
                section,
            } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(document_id)
                .with_message(format!("Section {} not found", section)),
            LawHistoryError::InvalidDateRange { date_a, date_b } => {
                ExError::new(ExErrorKind::InvalidDateRange).with_message(format!(
                    "date_a ({}) must not be after date_b ({})",
                    date_a, date_b
                ))
            }
            LawHistoryError::InvalidSectionKey { reason } => {
                ExError::new(ExErrorKind::InvalidSectionKey).with_message(reason)
            }
            LawHistoryError::CacheBackendUnavailable { tier, reason } => {
                ExError::new(ExErrorKind::CacheBackendUnavailable)
                    .with_entity_id(tier)
                    .with_message(reason)
            }
            LawHistoryError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for LawHistoryError {
    fn from(err: serde_json::Error) -> Self {
        LawHistoryError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        LawHistoryError::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes_are_stable() {
        let cases = [
            (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
            (ExErrorKind::InvalidDateRange, "ERR_INVALID_DATE_RANGE"),
            (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
            (ExErrorKind::Persistence, "ERR_PERSISTENCE"),
            (
                ExErrorKind::CacheBackendUnavailable,
                "ERR_CACHE_BACKEND_UNAVAILABLE",
            ),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_document_not_found_maps_to_not_found() {
        let err: ExError = LawHistoryError::DocumentNotFound {
            document_id: "1977:1160".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert_eq!(err.entity_id(), Some("1977:1160"));
        assert!(err.kind().is_client_error());
    }

    #[test]
    fn test_inverted_range_maps_to_invalid_date_range() {
        let err: ExError = LawHistoryError::InvalidDateRange {
            date_a: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            date_b: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::InvalidDateRange);
        assert!(err.message().contains("2020-01-01"));
    }

    #[test]
    fn test_display_includes_op_and_source() {
        let inner = ExError::new(ExErrorKind::Timeout).with_message("read timed out");
        let err = ExError::new(ExErrorKind::CacheBackendUnavailable)
            .with_op("l2_get")
            .with_source(inner);
        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_CACHE_BACKEND_UNAVAILABLE]"));
        assert!(rendered.contains("l2_get"));
        assert!(rendered.contains("ERR_TIMEOUT"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_cache_errors_are_not_client_errors() {
        assert!(!ExErrorKind::CacheBackendUnavailable.is_client_error());
        assert!(!ExErrorKind::Persistence.is_client_error());
    }
}
