//! Class search error types.

use thiserror::Error;

/// Errors that can occur while normalizing filters or querying the index.
///
/// Every variant carries enough structure for a caller to react
/// programmatically — offending field, offending value, candidate list —
/// rather than parsing message text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// Malformed filter input (bad wildcard, time, term, or unknown
    /// field). Caller error, never retried.
    #[error("invalid '{field}' filter value '{value}': {message}")]
    InvalidFilterSyntax {
        field: String,
        value: String,
        message: String,
    },

    /// Fuzzy matching found several equally-plausible canonical values;
    /// the caller must disambiguate instead of the engine guessing.
    #[error("ambiguous '{field}' value '{value}': could be any of {candidates:?}")]
    AmbiguousFilterValue {
        field: String,
        value: String,
        candidates: Vec<String>,
    },

    /// Empty or whitespace-only discovery keyword.
    #[error("keyword must not be empty")]
    InvalidKeyword,

    /// Valid identifier with no matching record.
    #[error("not found: {0}")]
    NotFound(String),

    /// Index unreachable, timed out, or returned a malformed response.
    /// Transient; safe for the caller to retry with backoff.
    #[error("search backend unavailable: {0}")]
    BackendUnavailable(String),
}

impl SearchError {
    pub fn invalid_filter(
        field: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidFilterSyntax {
            field: field.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// Only backend unavailability is transient; everything else is a
    /// caller error or a definitive miss.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::BackendUnavailable(_))
    }
}

/// Convenience alias for class search results.
pub type SearchResult<T> = Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_backend_errors_are_retryable() {
        assert!(SearchError::BackendUnavailable("timeout".into()).is_retryable());
        assert!(!SearchError::InvalidKeyword.is_retryable());
        assert!(!SearchError::NotFound("class 99999".into()).is_retryable());
        assert!(!SearchError::invalid_filter("subject", "??", "no match").is_retryable());
    }

    #[test]
    fn ambiguous_error_names_candidates() {
        let err = SearchError::AmbiguousFilterValue {
            field: "subject".into(),
            value: "bio".into(),
            candidates: vec!["BIOL".into(), "BIOM".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("BIOL"));
        assert!(msg.contains("BIOM"));
    }
}
