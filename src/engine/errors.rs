//! Search error types
//!
//! Error codes:
//! - SEARCH_UNSUPPORTED_PREDICATE (REJECT)
//! - SEARCH_UNSUPPORTED_FILTER (REJECT)
//! - SEARCH_INVALID_PREDICATE_VALUE (REJECT)
//! - SEARCH_EMPTY_AND_PREDICATE (REJECT)
//! - SEARCH_BACKEND_FAILURE (ERROR)
//!
//! Rejections are raised before anything is emitted to the sink. Backend
//! failures propagate unmodified and end the search.

use std::fmt;

use thiserror::Error;

use crate::connector::ConnectorError;
use crate::model::{FilterOp, PredicateError};

/// Severity levels for search errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Caller request rejected
    Reject,
    /// Backend call failed
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors raised by a search
#[derive(Debug, Error)]
pub enum SearchError {
    /// Predicate shape is not Equals, Contains or And of two
    #[error("unsupported predicate: {0}")]
    UnsupportedPredicate(String),

    /// Attribute is neither enumerable nor natively filterable for the operator
    #[error("attribute '{attribute}' cannot be filtered with {op}")]
    UnsupportedFilter { attribute: String, op: FilterOp },

    /// Required predicate value is blank or missing
    #[error("invalid value for attribute '{attribute}': {reason}")]
    InvalidPredicateValue { attribute: String, reason: String },

    /// And predicate without sub-predicates
    #[error("and predicate has no sub-predicates")]
    EmptyAndPredicate,

    /// Backend connector failure
    #[error("backend failure: {0}")]
    Backend(#[from] ConnectorError),
}

impl SearchError {
    /// Create an unsupported filter error
    pub fn unsupported_filter(attribute: impl Into<String>, op: FilterOp) -> Self {
        SearchError::UnsupportedFilter {
            attribute: attribute.into(),
            op,
        }
    }

    /// Create an invalid predicate value error
    pub fn invalid_value(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        SearchError::InvalidPredicateValue {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SearchError::UnsupportedPredicate(_) => "SEARCH_UNSUPPORTED_PREDICATE",
            SearchError::UnsupportedFilter { .. } => "SEARCH_UNSUPPORTED_FILTER",
            SearchError::InvalidPredicateValue { .. } => "SEARCH_INVALID_PREDICATE_VALUE",
            SearchError::EmptyAndPredicate => "SEARCH_EMPTY_AND_PREDICATE",
            SearchError::Backend(_) => "SEARCH_BACKEND_FAILURE",
        }
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        match self {
            SearchError::Backend(_) => Severity::Error,
            _ => Severity::Reject,
        }
    }

    /// Returns true if the request itself was rejected
    pub fn is_rejection(&self) -> bool {
        self.severity() == Severity::Reject
    }
}

impl From<PredicateError> for SearchError {
    fn from(err: PredicateError) -> Self {
        match err {
            PredicateError::EmptyAnd => SearchError::EmptyAndPredicate,
            other => SearchError::UnsupportedPredicate(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SearchError::UnsupportedPredicate("or".into()).code(),
            "SEARCH_UNSUPPORTED_PREDICATE"
        );
        assert_eq!(
            SearchError::unsupported_filter("mail", FilterOp::Equals).code(),
            "SEARCH_UNSUPPORTED_FILTER"
        );
        assert_eq!(
            SearchError::invalid_value("__UID__", "blank").code(),
            "SEARCH_INVALID_PREDICATE_VALUE"
        );
        assert_eq!(
            SearchError::EmptyAndPredicate.code(),
            "SEARCH_EMPTY_AND_PREDICATE"
        );
    }

    #[test]
    fn test_backend_severity() {
        let err = SearchError::from(ConnectorError::Unavailable("down".into()));
        assert_eq!(err.severity(), Severity::Error);
        assert!(!err.is_rejection());
        assert_eq!(err.code(), "SEARCH_BACKEND_FAILURE");
    }

    #[test]
    fn test_predicate_error_mapping() {
        assert!(matches!(
            SearchError::from(PredicateError::EmptyAnd),
            SearchError::EmptyAndPredicate
        ));
        assert!(matches!(
            SearchError::from(PredicateError::AndArity(3)),
            SearchError::UnsupportedPredicate(_)
        ));
    }

    #[test]
    fn test_error_display() {
        let err = SearchError::unsupported_filter("phone", FilterOp::Contains);
        assert_eq!(err.to_string(), "attribute 'phone' cannot be filtered with contains");
    }
}
