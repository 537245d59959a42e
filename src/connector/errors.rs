//! Backend connector errors
//!
//! These are opaque to the engine: it never catches or retries them, it only
//! propagates them to the caller of the search.

use thiserror::Error;

/// Result type for connector calls
pub type ConnectorResult<T> = Result<T, ConnectorError>;

/// Failures reported by a backend connector
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Backend could not be reached
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// Connector does not implement the operation
    #[error("operation not supported by connector: {0}")]
    Unsupported(&'static str),

}
