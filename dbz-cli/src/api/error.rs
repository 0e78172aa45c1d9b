//! Errors raised by the query builders themselves
//!
//! Transport failures are not represented here: whatever the configured
//! [`HttpClient`](super::HttpClient) returns is handed back to the caller as-is.

use std::fmt;

/// Errors detected locally, before any request is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// `fetch` was called on a builder that never received an HTTP client
    MissingHttpClient {
        /// Object/table the builder was created for
        object: String,
    },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHttpClient { object } => write!(
                f,
                "No HTTP client configured for query on '{}'; call with_http_client before fetch",
                object
            ),
        }
    }
}

impl std::error::Error for QueryError {}
