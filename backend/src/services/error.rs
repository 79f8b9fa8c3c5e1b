//! Error taxonomy of the search engine.

use crate::db::repository::RepositoryError;

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors surfaced by the search engine.
///
/// All variants are recoverable at the request boundary: the caller may
/// re-prompt the user or retry.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The request is missing required text or coordinates, or names an
    /// unknown option. Rejected before any fetch.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The repository failed while fetching candidates.
    #[error("Upstream fetch failure: {0}")]
    UpstreamFetchFailure(#[from] RepositoryError),

    /// Malformed stored data (e.g. a NaN coordinate) reached a computation.
    #[error("Computation error: {0}")]
    ComputationError(String),
}

impl SearchError {
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery(message.into())
    }

    pub fn computation(message: impl Into<String>) -> Self {
        Self::ComputationError(message.into())
    }

    /// Stable code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidQuery(_) => "INVALID_QUERY",
            Self::UpstreamFetchFailure(_) => "UPSTREAM_FETCH_FAILURE",
            Self::ComputationError(_) => "COMPUTATION_ERROR",
        }
    }

    /// Upstream failures are worth retrying; the others need different input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::UpstreamFetchFailure(_))
    }
}
