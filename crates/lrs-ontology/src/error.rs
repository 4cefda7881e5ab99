//! Error types for ontology lookups.

use thiserror::Error;

/// Errors reported by an [`OntologyResolver`](crate::OntologyResolver) backend.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// The resolver service answered with a non-success status.
    #[error("ontology resolver rejected query ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("ontology resolver timed out")]
    Timeout,

    #[error("ontology resolver transport error: {0}")]
    Transport(reqwest::Error),

    #[error("invalid ontology resolver endpoint: {0}")]
    InvalidEndpoint(String),
}

impl From<reqwest::Error> for ResolverError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(error)
        }
    }
}

/// Errors from [`IdResolver::resolve`](crate::IdResolver::resolve).
///
/// "Not found" and "malformed reply" are not errors; they are
/// [`Resolution`](crate::Resolution) outcomes.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Resolver(#[from] ResolverError),

    /// The caller's deadline passed before the resolver replied.
    #[error("ontology lookup deadline exceeded")]
    DeadlineExceeded,
}
