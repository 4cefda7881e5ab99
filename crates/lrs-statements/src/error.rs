//! Rejection reasons for statement and query construction.

/// Why a builder refused to produce a statement or query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejected {
    /// A required input was absent or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The target of a retraction is not a valid statement identifier.
    #[error("malformed statement id: {0}")]
    MalformedStatementId(String),
}
