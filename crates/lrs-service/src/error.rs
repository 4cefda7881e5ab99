//! Failures of a single service operation.

use lrs_client::LrsError;
use lrs_ontology::ResolveError;

/// Why an operation failed after passing validation.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A raw statement payload could not be parsed.
    #[error("malformed statement payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// The store rejected the request or could not be reached.
    #[error(transparent)]
    Store(#[from] LrsError),

    /// The ontology lookup failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The operation's deadline passed while waiting on the store.
    #[error("deadline exceeded waiting for the LRS")]
    DeadlineExceeded,
}
