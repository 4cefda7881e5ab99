use crate::error::ServiceError;
use lrs_statements::Rejected;
use lrs_types::Statement;
use uuid::Uuid;

/// Terminal state of a store operation.
#[derive(Debug)]
pub enum StoreOutcome {
    /// The store accepted the statement; carries the stored copy.
    Stored(Statement),
    /// Input validation failed; nothing was sent.
    Rejected(Rejected),
    /// The payload or the remote call failed.
    Failed(ServiceError),
}

impl StoreOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, Self::Stored(_))
    }
}

/// Result of a void sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoidSummary {
    /// Statements returned by the sweep query.
    pub examined: usize,
    /// Ids of statements a retraction was stored for, in query order.
    pub retracted: Vec<Uuid>,
    /// Ids of statements whose retraction failed.
    pub failed: Vec<Uuid>,
}
