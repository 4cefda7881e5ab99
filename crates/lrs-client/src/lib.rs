//! Learning Record Store client for the LRS connector.
//!
//! Defines the [`LrsClient`] capability the connector core uses to save and
//! query statements, an HTTP implementation speaking the xAPI statements
//! resource with basic authentication, and an in-memory store for local
//! development and tests.

pub mod config;
pub mod error;
pub mod http;
pub mod memory;

pub use config::{LrsBackend, LrsConfig};
pub use error::LrsError;
pub use http::HttpLrsClient;
pub use memory::InMemoryLrs;

use async_trait::async_trait;
use lrs_types::{Statement, StatementsQuery, StatementsResult};

/// Access to a Learning Record Store.
#[async_trait]
pub trait LrsClient: Send + Sync {
    /// Saves a statement and returns it with the identifier assigned by the store.
    async fn save_statement(&self, statement: &Statement) -> Result<Statement, LrsError>;

    /// Returns the statements matching `query`.
    async fn query_statements(&self, query: &StatementsQuery)
        -> Result<StatementsResult, LrsError>;
}
