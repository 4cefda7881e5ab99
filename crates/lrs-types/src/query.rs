use serde::{Deserialize, Serialize};

use crate::statement::{Agent, Statement, Verb};

/// Filter sent to the store's statements resource.
///
/// Only the verb id goes on the wire; the display label is informational.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementsQuery {
    pub agent: Agent,
    pub verb: Verb,
    pub activity: Option<String>,
    pub limit: u32,
}

impl StatementsQuery {
    /// Encodes the query as xAPI statements-resource parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the agent cannot be serialized to JSON.
    pub fn to_query_pairs(&self) -> Result<Vec<(&'static str, String)>, serde_json::Error> {
        let mut pairs = vec![
            ("agent", serde_json::to_string(&self.agent)?),
            ("verb", self.verb.id.clone()),
        ];
        if let Some(activity) = &self.activity {
            pairs.push(("activity", activity.clone()));
        }
        pairs.push(("limit", self.limit.to_string()));
        Ok(pairs)
    }
}

/// A page of statements returned by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementsResult {
    #[serde(default)]
    pub statements: Vec<Statement>,
    /// Continuation URL for the next page. Never followed by the connector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more: Option<String>,
}

impl StatementsResult {
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
