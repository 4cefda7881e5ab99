//! In-process statement store for development and tests.

use crate::error::LrsError;
use crate::LrsClient;
use async_trait::async_trait;
use chrono::Utc;
use lrs_types::{Statement, StatementsQuery, StatementsResult, Timestamp};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

/// A store that keeps statements in memory.
///
/// Queries follow the xAPI rules the connector relies on: statements voided
/// by a stored voiding statement are not returned, agents match on their
/// account, and results are truncated to the query limit.
///
/// Uses `std::sync::Mutex`: every lock is held for a brief `Vec` operation
/// and never across an `.await`.
#[derive(Debug, Default)]
pub struct InMemoryLrs {
    statements: Mutex<Vec<Statement>>,
    queries: AtomicUsize,
}

impl InMemoryLrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every stored statement, in insertion order.
    pub fn statements(&self) -> Vec<Statement> {
        self.lock().clone()
    }

    /// Number of queries answered so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Statement>> {
        // Poisoning is ignored: the vector is only ever pushed to.
        self.statements
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn matches(statement: &Statement, query: &StatementsQuery) -> bool {
    if statement.actor.account != query.agent.account {
        return false;
    }
    if statement.verb.id != query.verb.id {
        return false;
    }
    match &query.activity {
        Some(activity) => statement.activity_id() == Some(activity.as_str()),
        None => true,
    }
}

#[async_trait]
impl LrsClient for InMemoryLrs {
    async fn save_statement(&self, statement: &Statement) -> Result<Statement, LrsError> {
        let mut stored = statement.clone();
        let now = Timestamp::from(Utc::now());
        stored.id = Some(stored.id.unwrap_or_else(Uuid::new_v4));
        stored.timestamp = Some(stored.timestamp.take().unwrap_or_else(|| now.clone()));
        stored.stored = Some(now);

        let mut statements = self.lock();
        if statements.iter().any(|existing| existing.id == stored.id) {
            return Err(LrsError::Rejected {
                status: 409,
                message: format!("statement {:?} already exists", stored.id),
            });
        }
        statements.push(stored.clone());
        Ok(stored)
    }

    async fn query_statements(
        &self,
        query: &StatementsQuery,
    ) -> Result<StatementsResult, LrsError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let statements = self.lock();

        let voided: HashSet<Uuid> = statements
            .iter()
            .filter(|statement| statement.is_voiding())
            .filter_map(Statement::referenced_statement)
            .collect();

        let matching = statements
            .iter()
            .filter(|statement| statement.id.is_some_and(|id| !voided.contains(&id)))
            .filter(|statement| matches(statement, query))
            .take(query.limit as usize)
            .cloned()
            .collect();

        Ok(StatementsResult {
            statements: matching,
            more: None,
        })
    }
}
