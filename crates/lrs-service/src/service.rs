use crate::config::{ServiceConfig, StatementsConfig};
use crate::error::ServiceError;
use crate::outcome::{StoreOutcome, VoidSummary};
use lrs_client::LrsClient;
use lrs_ontology::{IdResolver, Resolution};
use lrs_statements::{QueryBuilder, StatementBuilder};
use lrs_types::{is_voided_verb, verbs, Statement, StatementsQuery, StatementsResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Count reported when the store query fails.
pub const COUNT_FAILED: i64 = -1;

/// Number of statements in `result` whose verb is not a voiding verb.
pub fn count_visible(result: &StatementsResult) -> i64 {
    let visible = result
        .statements
        .iter()
        .filter(|statement| !is_voided_verb(&statement.verb.id))
        .count();
    i64::try_from(visible).unwrap_or(i64::MAX)
}

/// Records learning experiences in the store and answers questions about them.
pub struct LearningExperienceService {
    lrs: Arc<dyn LrsClient>,
    ids: IdResolver,
    statements: StatementBuilder,
    queries: QueryBuilder,
    system_actor: String,
    request_timeout: Duration,
}

impl LearningExperienceService {
    pub fn new(
        lrs: Arc<dyn LrsClient>,
        ids: IdResolver,
        statements: &StatementsConfig,
        service: &ServiceConfig,
    ) -> Self {
        let homepage = statements.homepage.as_deref();
        Self {
            lrs,
            ids,
            statements: StatementBuilder::new(homepage),
            queries: QueryBuilder::new(homepage),
            system_actor: statements.system_actor.clone(),
            request_timeout: service.request_timeout(),
        }
    }

    fn deadline(&self) -> Instant {
        Instant::now() + self.request_timeout
    }

    /// Stores a statement received as serialized JSON.
    pub async fn store_statement(&self, payload: &str) -> StoreOutcome {
        let statement: Statement = match serde_json::from_str(payload) {
            Ok(statement) => statement,
            Err(e) => {
                tracing::warn!(error = %e, "discarding malformed statement payload");
                return StoreOutcome::Failed(ServiceError::MalformedPayload(e));
            }
        };
        self.submit(&statement, self.deadline()).await
    }

    /// Builds a recording statement from its parts and stores it.
    pub async fn store_from_parts(
        &self,
        actor: Option<&str>,
        verb: Option<&str>,
        activity_id: Option<&str>,
    ) -> StoreOutcome {
        match self
            .statements
            .build_recording_statement(actor, verb, activity_id)
        {
            Ok(statement) => self.submit(&statement, self.deadline()).await,
            Err(reason) => {
                tracing::debug!(%reason, "statement rejected");
                StoreOutcome::Rejected(reason)
            }
        }
    }

    /// Counts the non-voided statements matching actor, verb and activity.
    ///
    /// A fully-qualified activity is queried directly. Any other non-empty
    /// activity is first resolved through the ontology; when the ontology
    /// has no match (or its reply is unreadable) the count is 0 and the store
    /// is not contacted. An empty or absent activity counts across all
    /// activities.
    ///
    /// Returns [`COUNT_FAILED`] if the store query or the ontology lookup
    /// fails, and 0 if actor or verb is missing or the activity does not
    /// resolve to a valid URI.
    pub async fn count_matching_statements(
        &self,
        actor: Option<&str>,
        verb: Option<&str>,
        activity_id: Option<&str>,
    ) -> i64 {
        if let Err(reason) = self.queries.build_query(actor, verb, None) {
            tracing::debug!(%reason, "count query rejected");
            return 0;
        }

        let deadline = self.deadline();
        let activity = match activity_id.filter(|id| !id.is_empty()) {
            None => None,
            Some(id) if self.ids.is_fully_qualified(id) => Some(id.to_string()),
            Some(fragment) => match self.ids.resolve(fragment, deadline).await {
                Ok(Resolution::Found(uri)) => Some(uri),
                Ok(Resolution::NotFound) => return 0,
                Ok(Resolution::Malformed(reason)) => {
                    tracing::warn!(
                        fragment,
                        %reason,
                        "treating unreadable ontology reply as no match"
                    );
                    return 0;
                }
                Err(e) => {
                    tracing::error!(fragment, error = %e, "activity id resolution failed");
                    return COUNT_FAILED;
                }
            },
        };

        let query = match self.queries.build_query(actor, verb, activity.as_deref()) {
            Ok(query) => query,
            Err(reason) => {
                tracing::debug!(%reason, "count query rejected");
                return 0;
            }
        };

        // An activity that cannot be sent as a filter must not widen the count.
        if activity.is_some() && query.activity.is_none() {
            tracing::warn!(
                activity = ?activity,
                "activity id is not a valid URI, counting no matches"
            );
            return 0;
        }

        match self.query(&query, deadline).await {
            Ok(result) => {
                let count = count_visible(&result);
                tracing::debug!(
                    returned = result.len(),
                    count,
                    activity = ?query.activity,
                    "counted matching statements"
                );
                count
            }
            Err(e) => {
                tracing::error!(error = %e, verb = %query.verb.id, "statement count query failed");
                COUNT_FAILED
            }
        }
    }

    /// Retracts every statement of `actor` with `verb`.
    ///
    /// Statements that are themselves voiding statements or that reference
    /// another statement are skipped. Retractions are stored one at a time,
    /// in the order the store returned the originals.
    pub async fn void_all_for_actor_and_verb(
        &self,
        actor: Option<&str>,
        verb: Option<&str>,
    ) -> VoidSummary {
        let mut summary = VoidSummary::default();

        let query = match self.queries.build_query(actor, verb, None) {
            Ok(query) => query,
            Err(reason) => {
                tracing::debug!(%reason, "void sweep rejected");
                return summary;
            }
        };

        let deadline = self.deadline();
        let result = match self.query(&query, deadline).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "void sweep query failed");
                return summary;
            }
        };
        summary.examined = result.len();

        for statement in &result.statements {
            if statement.is_voiding() || statement.referenced_statement().is_some() {
                continue;
            }
            let Some(target) = statement.id else {
                tracing::warn!("skipping stored statement without an id");
                continue;
            };

            let retraction = match self
                .statements
                .build_retraction_statement(Some(&self.system_actor), &target.to_string())
            {
                Ok(retraction) => retraction,
                Err(reason) => {
                    tracing::debug!(%reason, "retraction rejected");
                    summary.failed.push(target);
                    continue;
                }
            };

            match self.submit(&retraction, deadline).await {
                StoreOutcome::Stored(_) => summary.retracted.push(target),
                _ => summary.failed.push(target),
            }
        }

        tracing::info!(
            examined = summary.examined,
            retracted = summary.retracted.len(),
            failed = summary.failed.len(),
            "void sweep finished"
        );
        summary
    }

    /// Logs every activity `agent` interacted with.
    ///
    /// Returns the result set, or `None` when the agent is missing or the
    /// query fails.
    pub async fn interacted_items(&self, agent: Option<&str>) -> Option<StatementsResult> {
        let query = match self
            .queries
            .build_query(agent, Some(verbs::INTERACTED), None)
        {
            Ok(query) => query,
            Err(reason) => {
                tracing::debug!(%reason, "interacted items query rejected");
                return None;
            }
        };

        match self.query(&query, self.deadline()).await {
            Ok(result) => {
                match serde_json::to_string(&result) {
                    Ok(json) => tracing::info!(statements = %json, "interacted production items"),
                    Err(e) => tracing::warn!(error = %e, "could not render interacted items"),
                }
                Some(result)
            }
            Err(e) => {
                tracing::error!(error = %e, "interacted items query failed");
                None
            }
        }
    }

    async fn submit(&self, statement: &Statement, deadline: Instant) -> StoreOutcome {
        tracing::debug!(verb = %statement.verb.id, "submitting statement");
        let result = tokio::time::timeout_at(deadline, self.lrs.save_statement(statement)).await;
        match result {
            Ok(Ok(stored)) => {
                tracing::debug!(id = ?stored.id, "statement stored in LRS");
                StoreOutcome::Stored(stored)
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, "storing statement in LRS failed");
                StoreOutcome::Failed(ServiceError::Store(e))
            }
            Err(_) => {
                tracing::error!("storing statement in LRS timed out");
                StoreOutcome::Failed(ServiceError::DeadlineExceeded)
            }
        }
    }

    async fn query(
        &self,
        query: &StatementsQuery,
        deadline: Instant,
    ) -> Result<StatementsResult, ServiceError> {
        tracing::debug!(
            agent = ?query.agent.account_name(),
            verb = %query.verb.id,
            activity = ?query.activity,
            "querying LRS"
        );
        let result = tokio::time::timeout_at(deadline, self.lrs.query_statements(query))
            .await
            .map_err(|_| ServiceError::DeadlineExceeded)??;
        tracing::debug!(found = result.len(), "LRS query returned");
        Ok(result)
    }
}

impl std::fmt::Debug for LearningExperienceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LearningExperienceService")
            .field("ids", &self.ids)
            .field("system_actor", &self.system_actor)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}
