#![allow(dead_code)]

use async_trait::async_trait;
use lrs_client::{LrsClient, LrsError};
use lrs_ontology::{IdResolver, OntologyResolver, ResolverError, StaticOntologyResolver};
use lrs_service::{LearningExperienceService, ServiceConfig, StatementsConfig};
use lrs_types::{
    Activity, Agent, Statement, StatementObject, StatementsQuery, StatementsResult, Verb,
    FALLBACK_HOMEPAGE, ONTOLOGY_PREFIX,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const ACTIVITY_A: &str = "http://www.appsist.de/ontology/festo/station_a";
pub const ACTIVITY_B: &str = "http://www.appsist.de/ontology/festo/station_b";

pub enum QueryReply {
    Statements(Vec<Statement>),
    Fail,
    Hang,
}

/// A store double that answers every query with a fixed reply and records
/// what it was asked to do.
pub struct ScriptedLrs {
    reply: QueryReply,
    fail_retractions_of: HashSet<Uuid>,
    hang_saves: bool,
    saved: Mutex<Vec<Statement>>,
    queries: Mutex<Vec<StatementsQuery>>,
}

impl ScriptedLrs {
    pub fn new(reply: QueryReply) -> Arc<Self> {
        Arc::new(Self::build(reply, HashSet::new(), false))
    }

    /// Rejects saves of retractions that target any of `ids`.
    pub fn failing_retractions(reply: QueryReply, ids: &[Uuid]) -> Arc<Self> {
        Arc::new(Self::build(reply, ids.iter().copied().collect(), false))
    }

    pub fn hanging_saves() -> Arc<Self> {
        Arc::new(Self::build(
            QueryReply::Statements(Vec::new()),
            HashSet::new(),
            true,
        ))
    }

    fn build(reply: QueryReply, fail_retractions_of: HashSet<Uuid>, hang_saves: bool) -> Self {
        Self {
            reply,
            fail_retractions_of,
            hang_saves,
            saved: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn saved(&self) -> Vec<Statement> {
        self.saved.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<StatementsQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl LrsClient for ScriptedLrs {
    async fn save_statement(&self, statement: &Statement) -> Result<Statement, LrsError> {
        if self.hang_saves {
            std::future::pending::<()>().await;
        }
        if let Some(target) = statement.referenced_statement() {
            if self.fail_retractions_of.contains(&target) {
                return Err(LrsError::Rejected {
                    status: 500,
                    message: "store unavailable".to_string(),
                });
            }
        }
        let mut stored = statement.clone();
        stored.id = Some(Uuid::new_v4());
        self.saved.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn query_statements(
        &self,
        query: &StatementsQuery,
    ) -> Result<StatementsResult, LrsError> {
        self.queries.lock().unwrap().push(query.clone());
        match &self.reply {
            QueryReply::Statements(statements) => Ok(StatementsResult {
                statements: statements.clone(),
                more: None,
            }),
            QueryReply::Fail => Err(LrsError::Rejected {
                status: 503,
                message: "service unavailable".to_string(),
            }),
            QueryReply::Hang => std::future::pending().await,
        }
    }
}

pub enum ResolverReply {
    Uris(StaticOntologyResolver),
    Raw(String),
    Fail,
    Hang,
}

/// An ontology resolver double that counts the lookups it receives.
pub struct CountingResolver {
    reply: ResolverReply,
    calls: AtomicUsize,
}

impl CountingResolver {
    pub fn with_uris(uris: &[&str]) -> Arc<Self> {
        Self::new(ResolverReply::Uris(StaticOntologyResolver::new(
            uris.iter().copied(),
        )))
    }

    pub fn new(reply: ResolverReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OntologyResolver for CountingResolver {
    async fn resolve_pattern(&self, query: &str) -> Result<String, ResolverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            ResolverReply::Uris(resolver) => resolver.resolve_pattern(query).await,
            ResolverReply::Raw(body) => Ok(body.clone()),
            ResolverReply::Fail => Err(ResolverError::Rejected {
                status: 502,
                message: "bad gateway".to_string(),
            }),
            ResolverReply::Hang => std::future::pending().await,
        }
    }
}

pub fn service(
    lrs: Arc<dyn LrsClient>,
    resolver: Arc<dyn OntologyResolver>,
) -> LearningExperienceService {
    LearningExperienceService::new(
        lrs,
        IdResolver::new(resolver, ONTOLOGY_PREFIX),
        &StatementsConfig::default(),
        &ServiceConfig::default(),
    )
}

/// A stored statement with an id, as the store would return it.
pub fn stored(actor: &str, verb: &str, activity: &str) -> Statement {
    let mut statement = Statement::new(
        Agent::with_account(FALLBACK_HOMEPAGE, actor),
        Verb::new(verb, "label"),
        StatementObject::Activity(Activity::new(activity)),
    );
    statement.id = Some(Uuid::new_v4());
    statement
}
