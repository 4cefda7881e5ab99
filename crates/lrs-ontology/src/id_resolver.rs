use crate::error::ResolveError;
use crate::resolver::OntologyResolver;
use crate::sparql::{build_pattern_query, candidate_uris};
use std::sync::Arc;
use tokio::time::Instant;

/// Outcome of resolving an activity fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The first matching ontology URI.
    Found(String),
    /// The resolver replied with no candidates.
    NotFound,
    /// The resolver reply could not be parsed.
    Malformed(String),
}

/// Expands activity fragments to fully-qualified ontology URIs.
#[derive(Clone)]
pub struct IdResolver {
    resolver: Arc<dyn OntologyResolver>,
    prefix: String,
}

impl IdResolver {
    pub fn new(resolver: Arc<dyn OntologyResolver>, prefix: impl Into<String>) -> Self {
        Self {
            resolver,
            prefix: prefix.into(),
        }
    }

    /// Namespace prefix of fully-qualified activity URIs.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns `true` if `activity_id` already carries the ontology prefix.
    pub fn is_fully_qualified(&self, activity_id: &str) -> bool {
        activity_id.starts_with(&self.prefix)
    }

    /// Looks up the ontology URI ending with `fragment`.
    ///
    /// Sends exactly one query and waits for the reply until `deadline`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Resolver`] if the resolver call fails and
    /// [`ResolveError::DeadlineExceeded`] if it does not reply in time.
    pub async fn resolve(
        &self,
        fragment: &str,
        deadline: Instant,
    ) -> Result<Resolution, ResolveError> {
        let query = build_pattern_query(&self.prefix, fragment);
        tracing::debug!(fragment, %query, "sending ontology pattern query");

        let reply = tokio::time::timeout_at(deadline, self.resolver.resolve_pattern(&query))
            .await
            .map_err(|_| ResolveError::DeadlineExceeded)??;

        let resolution = match candidate_uris(&reply) {
            Ok(candidates) => match candidates.into_iter().next() {
                Some(uri) => {
                    tracing::debug!(fragment, uri = %uri, "resolved full activity id");
                    Resolution::Found(uri)
                }
                None => {
                    tracing::warn!(fragment, "no URI found in ontology for activity fragment");
                    Resolution::NotFound
                }
            },
            Err(e) => {
                tracing::error!(fragment, error = %e, "ontology reply could not be parsed");
                Resolution::Malformed(e.to_string())
            }
        };
        Ok(resolution)
    }
}

impl std::fmt::Debug for IdResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdResolver")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
