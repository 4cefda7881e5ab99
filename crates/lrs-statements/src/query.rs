//! Statement queries against the store.

use crate::error::Rejected;
use crate::{required, resolve_homepage};
use lrs_types::{Agent, StatementsQuery, Verb, QUERY_LIMIT};
use url::Url;

/// Builds [`StatementsQuery`] values.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    homepage: String,
}

impl QueryBuilder {
    pub fn new(homepage: Option<&str>) -> Self {
        Self {
            homepage: resolve_homepage(homepage),
        }
    }

    /// Builds a query for statements by `actor` with `verb`, optionally
    /// restricted to `activity`.
    ///
    /// The verb display label keeps the leading `/` of the final path
    /// segment (`"/completed"`), unlike recording statements. It is never
    /// sent to the store.
    ///
    /// The activity filter is only applied when `activity` is non-empty and
    /// parses as a URI; otherwise the query spans all activities.
    ///
    /// # Errors
    ///
    /// Returns [`Rejected::MissingField`] if `actor` or `verb` is absent or empty.
    pub fn build_query(
        &self,
        actor: Option<&str>,
        verb: Option<&str>,
        activity: Option<&str>,
    ) -> Result<StatementsQuery, Rejected> {
        let actor = required("actor", actor)?;
        let verb = required("verb", verb)?;

        let label = match verb.rfind('/') {
            Some(index) => &verb[index..],
            None => verb,
        };

        let activity = match activity.filter(|activity| !activity.is_empty()) {
            Some(activity) if Url::parse(activity).is_ok() => Some(activity.to_string()),
            Some(activity) => {
                tracing::debug!(activity, "activity is not a valid URI, querying without it");
                None
            }
            None => None,
        };

        Ok(StatementsQuery {
            agent: Agent::with_account(&self.homepage, actor),
            verb: Verb::new(verb, label),
            activity,
            limit: QUERY_LIMIT,
        })
    }
}
