//! Recording and retraction statements.

use crate::error::Rejected;
use crate::{required, resolve_homepage};
use lrs_types::{verbs, Activity, Agent, Statement, StatementObject, StatementRef, Verb};
use uuid::Uuid;

/// Builds statements for submission to the store.
#[derive(Debug, Clone)]
pub struct StatementBuilder {
    homepage: String,
}

impl StatementBuilder {
    /// Creates a builder using `homepage` for agent accounts, falling back
    /// to the default home page when it is absent or invalid.
    pub fn new(homepage: Option<&str>) -> Self {
        Self {
            homepage: resolve_homepage(homepage),
        }
    }

    /// Home page used for every agent account this builder creates.
    pub fn homepage(&self) -> &str {
        &self.homepage
    }

    /// Builds a statement recording that `actor` did `verb` to `activity`.
    ///
    /// The verb display label is the part of the verb URI after its last `/`.
    ///
    /// # Errors
    ///
    /// Returns [`Rejected::MissingField`] if any input is absent or empty.
    pub fn build_recording_statement(
        &self,
        actor: Option<&str>,
        verb: Option<&str>,
        activity: Option<&str>,
    ) -> Result<Statement, Rejected> {
        let actor = required("actor", actor)?;
        let verb = required("verb", verb)?;
        let activity = required("activityId", activity)?;

        let label = match verb.rfind('/') {
            Some(index) => &verb[index + 1..],
            None => verb,
        };

        Ok(Statement::new(
            Agent::with_account(&self.homepage, actor),
            Verb::new(verb, label),
            StatementObject::Activity(Activity::new(activity)),
        ))
    }

    /// Builds a statement by `system_actor` voiding the statement `target`.
    ///
    /// # Errors
    ///
    /// Returns [`Rejected::MissingField`] if the system actor is absent or
    /// empty, and [`Rejected::MalformedStatementId`] if `target` is not a UUID.
    pub fn build_retraction_statement(
        &self,
        system_actor: Option<&str>,
        target: &str,
    ) -> Result<Statement, Rejected> {
        let system_actor = required("systemActor", system_actor)?;
        let id = Uuid::parse_str(target)
            .map_err(|_| Rejected::MalformedStatementId(target.to_string()))?;

        Ok(Statement::new(
            Agent::with_account(&self.homepage, system_actor),
            Verb::new(verbs::VOIDED, "voided"),
            StatementObject::StatementRef(StatementRef { id }),
        ))
    }
}
