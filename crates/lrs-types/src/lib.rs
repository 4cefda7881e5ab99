//! Shared xAPI types and constants for the LRS connector.
//!
//! This crate provides the data model exchanged with a Learning Record Store:
//! agents with account identities, verbs, activities, statement references,
//! statements, and the query/result envelopes used when asking the store for
//! prior activity.
//!
//! Every other crate in the workspace builds on these definitions. The types
//! serialize to the xAPI 1.0 JSON shape, and statements keep any top-level
//! properties they do not model (result, context, authority, ...) so raw
//! payloads can be forwarded to the store without loss.

mod query;
mod statement;

pub use query::{StatementsQuery, StatementsResult};
pub use statement::{
    Activity, Agent, AgentAccount, LanguageMap, Statement, StatementObject, StatementRef, Timestamp,
    Verb,
};

/// URI prefix of the domain ontology. Activity identifiers starting with this
/// prefix are fully qualified; anything else is a fragment that must be
/// resolved first.
pub const ONTOLOGY_PREFIX: &str = "http://www.appsist.de/ontology/";

/// Home page used for agent accounts when the configured one is missing or
/// not a valid URI.
pub const FALLBACK_HOMEPAGE: &str = "http://dev.appsist.de";

/// Maximum number of statements requested from the store per query.
pub const QUERY_LIMIT: u32 = 1000;

/// xAPI version sent with every request to the store.
pub const XAPI_VERSION: &str = "1.0.0";

/// Language tag used for verb display labels.
pub const DISPLAY_LANGUAGE: &str = "en-US";

/// Well-known ADL verb identifiers.
pub mod verbs {
    /// Marks a prior statement as retracted.
    pub const VOIDED: &str = "http://adlnet.gov/expapi/verbs/voided";
    /// A learner completed an activity.
    pub const COMPLETED: &str = "http://adlnet.gov/expapi/verbs/completed";
    /// A learner interacted with an activity.
    pub const INTERACTED: &str = "http://adlnet.gov/expapi/verbs/interacted";
}

/// Returns `true` if the verb identifier denotes a voiding verb.
///
/// Matching is by substring, so any verb URI containing `voided` counts.
pub fn is_voided_verb(verb_id: &str) -> bool {
    verb_id.contains("voided")
}
