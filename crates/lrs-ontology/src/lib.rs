//! Ontology lookups for the LRS connector.
//!
//! Activity identifiers arriving from other services are often bare
//! fragments (`abc123`) rather than fully-qualified ontology URIs. The
//! [`IdResolver`] expands such a fragment by sending a SPARQL pattern query
//! to an [`OntologyResolver`] and taking the first matching URI.
//!
//! # Outcomes
//!
//! | Reply | Result |
//! |-------|--------|
//! | at least one candidate URI | `Ok(Resolution::Found(uri))` |
//! | no candidates | `Ok(Resolution::NotFound)` |
//! | unparsable payload | `Ok(Resolution::Malformed(reason))` |
//! | transport failure / deadline | `Err(ResolveError)` |
//!
//! The resolver never retries; callers pass the deadline for the lookup.

pub mod config;
pub mod error;
pub mod id_resolver;
pub mod resolver;
pub mod sparql;

pub use config::{OntologyBackend, OntologyConfig};
pub use error::{ResolveError, ResolverError};
pub use id_resolver::{IdResolver, Resolution};
pub use resolver::{HttpOntologyResolver, OntologyResolver, StaticOntologyResolver};
