//! Construction of xAPI statements and statement queries.
//!
//! Builders take loosely-typed inputs (possibly absent or empty strings from
//! the event bus or HTTP callers) and either produce a well-formed value or
//! a [`Rejected`] reason. A rejection is a validation gate, not a fault:
//! callers log it and abandon the operation.
//!
//! Both builders resolve the agent account home page the same way: the
//! configured home page if it parses as a URI, otherwise
//! [`lrs_types::FALLBACK_HOMEPAGE`].

pub mod error;
pub mod query;
pub mod statement;

pub use error::Rejected;
pub use query::QueryBuilder;
pub use statement::StatementBuilder;

use lrs_types::FALLBACK_HOMEPAGE;
use url::Url;

/// Resolves the agent account home page.
///
/// Returns `configured` when it is present and a syntactically valid URI,
/// otherwise the fallback home page.
pub fn resolve_homepage(configured: Option<&str>) -> String {
    match configured {
        Some(homepage) if Url::parse(homepage).is_ok() => homepage.to_string(),
        Some(homepage) => {
            tracing::warn!(
                homepage,
                fallback = FALLBACK_HOMEPAGE,
                "configured homepage is not a valid URI, using fallback"
            );
            FALLBACK_HOMEPAGE.to_string()
        }
        None => FALLBACK_HOMEPAGE.to_string(),
    }
}

/// Returns the value of a required input, rejecting absent or empty values.
pub(crate) fn required<'a>(
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, Rejected> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Rejected::MissingField(field)),
    }
}
