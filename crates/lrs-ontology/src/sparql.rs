//! SPARQL pattern queries and result parsing.
//!
//! The pattern query selects every typed node whose URI ends with a given
//! fragment:
//!
//! ```text
//! PREFIX app: <prefix> PREFIX terms: <http://purl.org/dc/terms/>
//!  SELECT DISTINCT ?uri WHERE { ?uri a ?_ FILTER (REGEX(str(?uri),'<fragment>$')) }
//! ```
//!
//! The fragment is escaped twice: first so regex metacharacters match
//! literally, then so the result is a valid single-quoted SPARQL literal.

use serde_json::{json, Value};

const FILTER_OPEN: &str = "FILTER (REGEX(str(?uri),'";
const FILTER_CLOSE: &str = "$')) }";

const REGEX_META: &[char] = &[
    '\\', '.', '^', '$', '|', '?', '*', '+', '(', ')', '[', ']', '{', '}',
];

/// Builds the query matching every ontology node whose URI ends with `fragment`.
pub fn build_pattern_query(prefix: &str, fragment: &str) -> String {
    format!(
        "PREFIX app: <{prefix}> PREFIX terms: <http://purl.org/dc/terms/>  \
         SELECT DISTINCT ?uri WHERE {{ ?uri a ?_ {FILTER_OPEN}{}{FILTER_CLOSE}",
        escape_literal(&escape_regex(fragment))
    )
}

fn escape_regex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if REGEX_META.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Recovers the fragment from a query built by [`build_pattern_query`].
///
/// Returns `None` if `query` does not contain the pattern filter.
pub fn fragment_from_query(query: &str) -> Option<String> {
    let start = query.find(FILTER_OPEN)? + FILTER_OPEN.len();
    let end = query.rfind(FILTER_CLOSE)?;
    let literal = query.get(start..end)?;

    // Undo the literal escaping, then the regex escaping.
    let mut regex = String::with_capacity(literal.len());
    let mut chars = literal.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            regex.push(c);
            continue;
        }
        match chars.next()? {
            'n' => regex.push('\n'),
            'r' => regex.push('\r'),
            't' => regex.push('\t'),
            other => regex.push(other),
        }
    }

    let mut fragment = String::with_capacity(regex.len());
    let mut chars = regex.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            fragment.push(chars.next()?);
        } else {
            fragment.push(c);
        }
    }
    Some(fragment)
}

/// Extracts candidate URIs from a resolver reply.
///
/// Every field named `value`, at any depth, contributes its text in document
/// order. This matches SPARQL JSON result bindings
/// (`{"results":{"bindings":[{"uri":{"type":"uri","value":"..."}}]}}`) as
/// well as looser reply shapes. Empty values are skipped.
///
/// # Errors
///
/// Returns an error if the reply is not JSON.
pub fn candidate_uris(reply: &str) -> Result<Vec<String>, serde_json::Error> {
    let root: Value = serde_json::from_str(reply)?;
    let mut found = Vec::new();
    collect_values(&root, &mut found);
    Ok(found)
}

fn collect_values(node: &Value, found: &mut Vec<String>) {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                if key == "value" {
                    match child {
                        Value::String(text) if !text.is_empty() => found.push(text.clone()),
                        Value::Number(number) => found.push(number.to_string()),
                        Value::Bool(flag) => found.push(flag.to_string()),
                        _ => {}
                    }
                } else {
                    collect_values(child, found);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_values(item, found);
            }
        }
        _ => {}
    }
}

/// Renders `uris` as a SPARQL JSON result set binding `?uri`.
pub fn results_document(uris: &[&str]) -> Value {
    let bindings: Vec<Value> = uris
        .iter()
        .map(|uri| json!({ "uri": { "type": "uri", "value": uri } }))
        .collect();
    json!({
        "head": { "vars": ["uri"] },
        "results": { "bindings": bindings }
    })
}
