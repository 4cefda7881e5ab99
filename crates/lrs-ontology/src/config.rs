use lrs_types::ONTOLOGY_PREFIX;
use serde::Deserialize;

fn default_endpoint() -> String {
    "http://localhost:8092/services/semwiki/query".to_string()
}

fn default_prefix() -> String {
    ONTOLOGY_PREFIX.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

/// Which ontology resolver implementation the connector uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OntologyBackend {
    #[default]
    Http,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OntologyConfig {
    #[serde(default)]
    pub backend: OntologyBackend,
    /// URL the SPARQL envelope is posted to.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Namespace prefix marking fully-qualified activity URIs.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Per-request HTTP timeout in milliseconds. Default: 10000.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Ontology node URIs served by the in-memory backend.
    #[serde(default)]
    pub uris: Vec<String>,
}

impl Default for OntologyConfig {
    fn default() -> Self {
        Self {
            backend: OntologyBackend::default(),
            endpoint: default_endpoint(),
            prefix: default_prefix(),
            timeout_ms: default_timeout_ms(),
            uris: Vec::new(),
        }
    }
}
