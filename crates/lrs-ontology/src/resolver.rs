use crate::config::OntologyConfig;
use crate::error::ResolverError;
use crate::sparql::{fragment_from_query, results_document};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

/// A service that evaluates ontology pattern queries.
#[async_trait]
pub trait OntologyResolver: Send + Sync {
    /// Evaluates `query` and returns the raw reply payload.
    async fn resolve_pattern(&self, query: &str) -> Result<String, ResolverError>;
}

/// Posts queries to the semantic wiki service as `{"sparql":{"query":...}}`.
#[derive(Debug, Clone)]
pub struct HttpOntologyResolver {
    client: Client,
    endpoint: String,
}

impl HttpOntologyResolver {
    /// # Errors
    ///
    /// Returns [`ResolverError::InvalidEndpoint`] if the endpoint is empty, or
    /// [`ResolverError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &OntologyConfig) -> Result<Self, ResolverError> {
        if config.endpoint.trim().is_empty() {
            return Err(ResolverError::InvalidEndpoint(
                "endpoint is empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl OntologyResolver for HttpOntologyResolver {
    async fn resolve_pattern(&self, query: &str) -> Result<String, ResolverError> {
        let envelope = json!({ "sparql": { "query": query } });
        let response = self.client.post(&self.endpoint).json(&envelope).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ResolverError::Rejected {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(body)
    }
}

/// Answers pattern queries from a fixed list of ontology URIs.
#[derive(Debug, Clone, Default)]
pub struct StaticOntologyResolver {
    uris: Vec<String>,
}

impl StaticOntologyResolver {
    pub fn new<I, S>(uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            uris: uris.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl OntologyResolver for StaticOntologyResolver {
    async fn resolve_pattern(&self, query: &str) -> Result<String, ResolverError> {
        let matching: Vec<&str> = match fragment_from_query(query) {
            Some(fragment) => self
                .uris
                .iter()
                .filter(|uri| uri.ends_with(&fragment))
                .map(String::as_str)
                .collect(),
            None => Vec::new(),
        };
        Ok(results_document(&matching).to_string())
    }
}
