use crate::config::LrsConfig;
use crate::error::LrsError;
use crate::LrsClient;
use async_trait::async_trait;
use lrs_types::{Statement, StatementsQuery, StatementsResult, XAPI_VERSION};
use reqwest::{Client, Method, RequestBuilder, Response};
use std::time::Duration;
use url::Url;
use uuid::Uuid;

/// Header carrying the xAPI version on every request.
pub const VERSION_HEADER: &str = "X-Experience-API-Version";

/// xAPI statements-resource client over HTTP with basic authentication.
#[derive(Debug, Clone)]
pub struct HttpLrsClient {
    client: Client,
    statements_url: String,
    username: String,
    password: String,
}

impl HttpLrsClient {
    /// Creates a client for the store described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`LrsError::InvalidEndpoint`] if the endpoint is not a valid
    /// URL, or [`LrsError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &LrsConfig) -> Result<Self, LrsError> {
        Url::parse(&config.endpoint)
            .map_err(|e| LrsError::InvalidEndpoint(format!("{}: {}", config.endpoint, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(concat!("lrs-connector/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            statements_url: format!("{}/statements", config.endpoint.trim_end_matches('/')),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Full URL of the statements resource.
    pub fn statements_url(&self) -> &str {
        &self.statements_url
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, &self.statements_url)
            .basic_auth(&self.username, Some(&self.password))
            .header(VERSION_HEADER, XAPI_VERSION)
    }
}

/// Reads the body of a successful response, or turns an error status into
/// [`LrsError::Rejected`] carrying the store's message.
async fn success_body(response: Response) -> Result<String, LrsError> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(LrsError::Rejected {
            status: status.as_u16(),
            message: body,
        })
    }
}

#[async_trait]
impl LrsClient for HttpLrsClient {
    async fn save_statement(&self, statement: &Statement) -> Result<Statement, LrsError> {
        let payload = serde_json::to_vec(statement)?;
        let response = self
            .request(Method::POST)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;
        let body = success_body(response).await?;

        let ids: Vec<Uuid> =
            serde_json::from_str(&body).map_err(|e| LrsError::Decode(e.to_string()))?;

        let mut stored = statement.clone();
        if let Some(id) = ids.into_iter().next() {
            stored.id = Some(id);
        }
        tracing::debug!(id = ?stored.id, "statement stored in LRS");
        Ok(stored)
    }

    async fn query_statements(
        &self,
        query: &StatementsQuery,
    ) -> Result<StatementsResult, LrsError> {
        let params = query.to_query_pairs()?;
        let response = self.request(Method::GET).query(&params).send().await?;
        let body = success_body(response).await?;

        let result: StatementsResult =
            serde_json::from_str(&body).map_err(|e| LrsError::Decode(e.to_string()))?;
        if result.more.as_deref().is_some_and(|more| !more.is_empty()) {
            tracing::debug!(
                returned = result.len(),
                limit = query.limit,
                "LRS has more matching statements than were returned"
            );
        }
        Ok(result)
    }
}
