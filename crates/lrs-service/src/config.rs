use lrs_types::FALLBACK_HOMEPAGE;
use serde::Deserialize;
use std::time::Duration;

fn default_homepage() -> Option<String> {
    Some(FALLBACK_HOMEPAGE.to_string())
}

fn default_system_actor() -> String {
    "cthulhu@appsistlrs.de".to_string()
}

fn default_request_timeout_ms() -> u64 {
    15_000
}

/// Identity settings for statements built by the connector.
#[derive(Debug, Clone, Deserialize)]
pub struct StatementsConfig {
    /// Home page of agent accounts. Falls back to the default home page when
    /// absent or not a valid URI.
    #[serde(default = "default_homepage")]
    pub homepage: Option<String>,
    /// Account name of the actor issuing retraction statements.
    #[serde(default = "default_system_actor")]
    pub system_actor: String,
}

impl Default for StatementsConfig {
    fn default() -> Self {
        Self {
            homepage: default_homepage(),
            system_actor: default_system_actor(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Overall deadline for one operation, covering every remote call it
    /// makes. Default: 15000.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl ServiceConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
