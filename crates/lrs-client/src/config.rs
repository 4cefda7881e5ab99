use serde::Deserialize;
use std::fmt;

fn default_endpoint() -> String {
    "http://localhost:1234/data/xAPI".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

/// Which store implementation the connector talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LrsBackend {
    #[default]
    Http,
    Memory,
}

#[derive(Clone, Deserialize)]
pub struct LrsConfig {
    #[serde(default)]
    pub backend: LrsBackend,
    /// Base xAPI endpoint; the statements resource is `{endpoint}/statements`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Per-request HTTP timeout in milliseconds. Default: 10000.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for LrsConfig {
    fn default() -> Self {
        Self {
            backend: LrsBackend::default(),
            endpoint: default_endpoint(),
            username: String::new(),
            password: String::new(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl fmt::Debug for LrsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LrsConfig")
            .field("backend", &self.backend)
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl LrsConfig {
    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }
}
