//! Connector configuration loading from file and environment variables.

use lrs_client::LrsConfig;
use lrs_ontology::OntologyConfig;
use lrs_service::{ServiceConfig, StatementsConfig};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level connector configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Learning Record Store connection.
    #[serde(default)]
    pub lrs: LrsConfig,

    /// Ontology resolver connection.
    #[serde(default)]
    pub ontology: OntologyConfig,

    /// Identities used in built statements.
    #[serde(default)]
    pub statements: StatementsConfig,

    /// Per-operation settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path prefix of the connector routes. Empty or `/` mounts them at the root.
    #[serde(default = "default_base_path")]
    pub base_path: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "lrs_service=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    8094
}

fn default_base_path() -> String {
    "/services/lrsconnect".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_path: default_base_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `LRSCONNECT_HOST` overrides `server.host`
/// - `LRSCONNECT_PORT` overrides `server.port`
/// - `LRSCONNECT_BASE_PATH` overrides `server.base_path`
/// - `LRSCONNECT_LRS_ENDPOINT` overrides `lrs.endpoint`
/// - `LRSCONNECT_LRS_USERNAME` overrides `lrs.username`
/// - `LRSCONNECT_LRS_PASSWORD` overrides `lrs.password`
/// - `LRSCONNECT_ONTOLOGY_ENDPOINT` overrides `ontology.endpoint`
/// - `LRSCONNECT_HOMEPAGE` overrides `statements.homepage`
/// - `LRSCONNECT_LOG_LEVEL` overrides `logging.level`
/// - `LRSCONNECT_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Applies `LRSCONNECT_*` overrides read through `lookup`.
///
/// Values that fail to parse are ignored.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("LRSCONNECT_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Some(port) = lookup("LRSCONNECT_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Some(base_path) = lookup("LRSCONNECT_BASE_PATH") {
        config.server.base_path = base_path;
    }
    if let Some(endpoint) = lookup("LRSCONNECT_LRS_ENDPOINT") {
        config.lrs.endpoint = endpoint;
    }
    if let Some(username) = lookup("LRSCONNECT_LRS_USERNAME") {
        config.lrs.username = username;
    }
    if let Some(password) = lookup("LRSCONNECT_LRS_PASSWORD") {
        config.lrs.password = password;
    }
    if let Some(endpoint) = lookup("LRSCONNECT_ONTOLOGY_ENDPOINT") {
        config.ontology.endpoint = endpoint;
    }
    if let Some(homepage) = lookup("LRSCONNECT_HOMEPAGE") {
        config.statements.homepage = Some(homepage);
    }
    if let Some(level) = lookup("LRSCONNECT_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = lookup("LRSCONNECT_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lrs_client::LrsBackend;
    use lrs_ontology::OntologyBackend;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.server.port, 8094);
        assert_eq!(config.server.base_path, "/services/lrsconnect");
        assert_eq!(config.lrs.backend, LrsBackend::Http);
        assert_eq!(config.lrs.endpoint, "http://localhost:1234/data/xAPI");
        assert_eq!(config.lrs.timeout_ms, 10_000);
        assert_eq!(config.ontology.prefix, "http://www.appsist.de/ontology/");
        assert_eq!(
            config.statements.homepage.as_deref(),
            Some("http://dev.appsist.de")
        );
        assert_eq!(config.statements.system_actor, "cthulhu@appsistlrs.de");
        assert_eq!(config.service.request_timeout_ms, 15_000);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[server]
port = 9000
base_path = ""

[lrs]
backend = "memory"
username = "key"
password = "secret"

[ontology]
backend = "memory"
uris = ["http://www.appsist.de/ontology/festo/abc123"]

[statements]
homepage = "https://lms.example.org"

[service]
request_timeout_ms = 500
"#
        )
        .unwrap();

        let config = load_config(file.path().to_str()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.base_path, "");
        assert_eq!(config.server.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.lrs.backend, LrsBackend::Memory);
        assert_eq!(config.lrs.username, "key");
        assert_eq!(config.lrs.endpoint, "http://localhost:1234/data/xAPI");
        assert_eq!(config.ontology.backend, OntologyBackend::Memory);
        assert_eq!(config.ontology.uris.len(), 1);
        assert_eq!(
            config.statements.homepage.as_deref(),
            Some("https://lms.example.org")
        );
        assert_eq!(config.statements.system_actor, "cthulhu@appsistlrs.de");
        assert_eq!(config.service.request_timeout_ms, 500);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = load_config(path.to_str()).unwrap();
        assert_eq!(config.server.port, 8094);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[server\nport = ").unwrap();
        let result = load_config(file.path().to_str());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("LRSCONNECT_HOST", "0.0.0.0"),
            ("LRSCONNECT_PORT", "not-a-port"),
            ("LRSCONNECT_BASE_PATH", "/lrs"),
            ("LRSCONNECT_LRS_ENDPOINT", "https://lrs.example.org/xAPI"),
            ("LRSCONNECT_LRS_PASSWORD", "hunter2"),
            ("LRSCONNECT_HOMEPAGE", "https://lms.example.org"),
            ("LRSCONNECT_LOG_JSON", "1"),
        ]);

        let mut config = Config::default();
        apply_env_overrides(&mut config, |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.server.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(config.server.port, 8094);
        assert_eq!(config.server.base_path, "/lrs");
        assert_eq!(config.lrs.endpoint, "https://lrs.example.org/xAPI");
        assert_eq!(config.lrs.password, "hunter2");
        assert_eq!(config.lrs.username, "");
        assert_eq!(
            config.statements.homepage.as_deref(),
            Some("https://lms.example.org")
        );
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
    }
}
