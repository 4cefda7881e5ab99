//! LRS connector HTTP surface.

pub mod api;
pub mod config;

use axum::{
    routing::{get, post},
    Extension, Json, Router,
};
use config::Config;
use lrs_client::{HttpLrsClient, InMemoryLrs, LrsBackend, LrsClient, LrsError};
use lrs_ontology::{
    HttpOntologyResolver, IdResolver, OntologyBackend, OntologyResolver, ResolverError,
    StaticOntologyResolver,
};
use lrs_service::LearningExperienceService;
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<LearningExperienceService>,
}

/// Errors that prevent the connector from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to set up LRS client: {0}")]
    Lrs(#[from] LrsError),

    #[error("failed to set up ontology resolver: {0}")]
    Ontology(#[from] ResolverError),
}

/// Wires the service to the backends selected in `config`.
///
/// # Errors
///
/// Returns `StartupError` if an HTTP backend has an invalid endpoint or its
/// client cannot be built.
pub fn build_service(config: &Config) -> Result<LearningExperienceService, StartupError> {
    let lrs: Arc<dyn LrsClient> = match config.lrs.backend {
        LrsBackend::Http => Arc::new(HttpLrsClient::new(&config.lrs)?),
        LrsBackend::Memory => {
            tracing::warn!("using in-memory LRS, statements are not persisted");
            Arc::new(InMemoryLrs::new())
        }
    };

    let resolver: Arc<dyn OntologyResolver> = match config.ontology.backend {
        OntologyBackend::Http => Arc::new(HttpOntologyResolver::new(&config.ontology)?),
        OntologyBackend::Memory => {
            tracing::info!(
                uris = config.ontology.uris.len(),
                "using in-memory ontology resolver"
            );
            Arc::new(StaticOntologyResolver::new(config.ontology.uris.iter().cloned()))
        }
    };

    Ok(LearningExperienceService::new(
        lrs,
        IdResolver::new(resolver, config.ontology.prefix.clone()),
        &config.statements,
        &config.service,
    ))
}

/// Health check handler.
///
/// Returns `200 OK` with connector status and version.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router, mounting the connector routes under
/// `base_path`.
pub fn app(state: AppState, base_path: &str) -> Router {
    let connector = Router::new()
        .route("/statements", post(api::store_statement_handler))
        .route("/statements/build", post(api::build_statement_handler))
        .route("/statements/count", post(api::count_statements_handler))
        .route("/progress/void", post(api::void_progress_handler))
        .route("/items/interacted", post(api::interacted_items_handler));

    let base = base_path.trim_end_matches('/');
    let router = if base.is_empty() {
        Router::new().merge(connector)
    } else {
        let base = if base.starts_with('/') {
            base.to_string()
        } else {
            format!("/{base}")
        };
        Router::new().nest(&base, connector)
    };

    router
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}
