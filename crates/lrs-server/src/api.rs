//! Request handlers for the connector routes.
//!
//! Store, void and interacted-items requests are answered with `202 Accepted`
//! once the operation has run; their outcome is only visible in the logs.
//! Count requests echo the query together with the amount.

use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Extension, Json},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lrs_types::verbs;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Request body carrying a serialized xAPI statement.
#[derive(Debug, Deserialize)]
pub struct StoreStatementRequest {
    /// The statement as a JSON string.
    pub statement: Option<String>,
}

/// Request body naming an actor, verb and activity.
#[derive(Debug, Deserialize)]
pub struct StatementPartsRequest {
    pub agent: Option<String>,
    pub verb: Option<String>,
    #[serde(rename = "activityId")]
    pub activity_id: Option<String>,
}

/// Response body for a count request.
#[derive(Debug, Serialize, Deserialize)]
pub struct CountResponse {
    pub agent: Option<String>,
    pub verb: Option<String>,
    #[serde(rename = "activityId")]
    pub activity_id: Option<String>,
    /// Matching statements, or -1 if the store could not be queried.
    pub amount: i64,
}

/// Request body for retracting a user's completions.
#[derive(Debug, Deserialize)]
pub struct VoidProgressRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// Request body for listing interacted items.
#[derive(Debug, Deserialize)]
pub struct InteractedItemsRequest {
    pub agent: Option<String>,
}

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

/// Handler for `POST {base}/statements`.
pub async fn store_statement_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<StoreStatementRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload?;
    let raw = request.statement.unwrap_or_default();
    state.service.store_statement(&raw).await;
    Ok(StatusCode::ACCEPTED)
}

/// Handler for `POST {base}/statements/build`.
pub async fn build_statement_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<StatementPartsRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload?;
    state
        .service
        .store_from_parts(
            request.agent.as_deref(),
            request.verb.as_deref(),
            request.activity_id.as_deref(),
        )
        .await;
    Ok(StatusCode::ACCEPTED)
}

/// Handler for `POST {base}/statements/count`.
pub async fn count_statements_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<StatementPartsRequest>, JsonRejection>,
) -> Result<Json<CountResponse>, ApiError> {
    let Json(request) = payload?;
    let amount = state
        .service
        .count_matching_statements(
            request.agent.as_deref(),
            request.verb.as_deref(),
            request.activity_id.as_deref(),
        )
        .await;

    Ok(Json(CountResponse {
        agent: request.agent,
        verb: request.verb,
        activity_id: request.activity_id,
        amount,
    }))
}

/// Handler for `POST {base}/progress/void`.
pub async fn void_progress_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<VoidProgressRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload?;
    state
        .service
        .void_all_for_actor_and_verb(request.user_id.as_deref(), Some(verbs::COMPLETED))
        .await;
    Ok(StatusCode::ACCEPTED)
}

/// Handler for `POST {base}/items/interacted`.
pub async fn interacted_items_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<InteractedItemsRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload?;
    state.service.interacted_items(request.agent.as_deref()).await;
    Ok(StatusCode::ACCEPTED)
}
