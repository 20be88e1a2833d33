//! Route handlers.

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tgcheck_core::ResolvedStatus;
use tracing::debug;

use super::AppState;
use super::error::ApiError;

/// Query string for `GET /api/check`.
#[derive(Debug, Deserialize)]
pub struct CheckParams {
    /// Username to check. Absent means "describe the API".
    pub username: Option<String>,
}

/// Body for `POST /api/check`.
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    /// Username to check, with or without `@`.
    #[serde(default)]
    pub username: String,
}

/// `GET /` and `GET /api`.
pub async fn info(State(state): State<AppState>) -> Json<Value> {
    Json(state.info_document())
}

/// `GET /health`.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /api/check?username=...`.
pub async fn check_query(
    State(state): State<AppState>,
    params: Result<Query<CheckParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params.map_err(|e| {
        debug!(error = %e, "Rejecting malformed query string");
        ApiError::MalformedQuery
    })?;

    match params.username {
        Some(username) => Ok(resolve(&state, &username).await?.into_response()),
        None => Ok(Json(state.info_document()).into_response()),
    }
}

/// `POST /api/check` with `{"username": "..."}`.
pub async fn check_body(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ResolvedStatus>, ApiError> {
    let request: CheckRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "Rejecting malformed request body");
        ApiError::MalformedRequest
    })?;
    resolve(&state, &request.username).await
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

async fn resolve(state: &AppState, username: &str) -> Result<Json<ResolvedStatus>, ApiError> {
    let status = state.resolver.resolve(username).await?;
    Ok(Json(status))
}
