//! HTTP handlers for the screening pipeline.
//!
//! Extraction and classification are independently callable, plus the
//! composed channel-to-scored-messages operation.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use mw_domain::error::Error;
use mw_domain::message::Message;
use serde::Deserialize;

use crate::state::AppState;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Error mapping
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Pipeline error as an HTTP response.
///
/// Channel lookup failures map to 404, membership failures to 403;
/// upstream data or protocol failures surface as 502; local
/// misconfiguration as 500.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::ChannelNotFound(_) => StatusCode::NOT_FOUND,
            Error::JoinForbidden { .. } => StatusCode::FORBIDDEN,
            Error::Config(_) | Error::Auth(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_GATEWAY,
        };
        tracing::warn!(status = %status, error = %self.0, "request failed");
        (
            status,
            Json(serde_json::json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Request bodies
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Deserialize)]
pub struct ChannelRequest {
    pub channel: String,
    /// Overrides the configured threshold when present.
    #[serde(default)]
    pub threshold: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub messages: Vec<Message>,
    #[serde(default)]
    pub threshold: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct PostRequest {
    pub target: String,
    pub text: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Handlers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn extract(
    State(state): State<AppState>,
    Json(req): Json<ChannelRequest>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let messages = state.pipeline.fetch_all_messages(&req.channel).await?;
    Ok(Json(messages))
}

pub async fn classify(
    State(state): State<AppState>,
    Json(req): Json<ClassifyRequest>,
) -> Result<Response, ApiError> {
    let threshold = req
        .threshold
        .unwrap_or(state.pipeline.config().threshold);
    let scored = state.pipeline.classify(&req.messages, threshold).await?;
    Ok(Json(mw_pipeline::sink::to_json(&scored)?).into_response())
}

pub async fn screen(
    State(state): State<AppState>,
    Json(req): Json<ChannelRequest>,
) -> Result<Response, ApiError> {
    let threshold = req
        .threshold
        .unwrap_or(state.pipeline.config().threshold);
    let scored = state
        .pipeline
        .extract_and_classify(&req.channel, threshold)
        .await?;
    Ok(Json(mw_pipeline::sink::to_json(&scored)?).into_response())
}

pub async fn post(
    State(state): State<AppState>,
    Json(req): Json<PostRequest>,
) -> Result<Response, ApiError> {
    state.platform.post_message(&req.target, &req.text).await?;
    Ok(Json(serde_json::json!({ "posted": true })).into_response())
}
