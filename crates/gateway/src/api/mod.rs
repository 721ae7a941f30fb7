pub mod screen;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the full API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/health", get(screen::health))
        // History extraction only (channel -> messages)
        .route("/v1/extract", post(screen::extract))
        // Classification only (externally supplied messages -> scored)
        .route("/v1/classify", post(screen::classify))
        // The composed pipeline (channel -> scored)
        .route("/v1/screen", post(screen::screen))
        // Outbound posting passthrough
        .route("/v1/post", post(screen::post))
}
