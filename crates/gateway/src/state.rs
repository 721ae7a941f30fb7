use mw_connectors::ChatPlatform;
use mw_pipeline::ScreeningPipeline;
use std::sync::Arc;

/// Shared handler state. One pipeline run per request; no cross-request
/// state. The platform handle is kept alongside the pipeline for the
/// outbound-posting endpoint.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ScreeningPipeline>,
    pub platform: Arc<dyn ChatPlatform>,
}
