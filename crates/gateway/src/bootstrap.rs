//! Construction of the collaborator stack from config.

use crate::state::AppState;
use mw_connectors::{
    ChatPlatform, RetryingClassifier, SlackApiClient, TextClassifier, VertexClassifier,
};
use mw_domain::config::Config;
use mw_domain::error::Result;
use mw_pipeline::ScreeningPipeline;
use std::sync::Arc;

/// Build the app state: Slack adapter, classifier adapter (wrapped in the
/// per-window retry decorator when configured), and the pipeline over
/// both. Credentials are resolved eagerly here, so a misconfigured token
/// fails startup rather than the first request.
pub fn build_state(config: &Config) -> Result<AppState> {
    let platform: Arc<dyn ChatPlatform> = Arc::new(SlackApiClient::from_config(&config.slack)?);

    let vertex = VertexClassifier::from_config(&config.classifier)?;
    let classifier: Arc<dyn TextClassifier> = if config.classifier.max_retries > 0 {
        Arc::new(RetryingClassifier::new(
            vertex,
            config.classifier.max_retries,
        ))
    } else {
        Arc::new(vertex)
    };

    tracing::info!(
        target_label = %config.pipeline.target_label,
        window_size = config.pipeline.window_size,
        page_size = config.pipeline.page_size,
        retries = config.classifier.max_retries,
        "pipeline assembled"
    );

    let pipeline = Arc::new(ScreeningPipeline::new(
        platform.clone(),
        classifier,
        config.pipeline.clone(),
    ));

    Ok(AppState { pipeline, platform })
}
