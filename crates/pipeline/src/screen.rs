//! Pipeline composition: channel pre-flight, extraction, classification.

use crate::batch::BatchClassifier;
use crate::history::HistoryReader;
use mw_connectors::{ChatPlatform, TextClassifier};
use mw_domain::config::PipelineConfig;
use mw_domain::error::Result;
use mw_domain::message::{Message, ScoredMessage};
use std::sync::Arc;

/// The full screening pipeline over a channel.
///
/// Holds the two remote collaborators plus tuning knobs; every invocation
/// runs start to finish with no state shared across invocations.
pub struct ScreeningPipeline {
    platform: Arc<dyn ChatPlatform>,
    classifier: Arc<dyn TextClassifier>,
    config: PipelineConfig,
}

impl ScreeningPipeline {
    pub fn new(
        platform: Arc<dyn ChatPlatform>,
        classifier: Arc<dyn TextClassifier>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            platform,
            classifier,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Pre-flight: confirm the channel exists and the calling identity is
    /// a member, joining if necessary. Runs before any history fetch;
    /// failures surface as `ChannelNotFound` / `JoinForbidden`.
    pub async fn ensure_member(&self, channel_id: &str) -> Result<String> {
        let info = self.platform.channel_info(channel_id).await?;
        tracing::info!(channel = %info.name, "checking on channel");
        if !info.is_member {
            self.platform.join_channel(channel_id).await?;
            tracing::info!(channel = %info.name, "joined channel");
        }
        Ok(info.name)
    }

    /// Pre-flight plus full history extraction.
    pub async fn fetch_all_messages(&self, channel_id: &str) -> Result<Vec<Message>> {
        self.ensure_member(channel_id).await?;
        HistoryReader::new(self.platform.as_ref(), self.config.page_size)
            .fetch_all_messages(channel_id)
            .await
    }

    /// Classify externally supplied messages against the configured
    /// target label.
    pub async fn classify(
        &self,
        messages: &[Message],
        threshold: f32,
    ) -> Result<Vec<ScoredMessage>> {
        BatchClassifier::new(
            self.classifier.as_ref(),
            self.config.window_size,
            &self.config.target_label,
        )
        .classify(messages, threshold)
        .await
    }

    /// The composed operation: extract a channel's history and return the
    /// messages whose target-label confidence strictly exceeds
    /// `threshold`. Fails atomically; a failure in any stage yields no
    /// partial result.
    pub async fn extract_and_classify(
        &self,
        channel_id: &str,
        threshold: f32,
    ) -> Result<Vec<ScoredMessage>> {
        let messages = self.fetch_all_messages(channel_id).await?;
        tracing::info!(messages = messages.len(), "passing along messages");
        let scored = self.classify(&messages, threshold).await?;
        tracing::info!(flagged = scored.len(), "screening complete");
        Ok(scored)
    }
}
