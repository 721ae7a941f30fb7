use mw_domain::error::Result;
use mw_domain::message::{ActorProfile, ChannelInfo, HistoryPage};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Chat-platform collaborator
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Trait the pipeline consumes for channel access.
///
/// Implementations are platform-specific adapters (currently Slack) that
/// translate between our internal types and the wire format of the
/// platform's HTTP API.
#[async_trait::async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Look up channel metadata (name, membership of the calling identity).
    async fn channel_info(&self, channel_id: &str) -> Result<ChannelInfo>;

    /// Join a channel the calling identity is not yet a member of.
    async fn join_channel(&self, channel_id: &str) -> Result<()>;

    /// Fetch one page of channel history. `cursor` is the opaque
    /// continuation token from the previous page, absent for the first.
    async fn history_page(
        &self,
        channel_id: &str,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<HistoryPage>;

    /// Resolve an opaque actor id to its directory record.
    async fn resolve_actor(&self, actor_id: &str) -> Result<ActorProfile>;

    /// Post a message to a channel or user.
    async fn post_message(&self, target: &str, content: &str) -> Result<()>;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Classification collaborator
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One label/confidence pair of a prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelScore {
    pub label: String,
    pub confidence: f32,
}

/// The classifier's full output for a single instance: every label it
/// knows about, each with a confidence in `[0, 1]`.
#[derive(Debug, Clone, Default)]
pub struct Prediction {
    pub scores: Vec<LabelScore>,
}

impl Prediction {
    /// Confidence for a specific label, or `None` if the prediction does
    /// not carry that label. Callers treat the `None` case as a checked
    /// protocol error rather than an unchecked lookup.
    pub fn confidence_for(&self, label: &str) -> Option<f32> {
        self.scores
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.confidence)
    }
}

/// Trait the pipeline consumes for remote text classification.
///
/// The returned vector has one [`Prediction`] per input text, in the same
/// order; length mismatches are a protocol violation that the caller
/// checks and surfaces.
#[async_trait::async_trait]
pub trait TextClassifier: Send + Sync {
    async fn classify_batch(&self, texts: &[String]) -> Result<Vec<Prediction>>;
}
