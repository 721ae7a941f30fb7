use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Pipeline data model
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A user message pulled from a channel's history: resolved author display
/// string plus the raw text. Immutable once read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub actor: String,
    pub text: String,
}

impl Message {
    pub fn new(actor: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            text: text.into(),
        }
    }
}

/// A message that passed the target-label confidence threshold.
///
/// `confidence` is the classifier's score for the target label, in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMessage {
    pub actor: String,
    pub text: String,
    pub confidence: f32,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Raw platform types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One entry of a history page, before actor resolution.
///
/// `subtype` is empty or absent for primary user messages; system entries
/// (joins, edits, bot notices) carry a subtype and are filtered out.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMessage {
    pub actor_id: String,
    pub text: String,
    #[serde(default)]
    pub subtype: Option<String>,
}

impl RawMessage {
    /// Whether this entry is a primary user message (no subtype).
    pub fn is_primary(&self) -> bool {
        self.subtype.as_deref().map_or(true, str::is_empty)
    }
}

/// One page of channel history. Transient; never retained past the page
/// that produced it.
#[derive(Debug, Clone)]
pub struct HistoryPage {
    pub messages: Vec<RawMessage>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

/// Channel metadata returned by the pre-flight lookup.
#[derive(Debug, Clone)]
pub struct ChannelInfo {
    pub name: String,
    pub is_member: bool,
}

/// Directory record for an actor id.
#[derive(Debug, Clone)]
pub struct ActorProfile {
    pub full_name: String,
    pub display_name: String,
}

impl ActorProfile {
    /// Composite display string used everywhere downstream.
    pub fn display(&self) -> String {
        format!("{} ({})", self.full_name, self.display_name)
    }
}
