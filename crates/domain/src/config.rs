use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub slack: SlackConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Server
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "d_port")]
    pub port: u16,
    #[serde(default = "d_host")]
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".into(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Slack connection
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackConfig {
    #[serde(default = "d_slack_url")]
    pub base_url: String,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default = "d_15000")]
    pub timeout_ms: u64,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            base_url: d_slack_url(),
            auth: AuthConfig {
                env: Some("SLACK_BOT_TOKEN".into()),
                ..AuthConfig::default()
            },
            timeout_ms: 15_000,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Classifier endpoint
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Reference to a deployed Vertex-style text-classification endpoint.
///
/// The predict URL is assembled as
/// `{base_url}/v1/projects/{project}/locations/{location}/endpoints/{endpoint_id}:predict`.
/// `base_url` defaults to the regional API host derived from `location`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default)]
    pub project: String,
    #[serde(default = "d_location")]
    pub location: String,
    #[serde(default)]
    pub endpoint_id: String,
    /// Override for the API host; when `None` it is derived from `location`.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default = "d_30000")]
    pub timeout_ms: u64,
    /// Bounded per-window retries applied by the adapter-layer decorator.
    /// Zero disables retrying entirely.
    #[serde(default)]
    pub max_retries: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            project: String::new(),
            location: d_location(),
            endpoint_id: String::new(),
            base_url: None,
            auth: AuthConfig {
                env: Some("CLASSIFIER_TOKEN".into()),
                ..AuthConfig::default()
            },
            timeout_ms: 30_000,
            max_retries: 0,
        }
    }
}

impl ClassifierConfig {
    /// Effective API host for predict calls.
    pub fn effective_base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            format!("https://{}-aiplatform.googleapis.com", self.location)
        })
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Pipeline tuning
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// History page size per `conversations.history` call.
    #[serde(default = "d_page")]
    pub page_size: u32,
    /// Messages per classification request.
    #[serde(default = "d_window")]
    pub window_size: usize,
    /// Label whose confidence is compared against the threshold.
    #[serde(default = "d_label")]
    pub target_label: String,
    /// Default confidence threshold; retained messages must score
    /// strictly above it.
    #[serde(default = "d_threshold")]
    pub threshold: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            window_size: 20,
            target_label: d_label(),
            threshold: 0.5,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Auth
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Credential source for a remote collaborator.
///
/// Resolution precedence: `key` (plaintext, warned) → keychain
/// (`service`+`account`) → `env` → keychain headless fallback env var.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub env: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub account: Option<String>,
}

// ── Serde default helpers ─────────────────────────────────────────

fn d_port() -> u16 {
    8080
}
fn d_host() -> String {
    "127.0.0.1".into()
}
fn d_slack_url() -> String {
    "https://slack.com/api".into()
}
fn d_location() -> String {
    "us-central1".into()
}
fn d_label() -> String {
    "sexist".into()
}
fn d_threshold() -> f32 {
    0.5
}
fn d_page() -> u32 {
    20
}
fn d_window() -> usize {
    20
}
fn d_15000() -> u64 {
    15_000
}
fn d_30000() -> u64 {
    30_000
}
