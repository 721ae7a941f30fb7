/// Shared error type used across all msgwatch crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP: {0}")]
    Http(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("channel not found: {0}")]
    ChannelNotFound(String),

    #[error("could not join channel {channel}: {reason}")]
    JoinForbidden { channel: String, reason: String },

    #[error("could not find user: {0}")]
    ActorNotFound(String),

    #[error("history fetch failed: {0}")]
    HistoryFetchFailed(String),

    #[error("classification failed: {0}")]
    ClassificationFailed(String),

    #[error("label '{label}' absent from prediction {index}")]
    LabelNotFound { label: String, index: usize },

    #[error("classifier returned {got} results for {sent} instances")]
    ResultCountMismatch { sent: usize, got: usize },

    #[error("config: {0}")]
    Config(String),

    #[error("auth: {0}")]
    Auth(String),
}

pub type Result<T> = std::result::Result<T, Error>;
