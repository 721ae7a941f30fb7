pub mod retry;
pub mod slack;
pub mod traits;
pub mod vertex;
pub(crate) mod util;

// Re-exports for convenience.
pub use retry::RetryingClassifier;
pub use slack::SlackApiClient;
pub use traits::{ChatPlatform, LabelScore, Prediction, TextClassifier};
pub use vertex::VertexClassifier;
