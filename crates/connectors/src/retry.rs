//! Per-window retry decorator for [`TextClassifier`].
//!
//! The core pipeline is fail-fast and carries no retry policy of its own;
//! callers that want bounded retries wrap their classifier in this
//! decorator. Retries happen at whole-window granularity, so a window that
//! ultimately fails still aborts the batch exactly like an undecorated
//! classifier would.

use crate::traits::{Prediction, TextClassifier};
use mw_domain::error::Result;

/// Wraps any [`TextClassifier`] with bounded per-request retries.
pub struct RetryingClassifier<C> {
    inner: C,
    max_retries: u32,
}

impl<C> RetryingClassifier<C> {
    /// `max_retries` is the number of additional attempts after the first
    /// failure; zero makes this a pass-through.
    pub fn new(inner: C, max_retries: u32) -> Self {
        Self { inner, max_retries }
    }
}

#[async_trait::async_trait]
impl<C: TextClassifier> TextClassifier for RetryingClassifier<C> {
    async fn classify_batch(&self, texts: &[String]) -> Result<Vec<Prediction>> {
        let mut attempt = 0;
        loop {
            match self.inner.classify_batch(texts).await {
                Ok(predictions) => return Ok(predictions),
                Err(e) if attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        attempt,
                        max_retries = self.max_retries,
                        error = %e,
                        "classification window failed, retrying"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }
}
