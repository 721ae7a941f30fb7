//! Fixed-window batch classification.
//!
//! Partitions an ordered message list into consecutive windows, submits
//! each window as one classification request, reassociates every returned
//! score with its source message by position within the window, and keeps
//! only messages whose target-label confidence strictly exceeds the
//! threshold.

use mw_connectors::TextClassifier;
use mw_domain::error::{Error, Result};
use mw_domain::message::{Message, ScoredMessage};

/// Scores message batches through a [`TextClassifier`] collaborator.
pub struct BatchClassifier<'a> {
    classifier: &'a dyn TextClassifier,
    window_size: usize,
    target_label: &'a str,
}

impl<'a> BatchClassifier<'a> {
    pub fn new(
        classifier: &'a dyn TextClassifier,
        window_size: usize,
        target_label: &'a str,
    ) -> Self {
        Self {
            classifier,
            window_size,
            target_label,
        }
    }

    /// Classify `messages` and return those whose target-label confidence
    /// strictly exceeds `threshold`, in increasing input-index order.
    ///
    /// Windows are submitted sequentially in order; any window failure
    /// aborts the whole operation with no partial result. A result count
    /// differing from the window's instance count is a protocol violation
    /// ([`Error::ResultCountMismatch`]), as is a prediction that omits the
    /// target label ([`Error::LabelNotFound`]).
    pub async fn classify(
        &self,
        messages: &[Message],
        threshold: f32,
    ) -> Result<Vec<ScoredMessage>> {
        if self.window_size == 0 {
            return Err(Error::Config("window_size must be at least 1".into()));
        }

        let mut kept = Vec::new();
        for (window_idx, window) in messages.chunks(self.window_size).enumerate() {
            let window_start = window_idx * self.window_size;
            tracing::info!(
                start = window_start,
                end = window_start + window.len(),
                "classifying messages"
            );

            let texts: Vec<String> = window.iter().map(|m| m.text.clone()).collect();
            let predictions = self.classifier.classify_batch(&texts).await?;

            if predictions.len() != window.len() {
                return Err(Error::ResultCountMismatch {
                    sent: window.len(),
                    got: predictions.len(),
                });
            }

            let kept_before = kept.len();
            for (i, prediction) in predictions.iter().enumerate() {
                let confidence = prediction
                    .confidence_for(self.target_label)
                    .ok_or_else(|| Error::LabelNotFound {
                        label: self.target_label.to_string(),
                        index: window_start + i,
                    })?;
                // Strict comparison: a score exactly at the threshold is
                // not retained.
                if confidence > threshold {
                    let source = &window[i];
                    kept.push(ScoredMessage {
                        actor: source.actor.clone(),
                        text: source.text.clone(),
                        confidence,
                    });
                }
            }
            tracing::info!(
                flagged = kept.len() - kept_before,
                "batch classified"
            );
        }

        tracing::info!(total_flagged = kept.len(), "classification complete");
        Ok(kept)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
