//! Vertex AI text-classification adapter.
//!
//! Implements [`TextClassifier`] against the Vertex AI online-prediction
//! REST endpoint. Each request carries one `{ "content": ... }` instance
//! per text; each prediction comes back as parallel `displayNames` /
//! `confidences` arrays, which are zipped into typed [`LabelScore`] pairs
//! so downstream label lookup stays a checked operation.

use crate::traits::{LabelScore, Prediction, TextClassifier};
use crate::util::{from_reqwest, resolve_credential};
use mw_domain::config::ClassifierConfig;
use mw_domain::error::{Error, Result};
use serde_json::Value;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Adapter struct
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A [`TextClassifier`] adapter for a deployed Vertex AI endpoint.
#[derive(Debug)]
pub struct VertexClassifier {
    predict_url: String,
    token: String,
    client: reqwest::Client,
}

impl VertexClassifier {
    /// Create a new classifier from the deserialized config.
    ///
    /// The access token is resolved eagerly; the predict URL is assembled
    /// once from project / location / endpoint id.
    pub fn from_config(cfg: &ClassifierConfig) -> Result<Self> {
        if cfg.project.is_empty() || cfg.endpoint_id.is_empty() {
            return Err(Error::Config(
                "classifier.project and classifier.endpoint_id must be set".into(),
            ));
        }

        let token = resolve_credential(&cfg.auth)?;
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(cfg.timeout_ms))
            .build()
            .map_err(from_reqwest)?;

        let predict_url = format!(
            "{}/v1/projects/{}/locations/{}/endpoints/{}:predict",
            cfg.effective_base_url(),
            cfg.project,
            cfg.location,
            cfg.endpoint_id
        );

        Ok(Self {
            predict_url,
            token,
            client,
        })
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Response parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Parse the `predictions` array of a predict response into typed
/// [`Prediction`]s.
///
/// Each entry must carry `displayNames` and `confidences` arrays of equal
/// length; anything else is a malformed response.
fn parse_predictions(body: &Value) -> Result<Vec<Prediction>> {
    let predictions = body
        .get("predictions")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            Error::ClassificationFailed("no predictions array in response".into())
        })?;

    predictions
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let labels = p
                .get("displayNames")
                .and_then(Value::as_array)
                .ok_or_else(|| {
                    Error::ClassificationFailed(format!(
                        "prediction {i} missing displayNames"
                    ))
                })?;
            let confidences = p
                .get("confidences")
                .and_then(Value::as_array)
                .ok_or_else(|| {
                    Error::ClassificationFailed(format!(
                        "prediction {i} missing confidences"
                    ))
                })?;
            if labels.len() != confidences.len() {
                return Err(Error::ClassificationFailed(format!(
                    "prediction {i}: {} labels vs {} confidences",
                    labels.len(),
                    confidences.len()
                )));
            }

            let scores = labels
                .iter()
                .zip(confidences.iter())
                .map(|(l, c)| LabelScore {
                    label: l.as_str().unwrap_or_default().to_string(),
                    confidence: c.as_f64().unwrap_or(0.0) as f32,
                })
                .collect();
            Ok(Prediction { scores })
        })
        .collect()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait::async_trait]
impl TextClassifier for VertexClassifier {
    async fn classify_batch(&self, texts: &[String]) -> Result<Vec<Prediction>> {
        let instances: Vec<Value> = texts
            .iter()
            .map(|t| serde_json::json!({ "content": t }))
            .collect();
        let body = serde_json::json!({ "instances": instances });

        tracing::debug!(instances = texts.len(), "vertex predict request");

        let resp = self
            .client
            .post(&self.predict_url)
            .bearer_auth(&self.token)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = resp.status();
        let text = resp.text().await.map_err(from_reqwest)?;
        if !status.is_success() {
            return Err(Error::ClassificationFailed(format!(
                "HTTP {} - {text}",
                status.as_u16()
            )));
        }

        let json: Value = serde_json::from_str(&text)?;
        parse_predictions(&json)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
