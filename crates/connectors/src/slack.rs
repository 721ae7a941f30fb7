//! Slack Web API adapter.
//!
//! Implements the [`ChatPlatform`] collaborator against the Slack Web API
//! (`conversations.info`, `conversations.join`, `conversations.history`,
//! `users.info`, `chat.postMessage`). Every Slack response carries an
//! `ok` boolean envelope; `ok=false` responses are mapped onto the
//! distinct domain error kinds the pipeline relies on.

use crate::traits::ChatPlatform;
use crate::util::{from_reqwest, resolve_credential};
use mw_domain::config::SlackConfig;
use mw_domain::error::{Error, Result};
use mw_domain::message::{ActorProfile, ChannelInfo, HistoryPage, RawMessage};
use serde_json::Value;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Adapter struct
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A [`ChatPlatform`] adapter for the Slack Web API.
pub struct SlackApiClient {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl SlackApiClient {
    /// Create a new client from the deserialized Slack config.
    ///
    /// The bot token is resolved eagerly (env vars are read at this point).
    pub fn from_config(cfg: &SlackConfig) -> Result<Self> {
        let token = resolve_credential(&cfg.auth)?;
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(cfg.timeout_ms))
            .build()
            .map_err(from_reqwest)?;

        Ok(Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    // ── Internal: perform one Web API call ────────────────────────

    /// GET a Web API method with query parameters and return the parsed
    /// JSON body. HTTP-level failures map to [`Error::Http`]; the `ok`
    /// envelope is left for the caller, which knows the method-specific
    /// error kinds.
    async fn call_get(&self, method: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, method);
        tracing::debug!(method = %method, "slack GET");

        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = resp.status();
        let text = resp.text().await.map_err(from_reqwest)?;
        if !status.is_success() {
            return Err(Error::Http(format!(
                "{method}: HTTP {} - {text}",
                status.as_u16()
            )));
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// POST a Web API method with a JSON body.
    async fn call_post(&self, method: &str, body: Value) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, method);
        tracing::debug!(method = %method, "slack POST");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = resp.status();
        let text = resp.text().await.map_err(from_reqwest)?;
        if !status.is_success() {
            return Err(Error::Http(format!(
                "{method}: HTTP {} - {text}",
                status.as_u16()
            )));
        }
        Ok(serde_json::from_str(&text)?)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Envelope / response parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Whether the response envelope reports success.
fn envelope_ok(body: &Value) -> bool {
    body.get("ok").and_then(Value::as_bool).unwrap_or(false)
}

/// The `error` field of a failed envelope, or "unknown_error".
fn envelope_error(body: &Value) -> String {
    body.get("error")
        .and_then(Value::as_str)
        .unwrap_or("unknown_error")
        .to_string()
}

fn parse_channel_info(body: &Value, channel_id: &str) -> Result<ChannelInfo> {
    let channel = body
        .get("channel")
        .ok_or_else(|| Error::Http(format!("conversations.info for {channel_id}: no channel object")))?;
    Ok(ChannelInfo {
        name: channel
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(channel_id)
            .to_string(),
        is_member: channel
            .get("is_member")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}

fn parse_history_page(body: &Value) -> Result<HistoryPage> {
    let raw = body
        .get("messages")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::HistoryFetchFailed("no messages array in response".into()))?;

    let messages = raw
        .iter()
        .map(|m| RawMessage {
            actor_id: m
                .get("user")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            text: m
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            subtype: m
                .get("subtype")
                .and_then(Value::as_str)
                .map(String::from),
        })
        .collect();

    // Slack signals the final page with an absent or empty next_cursor.
    let next_cursor = body
        .get("response_metadata")
        .and_then(|m| m.get("next_cursor"))
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .map(String::from);

    Ok(HistoryPage {
        messages,
        has_more: body
            .get("has_more")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        next_cursor,
    })
}

fn parse_actor_profile(body: &Value, actor_id: &str) -> Result<ActorProfile> {
    let user = body
        .get("user")
        .ok_or_else(|| Error::ActorNotFound(actor_id.to_string()))?;
    Ok(ActorProfile {
        full_name: user
            .get("real_name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        display_name: user
            .get("profile")
            .and_then(|p| p.get("display_name"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait::async_trait]
impl ChatPlatform for SlackApiClient {
    async fn channel_info(&self, channel_id: &str) -> Result<ChannelInfo> {
        let body = self
            .call_get("conversations.info", &[("channel", channel_id)])
            .await?;
        if !envelope_ok(&body) {
            return Err(Error::ChannelNotFound(channel_id.to_string()));
        }
        parse_channel_info(&body, channel_id)
    }

    async fn join_channel(&self, channel_id: &str) -> Result<()> {
        let body = self
            .call_post(
                "conversations.join",
                serde_json::json!({ "channel": channel_id }),
            )
            .await?;
        if !envelope_ok(&body) {
            return Err(Error::JoinForbidden {
                channel: channel_id.to_string(),
                reason: envelope_error(&body),
            });
        }
        Ok(())
    }

    async fn history_page(
        &self,
        channel_id: &str,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<HistoryPage> {
        let limit = page_size.to_string();
        let mut query = vec![("channel", channel_id), ("limit", limit.as_str())];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor));
        }

        let body = self.call_get("conversations.history", &query).await?;
        if !envelope_ok(&body) {
            return Err(Error::HistoryFetchFailed(envelope_error(&body)));
        }
        parse_history_page(&body)
    }

    async fn resolve_actor(&self, actor_id: &str) -> Result<ActorProfile> {
        let body = self.call_get("users.info", &[("user", actor_id)]).await?;
        if !envelope_ok(&body) {
            return Err(Error::ActorNotFound(actor_id.to_string()));
        }
        parse_actor_profile(&body, actor_id)
    }

    async fn post_message(&self, target: &str, content: &str) -> Result<()> {
        let body = self
            .call_post(
                "chat.postMessage",
                serde_json::json!({ "channel": target, "text": content }),
            )
            .await?;
        if !envelope_ok(&body) {
            return Err(Error::Http(format!(
                "chat.postMessage: {}",
                envelope_error(&body)
            )));
        }
        Ok(())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_ok_true() {
        let body = serde_json::json!({ "ok": true });
        assert!(envelope_ok(&body));
    }

    #[test]
    fn envelope_missing_ok_is_failure() {
        let body = serde_json::json!({ "warning": "something" });
        assert!(!envelope_ok(&body));
        assert_eq!(envelope_error(&body), "unknown_error");
    }

    #[test]
    fn parse_channel_info_member() {
        let body = serde_json::json!({
            "ok": true,
            "channel": { "name": "general", "is_member": true }
        });
        let info = parse_channel_info(&body, "C123").unwrap();
        assert_eq!(info.name, "general");
        assert!(info.is_member);
    }

    #[test]
    fn parse_channel_info_missing_is_member_defaults_false() {
        let body = serde_json::json!({
            "ok": true,
            "channel": { "name": "private-ish" }
        });
        let info = parse_channel_info(&body, "C123").unwrap();
        assert!(!info.is_member);
    }

    #[test]
    fn parse_history_page_with_cursor() {
        let body = serde_json::json!({
            "ok": true,
            "messages": [
                { "user": "U1", "text": "hello" },
                { "user": "U2", "text": "joined", "subtype": "channel_join" }
            ],
            "has_more": true,
            "response_metadata": { "next_cursor": "dGVhbTpD" }
        });
        let page = parse_history_page(&body).unwrap();
        assert_eq!(page.messages.len(), 2);
        assert_eq!(page.messages[0].actor_id, "U1");
        assert!(page.messages[0].is_primary());
        assert!(!page.messages[1].is_primary());
        assert!(page.has_more);
        assert_eq!(page.next_cursor.as_deref(), Some("dGVhbTpD"));
    }

    #[test]
    fn parse_history_page_empty_cursor_is_none() {
        let body = serde_json::json!({
            "ok": true,
            "messages": [],
            "has_more": false,
            "response_metadata": { "next_cursor": "" }
        });
        let page = parse_history_page(&body).unwrap();
        assert!(!page.has_more);
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn parse_history_page_without_messages_fails() {
        let body = serde_json::json!({ "ok": true });
        let err = parse_history_page(&body).unwrap_err();
        assert!(matches!(err, Error::HistoryFetchFailed(_)));
    }

    #[test]
    fn parse_actor_profile_full() {
        let body = serde_json::json!({
            "ok": true,
            "user": {
                "real_name": "Ada Lovelace",
                "profile": { "display_name": "ada" }
            }
        });
        let profile = parse_actor_profile(&body, "U1").unwrap();
        assert_eq!(profile.display(), "Ada Lovelace (ada)");
    }

    #[test]
    fn parse_actor_profile_missing_user_is_not_found() {
        let body = serde_json::json!({ "ok": true });
        let err = parse_actor_profile(&body, "U404").unwrap_err();
        assert!(matches!(err, Error::ActorNotFound(id) if id == "U404"));
    }
}
