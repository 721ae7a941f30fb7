//! Cursor-driven history extraction.
//!
//! Walks a channel's history page by page, keeps only primary user
//! messages (no subtype), and resolves each author through a per-run
//! memoizing actor cache so repeated authors cost one directory lookup.

use mw_connectors::ChatPlatform;
use mw_domain::error::{Error, Result};
use mw_domain::message::Message;
use std::collections::HashMap;

/// Reads a channel's full history through a [`ChatPlatform`] collaborator.
pub struct HistoryReader<'a> {
    platform: &'a dyn ChatPlatform,
    page_size: u32,
}

impl<'a> HistoryReader<'a> {
    pub fn new(platform: &'a dyn ChatPlatform, page_size: u32) -> Self {
        Self {
            platform,
            page_size,
        }
    }

    /// Fetch every primary message of `channel_id`, in platform order.
    ///
    /// The actor cache lives for exactly this call: it is populated
    /// lazily, never evicted, and discarded with the call — including on
    /// failure, so no partially-resolved state leaks across invocations.
    /// Any page fetch or actor resolution failure aborts the whole fetch.
    pub async fn fetch_all_messages(&self, channel_id: &str) -> Result<Vec<Message>> {
        let mut actor_cache: HashMap<String, String> = HashMap::new();
        let mut messages = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self
                .platform
                .history_page(channel_id, cursor.as_deref(), self.page_size)
                .await?;

            for raw in &page.messages {
                if !raw.is_primary() {
                    continue;
                }
                let actor = self.resolve_cached(&mut actor_cache, &raw.actor_id).await?;
                messages.push(Message::new(actor, raw.text.clone()));
            }

            if !page.has_more {
                break;
            }
            // A has_more page without a usable cursor would loop forever
            // refetching the first page; treat it as a fetch failure.
            cursor = match page.next_cursor {
                Some(c) if !c.is_empty() => Some(c),
                _ => {
                    return Err(Error::HistoryFetchFailed(
                        "page reported more data but carried no cursor".into(),
                    ))
                }
            };
        }

        tracing::info!(
            channel = %channel_id,
            messages = messages.len(),
            unique_actors = actor_cache.len(),
            "history extracted"
        );
        Ok(messages)
    }

    /// Memoized actor resolution: one remote lookup per unique actor id
    /// per run.
    async fn resolve_cached(
        &self,
        cache: &mut HashMap<String, String>,
        actor_id: &str,
    ) -> Result<String> {
        if let Some(hit) = cache.get(actor_id) {
            return Ok(hit.clone());
        }
        let profile = self.platform.resolve_actor(actor_id).await?;
        let display = profile.display();
        cache.insert(actor_id.to_string(), display.clone());
        Ok(display)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
