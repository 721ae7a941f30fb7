//! End-to-end pipeline tests — full round trips over in-memory
//! collaborators, no external services. All tests are deterministic.

use mw_connectors::{ChatPlatform, LabelScore, Prediction, TextClassifier};
use mw_domain::config::PipelineConfig;
use mw_domain::error::{Error, Result};
use mw_domain::message::{ActorProfile, ChannelInfo, HistoryPage, RawMessage};
use mw_pipeline::ScreeningPipeline;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// In-memory collaborators
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A channel with paged history; membership and join behavior are
/// configurable per test.
struct FakePlatform {
    channel_exists: bool,
    is_member: bool,
    join_allowed: bool,
    pages: Vec<HistoryPage>,
    history_calls: AtomicUsize,
    resolve_calls: AtomicUsize,
}

impl FakePlatform {
    fn with_pages(pages: Vec<HistoryPage>) -> Self {
        Self {
            channel_exists: true,
            is_member: true,
            join_allowed: true,
            pages,
            history_calls: AtomicUsize::new(0),
            resolve_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl ChatPlatform for FakePlatform {
    async fn channel_info(&self, channel_id: &str) -> Result<ChannelInfo> {
        if !self.channel_exists {
            return Err(Error::ChannelNotFound(channel_id.into()));
        }
        Ok(ChannelInfo {
            name: "watched-channel".into(),
            is_member: self.is_member,
        })
    }

    async fn join_channel(&self, channel_id: &str) -> Result<()> {
        if !self.join_allowed {
            return Err(Error::JoinForbidden {
                channel: channel_id.into(),
                reason: "is_private".into(),
            });
        }
        Ok(())
    }

    async fn history_page(
        &self,
        _channel_id: &str,
        _cursor: Option<&str>,
        _page_size: u32,
    ) -> Result<HistoryPage> {
        let idx = self.history_calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .get(idx)
            .cloned()
            .ok_or_else(|| Error::HistoryFetchFailed("no more pages".into()))
    }

    async fn resolve_actor(&self, actor_id: &str) -> Result<ActorProfile> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        Ok(ActorProfile {
            full_name: format!("User {actor_id}"),
            display_name: actor_id.to_lowercase(),
        })
    }

    async fn post_message(&self, _target: &str, _content: &str) -> Result<()> {
        Ok(())
    }
}

/// Scores text `i` with confidence taken from the text's trailing number
/// divided by 100 ("msg37" → 0.37); lets tests pick per-message scores
/// through the data itself.
struct NumberedClassifier {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl TextClassifier for NumberedClassifier {
    async fn classify_batch(&self, texts: &[String]) -> Result<Vec<Prediction>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts
            .iter()
            .map(|t| {
                let n: u32 = t.trim_start_matches("msg").parse().unwrap_or(0);
                let confidence = n as f32 / 100.0;
                Prediction {
                    scores: vec![
                        LabelScore {
                            label: "sexist".into(),
                            confidence,
                        },
                        LabelScore {
                            label: "not_sexist".into(),
                            confidence: 1.0 - confidence,
                        },
                    ],
                }
            })
            .collect())
    }
}

/// Always returns one result fewer than requested.
struct ShortClassifier;

#[async_trait::async_trait]
impl TextClassifier for ShortClassifier {
    async fn classify_batch(&self, texts: &[String]) -> Result<Vec<Prediction>> {
        Ok(texts
            .iter()
            .skip(1)
            .map(|_| Prediction {
                scores: vec![LabelScore {
                    label: "sexist".into(),
                    confidence: 0.9,
                }],
            })
            .collect())
    }
}

fn raw(actor_id: &str, text: &str) -> RawMessage {
    RawMessage {
        actor_id: actor_id.into(),
        text: text.into(),
        subtype: None,
    }
}

/// 45 primary messages ("msg0".."msg44") over three pages of 20/20/5.
fn paged_history() -> Vec<HistoryPage> {
    let mut pages = Vec::new();
    let bounds = [(0, 20, true), (20, 40, true), (40, 45, false)];
    for (i, (start, end, has_more)) in bounds.into_iter().enumerate() {
        pages.push(HistoryPage {
            messages: (start..end)
                .map(|n| raw(&format!("U{}", n % 3), &format!("msg{n}")))
                .collect(),
            has_more,
            next_cursor: has_more.then(|| format!("cursor{i}")),
        });
    }
    pages
}

fn pipeline(platform: Arc<FakePlatform>, classifier: Arc<dyn TextClassifier>) -> ScreeningPipeline {
    ScreeningPipeline::new(platform, classifier, PipelineConfig::default())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Composed flow
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn full_round_trip_filters_and_orders() {
    let platform = Arc::new(FakePlatform::with_pages(paged_history()));
    let classifier = Arc::new(NumberedClassifier {
        calls: AtomicUsize::new(0),
    });
    let p = pipeline(platform.clone(), classifier.clone());

    // msg0..msg44 score 0.00..0.44; threshold 0.40 keeps msg41..msg44
    // (0.40 itself is excluded by the strict comparison).
    let scored = p.extract_and_classify("C1", 0.40).await.unwrap();

    let texts: Vec<&str> = scored.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["msg41", "msg42", "msg43", "msg44"]);
    // Actors survive reassociation: msg41 came from U2 (41 % 3).
    assert_eq!(scored[0].actor, "User U2 (u2)");

    // Three history pages, three classification windows, three unique actors.
    assert_eq!(platform.history_calls.load(Ordering::SeqCst), 3);
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 3);
    assert_eq!(platform.resolve_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn nonmember_channel_is_joined_before_fetch() {
    let platform = Arc::new(FakePlatform {
        is_member: false,
        ..FakePlatform::with_pages(paged_history())
    });
    let classifier = Arc::new(NumberedClassifier {
        calls: AtomicUsize::new(0),
    });
    let p = pipeline(platform, classifier);

    let scored = p.extract_and_classify("C1", 0.40).await.unwrap();
    assert_eq!(scored.len(), 4);
}

#[tokio::test]
async fn join_failure_aborts_before_any_history_fetch() {
    let platform = Arc::new(FakePlatform {
        is_member: false,
        join_allowed: false,
        ..FakePlatform::with_pages(paged_history())
    });
    let classifier = Arc::new(NumberedClassifier {
        calls: AtomicUsize::new(0),
    });
    let p = pipeline(platform.clone(), classifier);

    let err = p.extract_and_classify("C1", 0.40).await.unwrap_err();
    assert!(matches!(err, Error::JoinForbidden { .. }));
    assert_eq!(platform.history_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_channel_aborts_with_channel_not_found() {
    let platform = Arc::new(FakePlatform {
        channel_exists: false,
        ..FakePlatform::with_pages(vec![])
    });
    let classifier = Arc::new(NumberedClassifier {
        calls: AtomicUsize::new(0),
    });
    let p = pipeline(platform, classifier);

    let err = p.extract_and_classify("C404", 0.5).await.unwrap_err();
    assert!(matches!(err, Error::ChannelNotFound(id) if id == "C404"));
}

#[tokio::test]
async fn short_result_set_yields_mismatch_and_no_partial_output() {
    let platform = Arc::new(FakePlatform::with_pages(paged_history()));
    let p = pipeline(platform, Arc::new(ShortClassifier));

    let err = p.extract_and_classify("C1", 0.1).await.unwrap_err();
    assert!(matches!(
        err,
        Error::ResultCountMismatch { sent: 20, got: 19 }
    ));
}

#[tokio::test]
async fn classify_only_entry_point_works_standalone() {
    // Externally supplied text, no channel involved.
    let platform = Arc::new(FakePlatform::with_pages(vec![]));
    let classifier = Arc::new(NumberedClassifier {
        calls: AtomicUsize::new(0),
    });
    let p = pipeline(platform.clone(), classifier);

    let messages = vec![
        mw_domain::message::Message::new("someone", "msg80"),
        mw_domain::message::Message::new("someone", "msg10"),
    ];
    let scored = p.classify(&messages, 0.5).await.unwrap();

    assert_eq!(scored.len(), 1);
    assert_eq!(scored[0].text, "msg80");
    assert_eq!(platform.history_calls.load(Ordering::SeqCst), 0);
}
