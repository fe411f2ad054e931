// src/news/mod.rs
//! News-ingestion pipeline: drive the search capability over a batch of
//! (topic-or-query, category) pairs, parse structured records out of the
//! free-text output, and persist each pair independently. One bad pair
//! never aborts the batch.

pub mod extract;
pub mod model;

use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;
use tracing::{error, info};

use crate::agent::Agent;
use crate::store::Store;
use self::extract::{
    extract_title_summary, image_for_category, normalize_category, title_case, truncate_chars,
};
use self::model::{NewsSummary, TOPIC_SUMMARY_MAX_CHARS};

/// One-time metrics registration (so series show up on /metrics).
pub fn describe_metrics() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("news_pairs_total", "Pairs processed by news batches.");
        describe_counter!("news_persisted_total", "Records persisted by news batches.");
        describe_counter!(
            "news_skipped_total",
            "Pairs skipped for empty or rejected agent output."
        );
        describe_counter!(
            "news_pair_failures_total",
            "Pairs failed on capability or store faults."
        );
        describe_gauge!("news_batch_last_run_ts", "Unix ts when a news batch last ran.");
    });
}

/// The fixed catalog driving the seed batch: one search per entry.
pub const SEED_CATALOG: &[(&str, &str)] = &[
    ("latest technology news today", "technology"),
    ("artificial intelligence breakthroughs", "technology"),
    ("latest business news stock market", "business"),
    ("startup funding news", "business"),
    ("latest science discoveries", "science"),
    ("space exploration news", "science"),
    ("health medical research news", "health"),
    ("sports news today", "sports"),
    ("entertainment movies news", "entertainment"),
    ("world news international", "world"),
];

/// Default topics for the topic-driven batch.
pub const DEFAULT_TOPICS: &[&str] = &["latest news", "technology", "business", "science"];

/// Throughput cap on the topic-driven batch: only this many topics are
/// processed per invocation to bound latency and provider cost.
pub const TOPIC_BATCH_CAP: usize = 2;

/// One unit of work in a batch. Both batch shapes are built on this
/// primitive; they differ in prompt, acceptance rule, and record assembly.
#[derive(Debug, Clone)]
pub enum PairShape {
    /// Topic-driven ("fetch"): title synthesized from the topic, summary
    /// taken raw from agent output.
    Topic(String),
    /// Catalog-driven ("seed"): title and summary both parsed out of the
    /// free-text response.
    Query { query: String, category: String },
}

impl PairShape {
    fn prompt(&self) -> String {
        match self {
            PairShape::Topic(topic) => format!(
                "Search for one latest {topic} news article. \
                 Provide: title (max 12 words), 60-word summary, source URL, source name."
            ),
            PairShape::Query { query, .. } => format!(
                "Find the latest news about: {query}. Provide a concise 2-3 sentence summary."
            ),
        }
    }

    /// Whether this pair produces a record from the given result. The topic
    /// path requires a successful, non-empty result; the catalog path keeps
    /// any non-empty content regardless of the success flag.
    fn accepts(&self, result: &crate::agent::AgentResult) -> bool {
        match self {
            PairShape::Topic(_) => result.success && !result.content.is_empty(),
            PairShape::Query { .. } => !result.content.trim().is_empty(),
        }
    }

    fn record_from(&self, content: &str) -> NewsSummary {
        match self {
            PairShape::Topic(topic) => NewsSummary::new(
                format!("Latest {} News", title_case(topic)),
                truncate_chars(content, TOPIC_SUMMARY_MAX_CHARS),
                normalize_category(topic),
                None,
            ),
            PairShape::Query { category, .. } => {
                // the parse trims internally; the topic path keeps raw content
                let (title, summary) = extract_title_summary(content);
                NewsSummary::new(
                    title,
                    summary,
                    category.clone(),
                    Some(image_for_category(category).to_string()),
                )
            }
        }
    }

    fn describe(&self) -> &str {
        match self {
            PairShape::Topic(topic) => topic,
            PairShape::Query { query, .. } => query,
        }
    }
}

/// Per-pair outcome, observable for accounting and tests.
#[derive(Debug)]
pub enum PairOutcome {
    Persisted(NewsSummary),
    SkippedEmpty,
    Failed(String),
}

/// Run one batch: pairs strictly in input order, no dedup, one capability
/// call at a time. Capability faults, rejected results, and store faults
/// are logged and absorbed at pair granularity; this loop never propagates.
pub async fn run_batch(
    agent: &dyn Agent,
    store: &dyn Store,
    pairs: Vec<PairShape>,
) -> Vec<PairOutcome> {
    describe_metrics();

    let mut outcomes = Vec::with_capacity(pairs.len());
    for pair in &pairs {
        counter!("news_pairs_total").increment(1);
        info!(query = pair.describe(), "searching for news");

        let outcome = match agent.execute(&pair.prompt(), true).await {
            Ok(result) if pair.accepts(&result) => {
                let item = pair.record_from(&result.content);
                match store.insert_news(item.clone()).await {
                    Ok(()) => {
                        info!(title = %truncate_chars(&item.title, 50), "added news");
                        counter!("news_persisted_total").increment(1);
                        PairOutcome::Persisted(item)
                    }
                    Err(e) => {
                        error!(query = pair.describe(), error = ?e, "failed to store news item");
                        counter!("news_pair_failures_total").increment(1);
                        PairOutcome::Failed(e.to_string())
                    }
                }
            }
            Ok(result) => {
                // Nothing to persist: empty or rejected output is not an error.
                if let Some(err) = result.error {
                    error!(query = pair.describe(), error = %err, "agent reported failure");
                    counter!("news_pair_failures_total").increment(1);
                    PairOutcome::Failed(err)
                } else {
                    counter!("news_skipped_total").increment(1);
                    PairOutcome::SkippedEmpty
                }
            }
            Err(e) => {
                error!(query = pair.describe(), error = ?e, "error fetching news");
                counter!("news_pair_failures_total").increment(1);
                PairOutcome::Failed(e.to_string())
            }
        };
        outcomes.push(outcome);
    }

    gauge!("news_batch_last_run_ts").set(chrono::Utc::now().timestamp().max(0) as f64);
    outcomes
}

/// Build the topic-driven batch, applying the processing cap.
pub fn topic_pairs(topics: &[String]) -> Vec<PairShape> {
    topics
        .iter()
        .take(TOPIC_BATCH_CAP)
        .map(|t| PairShape::Topic(t.clone()))
        .collect()
}

/// Build the full catalog-driven batch.
pub fn seed_pairs() -> Vec<PairShape> {
    SEED_CATALOG
        .iter()
        .map(|(query, category)| PairShape::Query {
            query: (*query).to_string(),
            category: (*category).to_string(),
        })
        .collect()
}
