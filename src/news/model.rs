// src/news/model.rs
//! Persisted record types. Field names and bounds are a compatibility
//! surface for anything reading the collection directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const TITLE_MAX_CHARS: usize = 200;
pub const SUMMARY_MAX_CHARS: usize = 500;
pub const TOPIC_SUMMARY_MAX_CHARS: usize = 250;

/// Placeholder provenance: the search capability does not return
/// verifiable citations yet.
pub const PLACEHOLDER_SOURCE_URL: &str = "https://news.google.com";
pub const PLACEHOLDER_SOURCE_NAME: &str = "Web Search";

/// A derived news record. Created once by the extraction pipeline,
/// never mutated; there is no update or delete path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsSummary {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub source_url: String,
    pub source_name: String,
    pub category: String,
    pub image_url: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl NewsSummary {
    pub fn new(
        title: String,
        summary: String,
        category: String,
        image_url: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            summary,
            source_url: PLACEHOLDER_SOURCE_URL.to_string(),
            source_name: PLACEHOLDER_SOURCE_NAME.to_string(),
            category,
            image_url,
            timestamp: now,
            created_at: now,
        }
    }
}

/// Read-side query over the news collection: newest-first, then skip,
/// then limit; optional exact (case-insensitive) category match.
#[derive(Debug, Clone)]
pub struct NewsQuery {
    pub limit: usize,
    pub skip: usize,
    pub category: Option<String>,
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self {
            limit: 50,
            skip: 0,
            category: None,
        }
    }
}

/// Liveness record for the status-check CRUD endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    pub fn new(client_name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            client_name,
            timestamp: Utc::now(),
        }
    }
}
