// src/store.rs
//! Persistence seam for the news and status collections. The production
//! implementation keeps both collections in memory and snapshots them to
//! JSON files under the data dir; tests run the same code path with
//! snapshots disabled.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use async_trait::async_trait;
use tracing::warn;

use crate::news::model::{NewsQuery, NewsSummary, StatusCheck};

const NEWS_FILE: &str = "news_summaries.json";
const STATUS_FILE: &str = "status_checks.json";

/// Append/query surface over the persisted collections. Records are
/// insert-only; no update or delete path exists.
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_news(&self, item: NewsSummary) -> anyhow::Result<()>;
    async fn query_news(&self, query: &NewsQuery) -> anyhow::Result<Vec<NewsSummary>>;
    async fn insert_status(&self, check: StatusCheck) -> anyhow::Result<()>;
    async fn list_status(&self, limit: usize) -> anyhow::Result<Vec<StatusCheck>>;
}

pub struct FileStore {
    dir: Option<PathBuf>,
    news: Mutex<Vec<NewsSummary>>,
    status: Mutex<Vec<StatusCheck>>,
}

impl FileStore {
    /// Open the store under `dir`, loading any existing snapshots.
    pub fn open<P: AsRef<Path>>(dir: P) -> anyhow::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("create data dir {}", dir.display()))?;

        let news = load_snapshot(&dir.join(NEWS_FILE));
        let status = load_snapshot(&dir.join(STATUS_FILE));

        Ok(Self {
            dir: Some(dir),
            news: Mutex::new(news),
            status: Mutex::new(status),
        })
    }

    /// In-memory store with snapshots disabled (tests).
    pub fn ephemeral() -> Self {
        Self {
            dir: None,
            news: Mutex::new(Vec::new()),
            status: Mutex::new(Vec::new()),
        }
    }

    fn persist<T: serde::Serialize>(&self, file: &str, items: &[T]) -> anyhow::Result<()> {
        let Some(dir) = &self.dir else {
            return Ok(());
        };
        let path = dir.join(file);
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string(items).context("serialize snapshot")?;
        let mut f = fs::File::create(&tmp).context("create snapshot tmp file")?;
        f.write_all(json.as_bytes()).context("write snapshot")?;
        fs::rename(tmp, path).context("rename snapshot into place")?;
        Ok(())
    }
}

fn load_snapshot<T: serde::de::DeserializeOwned>(path: &Path) -> Vec<T> {
    match fs::read_to_string(path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = ?e, "snapshot unreadable, starting empty");
            Vec::new()
        }),
        Err(_) => Vec::new(),
    }
}

#[async_trait]
impl Store for FileStore {
    async fn insert_news(&self, item: NewsSummary) -> anyhow::Result<()> {
        let mut guard = self.news.lock().expect("news store mutex poisoned");
        guard.push(item);
        self.persist(NEWS_FILE, &guard)
    }

    async fn query_news(&self, query: &NewsQuery) -> anyhow::Result<Vec<NewsSummary>> {
        let guard = self.news.lock().expect("news store mutex poisoned");
        let mut items: Vec<NewsSummary> = guard
            .iter()
            .filter(|item| match &query.category {
                Some(cat) => item.category.eq_ignore_ascii_case(cat),
                None => true,
            })
            .cloned()
            .collect();
        // newest first; skip applies after sorting, before limit
        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(items
            .into_iter()
            .skip(query.skip)
            .take(query.limit)
            .collect())
    }

    async fn insert_status(&self, check: StatusCheck) -> anyhow::Result<()> {
        let mut guard = self.status.lock().expect("status store mutex poisoned");
        guard.push(check);
        self.persist(STATUS_FILE, &guard)
    }

    async fn list_status(&self, limit: usize) -> anyhow::Result<Vec<StatusCheck>> {
        let guard = self.status.lock().expect("status store mutex poisoned");
        Ok(guard.iter().take(limit).cloned().collect())
    }
}
