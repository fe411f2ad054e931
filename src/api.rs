// src/api.rs
//! HTTP surface. Handlers resolve capabilities through the injected
//! registry, catch capability faults, and degrade to structured
//! `{success: false, error: ...}` bodies; only unknown agent types (400)
//! and store faults (503) surface as error statuses.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::agent::{AgentRegistry, AgentType};
use crate::error::ApiError;
use crate::news::model::{NewsQuery, NewsSummary, StatusCheck};
use crate::news::{self, PairOutcome};
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<AgentRegistry>,
    pub store: Arc<dyn Store>,
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/", get(root))
        .route("/status", post(create_status_check).get(get_status_checks))
        .route("/chat", post(chat_with_agent))
        .route("/search", post(search_and_summarize))
        .route("/agents/capabilities", get(get_agent_capabilities))
        .route("/news/fetch", post(fetch_news))
        .route("/news/seed", post(seed_news))
        .route("/news", get(get_news))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .layer(CorsLayer::very_permissive())
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello World" }))
}

// ---- status checks ----

#[derive(Deserialize)]
struct StatusCheckCreate {
    client_name: String,
}

async fn create_status_check(
    State(state): State<AppState>,
    Json(input): Json<StatusCheckCreate>,
) -> Result<Json<StatusCheck>, ApiError> {
    let check = StatusCheck::new(input.client_name);
    state
        .store
        .insert_status(check.clone())
        .await
        .map_err(|e| ApiError::StoreUnavailable(e.to_string()))?;
    Ok(Json(check))
}

async fn get_status_checks(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusCheck>>, ApiError> {
    let checks = state
        .store
        .list_status(1000)
        .await
        .map_err(|e| ApiError::StoreUnavailable(e.to_string()))?;
    Ok(Json(checks))
}

// ---- conversational endpoints ----

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
    #[serde(default = "default_agent_type")]
    agent_type: String,
}

fn default_agent_type() -> String {
    "chat".to_string()
}

#[derive(Serialize)]
struct ChatResponse {
    success: bool,
    response: String,
    agent_type: String,
    capabilities: Vec<String>,
    metadata: HashMap<String, Value>,
    error: Option<String>,
}

async fn chat_with_agent(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let kind: AgentType = req.agent_type.parse()?;
    let agent = state.registry.resolve_or_create(kind);

    match agent.execute(&req.message, false).await {
        Ok(result) => Ok(Json(ChatResponse {
            success: result.success,
            response: result.content,
            agent_type: req.agent_type,
            capabilities: capability_tags(agent.capabilities()),
            metadata: result.metadata,
            error: result.error,
        })),
        Err(e) => {
            error!(error = ?e, "error in chat endpoint");
            Ok(Json(ChatResponse {
                success: false,
                response: String::new(),
                agent_type: req.agent_type,
                capabilities: Vec::new(),
                metadata: HashMap::new(),
                error: Some(e.to_string()),
            }))
        }
    }
}

#[derive(Deserialize)]
struct SearchRequest {
    query: String,
    #[serde(default = "default_max_results")]
    #[allow(dead_code)]
    max_results: usize,
}

fn default_max_results() -> usize {
    5
}

#[derive(Serialize)]
struct SearchResponse {
    success: bool,
    query: String,
    summary: String,
    search_results: Option<HashMap<String, Value>>,
    sources_count: u64,
    error: Option<String>,
}

impl SearchResponse {
    fn failure(query: String, error: String) -> Self {
        Self {
            success: false,
            query,
            summary: String::new(),
            search_results: None,
            sources_count: 0,
            error: Some(error),
        }
    }
}

/// Best-effort source accounting: `tool_run_count` wins over `tools_used`;
/// absent or non-numeric values count as zero.
fn sources_count(metadata: &HashMap<String, Value>) -> u64 {
    ["tool_run_count", "tools_used"]
        .iter()
        .find_map(|key| metadata.get(*key).and_then(Value::as_u64))
        .unwrap_or(0)
}

async fn search_and_summarize(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Json<SearchResponse> {
    let agent = state.registry.resolve_or_create(AgentType::Search);
    let prompt = format!(
        "Search for information about: {}. Provide a comprehensive summary with key findings.",
        req.query
    );

    match agent.execute(&prompt, true).await {
        Ok(result) if result.success => Json(SearchResponse {
            success: true,
            query: req.query,
            summary: result.content,
            sources_count: sources_count(&result.metadata),
            search_results: Some(result.metadata),
            error: None,
        }),
        Ok(result) => Json(SearchResponse::failure(
            req.query,
            result.error.unwrap_or_else(|| "search failed".to_string()),
        )),
        Err(e) => {
            error!(error = ?e, "error in search endpoint");
            Json(SearchResponse::failure(req.query, e.to_string()))
        }
    }
}

async fn get_agent_capabilities(State(state): State<AppState>) -> Json<Value> {
    let search = state.registry.resolve_or_create(AgentType::Search);
    let chat = state.registry.resolve_or_create(AgentType::Chat);

    Json(json!({
        "success": true,
        "capabilities": {
            "search_agent": capability_tags(search.capabilities()),
            "chat_agent": capability_tags(chat.capabilities()),
        },
    }))
}

fn capability_tags(tags: &'static [&'static str]) -> Vec<String> {
    tags.iter().map(|t| t.to_string()).collect()
}

// ---- news pipeline endpoints ----

#[derive(Deserialize)]
struct NewsFetchRequest {
    #[serde(default = "default_topics")]
    topics: Vec<String>,
    #[serde(default = "default_count")]
    count: usize,
}

fn default_topics() -> Vec<String> {
    news::DEFAULT_TOPICS.iter().map(|s| s.to_string()).collect()
}

fn default_count() -> usize {
    10
}

#[derive(Serialize)]
struct NewsFetchResponse {
    success: bool,
    message: String,
    news_items: Vec<NewsSummary>,
}

/// Fetch latest news for the requested topics and persist the summaries.
async fn fetch_news(
    State(state): State<AppState>,
    Json(req): Json<NewsFetchRequest>,
) -> Json<NewsFetchResponse> {
    let agent = state.registry.resolve_or_create(AgentType::Search);
    let pairs = news::topic_pairs(&req.topics);
    info!(
        topics = req.topics.len(),
        processed = pairs.len(),
        requested_count = req.count,
        "running topic news batch"
    );

    let outcomes = news::run_batch(agent.as_ref(), state.store.as_ref(), pairs).await;
    let news_items: Vec<NewsSummary> = outcomes
        .into_iter()
        .filter_map(|o| match o {
            PairOutcome::Persisted(item) => Some(item),
            _ => None,
        })
        .collect();

    Json(NewsFetchResponse {
        success: true,
        message: format!("Fetched {} news items", news_items.len()),
        news_items,
    })
}

#[derive(Serialize)]
struct NewsSeedResponse {
    success: bool,
    message: String,
    count: usize,
}

/// Run the fixed category catalog through the search capability.
async fn seed_news(State(state): State<AppState>) -> Json<NewsSeedResponse> {
    let agent = state.registry.resolve_or_create(AgentType::Search);
    let pairs = news::seed_pairs();
    info!(queries = pairs.len(), "fetching real news for catalog");

    let outcomes = news::run_batch(agent.as_ref(), state.store.as_ref(), pairs).await;
    let count = outcomes
        .iter()
        .filter(|o| matches!(o, PairOutcome::Persisted(_)))
        .count();

    Json(NewsSeedResponse {
        success: true,
        message: format!("Fetched {count} real news items"),
        count,
    })
}

#[derive(Deserialize)]
struct NewsListParams {
    #[serde(default = "default_limit")]
    limit: usize,
    #[serde(default)]
    skip: usize,
    category: Option<String>,
}

fn default_limit() -> usize {
    50
}

#[derive(Serialize)]
struct NewsListResponse {
    success: bool,
    count: usize,
    category: Option<String>,
    news_items: Vec<NewsSummary>,
}

/// List news summaries, newest first, optionally filtered by category.
/// An empty result set is a success, not an error.
async fn get_news(
    State(state): State<AppState>,
    Query(params): Query<NewsListParams>,
) -> Result<Json<NewsListResponse>, ApiError> {
    let category_filter = params
        .category
        .as_deref()
        .filter(|c| !c.eq_ignore_ascii_case("all"))
        .map(|c| c.to_lowercase());

    let query = NewsQuery {
        limit: params.limit,
        skip: params.skip,
        category: category_filter,
    };

    let news_items = state
        .store
        .query_news(&query)
        .await
        .map_err(|e| ApiError::StoreUnavailable(e.to_string()))?;

    Ok(Json(NewsListResponse {
        success: true,
        count: news_items.len(),
        category: params.category,
        news_items,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(entries: &[(&str, Value)]) -> HashMap<String, Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn sources_count_prefers_tool_run_count_over_tools_used() {
        let m = metadata(&[("tool_run_count", json!(3)), ("tools_used", json!(7))]);
        assert_eq!(sources_count(&m), 3);
    }

    #[test]
    fn sources_count_falls_back_to_tools_used() {
        let m = metadata(&[("tools_used", json!(7))]);
        assert_eq!(sources_count(&m), 7);
    }

    #[test]
    fn sources_count_defaults_to_zero_without_numeric_keys() {
        assert_eq!(sources_count(&HashMap::new()), 0);
        let m = metadata(&[("tool_run_count", json!("three")), ("tools_used", json!("many"))]);
        assert_eq!(sources_count(&m), 0);
    }

    #[test]
    fn sources_count_skips_a_non_numeric_primary_key() {
        let m = metadata(&[("tool_run_count", json!("three")), ("tools_used", json!(2))]);
        assert_eq!(sources_count(&m), 2);
    }
}
