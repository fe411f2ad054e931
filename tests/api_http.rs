// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot, with the
// mock agent provider and an ephemeral store.

use std::sync::Arc;

use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value as Json};
use tower::ServiceExt as _; // for `oneshot`

use agent_newsroom::agent::AgentRegistry;
use agent_newsroom::config::AgentConfig;
use agent_newsroom::store::FileStore;
use agent_newsroom::{api, AppState};

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

/// Build the same Router the binary uses, minus the metrics route.
fn test_router() -> Router {
    let state = AppState {
        registry: Arc::new(AgentRegistry::new(AgentConfig::mock())),
        store: Arc::new(FileStore::ephemeral()),
    };
    api::router(state)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Json) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build GET request");
    let resp = app.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    let v: Json = serde_json::from_slice(&bytes).expect("parse json");
    (status, v)
}

async fn post_json(app: Router, uri: &str, payload: Json) -> (StatusCode, Json) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build POST request");
    let resp = app.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    let v: Json = serde_json::from_slice(&bytes).expect("parse json");
    (status, v)
}

#[tokio::test]
async fn api_root_says_hello() {
    let (status, v) = get_json(test_router(), "/api/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["message"], "Hello World");
}

#[tokio::test]
async fn chat_wraps_agent_output_with_capabilities() {
    let payload = json!({ "message": "What moved markets today?" });
    let (status, v) = post_json(test_router(), "/api/chat", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["success"], true);
    assert_eq!(v["agent_type"], "chat");
    assert!(
        !v["response"].as_str().unwrap_or_default().is_empty(),
        "mock provider output should pass through verbatim"
    );
    let caps = v["capabilities"].as_array().expect("capabilities array");
    assert!(!caps.is_empty());
    assert!(v["metadata"].is_object());
}

#[tokio::test]
async fn chat_with_unknown_agent_type_is_a_client_error() {
    let payload = json!({ "message": "hi", "agent_type": "oracle" });
    let (status, v) = post_json(test_router(), "/api/chat", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["success"], false);
    assert!(v["error"].as_str().unwrap().contains("oracle"));
}

#[tokio::test]
async fn search_reports_sources_count_from_metadata() {
    let payload = json!({ "query": "rust adoption" });
    let (status, v) = post_json(test_router(), "/api/search", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["success"], true);
    assert_eq!(v["query"], "rust adoption");
    assert!(!v["summary"].as_str().unwrap_or_default().is_empty());
    // the mock search agent records one tool run per execution
    assert_eq!(v["sources_count"], 1);
    assert!(v["search_results"].is_object());
}

#[tokio::test]
async fn capabilities_endpoint_lists_both_agents() {
    let (status, v) = get_json(test_router(), "/api/agents/capabilities").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["success"], true);
    let search_caps = v["capabilities"]["search_agent"]
        .as_array()
        .expect("search_agent list");
    let chat_caps = v["capabilities"]["chat_agent"]
        .as_array()
        .expect("chat_agent list");
    assert!(search_caps.iter().any(|c| c == "web_search"));
    assert!(!chat_caps.is_empty());
}

#[tokio::test]
async fn news_list_on_empty_store_is_success_with_zero_items() {
    let (status, v) = get_json(test_router(), "/api/news").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["success"], true);
    assert_eq!(v["count"], 0);
    assert_eq!(v["news_items"], json!([]));
}

#[tokio::test]
async fn news_fetch_caps_the_batch_at_two_topics() {
    let app = test_router();
    let payload = json!({ "topics": ["technology", "business", "science"], "count": 5 });
    let (status, v) = post_json(app.clone(), "/api/news/fetch", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["success"], true);
    let items = v["news_items"].as_array().expect("news_items");
    assert_eq!(items.len(), 2, "only the first two topics are processed");

    assert_eq!(items[0]["title"], "Latest Technology News");
    assert_eq!(items[0]["category"], "technology");
    assert_eq!(items[1]["title"], "Latest Business News");
    assert!(items[0]["summary"].as_str().unwrap().chars().count() <= 250);

    // fetched items are readable back through the list endpoint
    let (status, v) = get_json(app, "/api/news?category=Technology").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["count"], 1);
    assert_eq!(v["news_items"][0]["category"], "technology");
}

#[tokio::test]
async fn news_seed_persists_the_whole_catalog() {
    let app = test_router();
    let (status, v) = post_json(app.clone(), "/api/news/seed", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["success"], true);
    assert_eq!(v["count"], 10);

    let (_, listed) = get_json(app.clone(), "/api/news?limit=100").await;
    assert_eq!(listed["count"], 10);
    let first = &listed["news_items"][0];
    assert!(first["image_url"].as_str().is_some());
    assert!(!first["title"].as_str().unwrap().is_empty());

    // "all" is a sentinel, not a category
    let (_, unfiltered) = get_json(app.clone(), "/api/news?category=ALL").await;
    assert_eq!(unfiltered["count"], 10);

    let (_, paged) = get_json(app, "/api/news?limit=3&skip=8").await;
    assert_eq!(paged["count"], 2, "skip applies before limit");
}

#[tokio::test]
async fn status_checks_round_trip() {
    let app = test_router();
    let (status, created) =
        post_json(app.clone(), "/api/status", json!({ "client_name": "probe" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["client_name"], "probe");
    assert!(!created["id"].as_str().unwrap().is_empty());
    assert!(created["timestamp"].as_str().is_some());

    let (status, listed) = get_json(app, "/api/status").await;
    assert_eq!(status, StatusCode::OK);
    let arr = listed.as_array().expect("status list");
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["client_name"], "probe");
}
