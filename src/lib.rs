// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod agent;
pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod news;
pub mod store;

// ---- Re-exports for stable public API ----
pub use crate::agent::{Agent, AgentRegistry, AgentResult, AgentType};
pub use crate::api::{router, AppState};
pub use crate::error::ApiError;
pub use crate::news::model::NewsSummary;
pub use crate::store::{FileStore, Store};
