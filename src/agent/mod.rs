// src/agent/mod.rs
//! Agent capabilities: a closed set of two variants (chat, search), both
//! consumed through the same `execute(prompt, use_tools)` contract.

pub mod chat;
pub mod provider;
pub mod registry;
pub mod search;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

pub use chat::ChatAgent;
pub use registry::AgentRegistry;
pub use search::SearchAgent;

/// Outcome of one capability invocation. Produced once, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct AgentResult {
    pub success: bool,
    /// Free-form natural-language output; may be empty.
    pub content: String,
    pub error: Option<String>,
    /// Opaque, capability-specific extras (model name, tool counters, ...).
    pub metadata: HashMap<String, Value>,
}

impl AgentResult {
    pub fn ok(content: String, metadata: HashMap<String, Value>) -> Self {
        Self {
            success: true,
            content,
            error: None,
            metadata,
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            content: String::new(),
            error: Some(error),
            metadata: HashMap::new(),
        }
    }
}

/// The polymorphic capability unit.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Run one prompt. Provider faults come back as `success: false` with an
    /// error string; implementations do not panic on bad provider output.
    async fn execute(&self, prompt: &str, use_tools: bool) -> anyhow::Result<AgentResult>;

    /// Advertised capability tags, surfaced verbatim on the HTTP API.
    fn capabilities(&self) -> &'static [&'static str];
}

/// Closed set of agent type names. Extension point: add a variant here,
/// never dispatch on raw strings past this parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentType {
    Chat,
    Search,
}

impl AgentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentType::Chat => "chat",
            AgentType::Search => "search",
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chat" => Ok(AgentType::Chat),
            "search" => Ok(AgentType::Search),
            other => Err(ApiError::UnknownAgentType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_type_parses_known_names() {
        assert_eq!("chat".parse::<AgentType>().unwrap(), AgentType::Chat);
        assert_eq!("search".parse::<AgentType>().unwrap(), AgentType::Search);
    }

    #[test]
    fn agent_type_rejects_unknown_names() {
        for bad in ["", "Chat", "SEARCH", "planner", "chat "] {
            assert!(bad.parse::<AgentType>().is_err(), "should reject {bad:?}");
        }
    }
}
