// src/agent/chat.rs

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use super::provider::{build_llm_client, SharedLlm};
use super::{Agent, AgentResult};
use crate::config::AgentConfig;

const SYSTEM_PROMPT: &str = "You are a helpful, knowledgeable assistant. \
Answer conversationally and keep responses focused on the user's question.";

const CAPABILITIES: &[&str] = &["conversation", "general_knowledge", "information_synthesis"];

/// Conversational agent: one completion per message, no tools.
pub struct ChatAgent {
    llm: SharedLlm,
    model: String,
}

impl ChatAgent {
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            llm: build_llm_client(config),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl Agent for ChatAgent {
    async fn execute(&self, prompt: &str, _use_tools: bool) -> anyhow::Result<AgentResult> {
        match self.llm.complete(SYSTEM_PROMPT, prompt).await {
            Ok(content) => {
                let mut metadata = HashMap::new();
                metadata.insert("model".to_string(), json!(self.model));
                metadata.insert("provider".to_string(), json!(self.llm.name()));
                Ok(AgentResult::ok(content, metadata))
            }
            Err(e) => {
                warn!(error = ?e, "chat agent completion failed");
                Ok(AgentResult::failure(e.to_string()))
            }
        }
    }

    fn capabilities(&self) -> &'static [&'static str] {
        CAPABILITIES
    }
}
