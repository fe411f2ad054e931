// src/agent/provider.rs
//! LLM provider abstraction behind the agent capabilities.
//! One completion in, one text out; tool orchestration is not modeled here.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{AgentConfig, AgentMode};

/// Low-level completion client shared by the chat and search agents.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Run one system+user completion and return the raw text.
    async fn complete(&self, system: &str, user: &str) -> anyhow::Result<String>;
    /// Provider name for diagnostics and metadata.
    fn name(&self) -> &'static str;
}

pub type SharedLlm = Arc<dyn LlmClient>;

/// Factory: build a client according to the agent config.
pub fn build_llm_client(config: &AgentConfig) -> SharedLlm {
    match &config.mode {
        AgentMode::OpenAi { api_key } => {
            Arc::new(OpenAiClient::new(api_key.clone(), config.model.clone()))
        }
        AgentMode::Mock => Arc::new(MockLlm),
        AgentMode::Disabled => Arc::new(DisabledLlm),
    }
}

/// OpenAI provider (Chat Completions API).
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("agent-newsroom/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("reqwest client");
        Self {
            http,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, system: &str, user: &str) -> anyhow::Result<String> {
        #[derive(Serialize)]
        struct Msg<'a> {
            role: &'a str,
            content: &'a str,
        }
        #[derive(Serialize)]
        struct Req<'a> {
            model: &'a str,
            messages: Vec<Msg<'a>>,
            temperature: f32,
            max_tokens: u32,
        }
        #[derive(Deserialize)]
        struct Resp {
            choices: Vec<Choice>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMsg,
        }
        #[derive(Deserialize)]
        struct ChoiceMsg {
            content: String,
        }

        if self.api_key.is_empty() {
            bail!("openai api key is empty");
        }

        let req = Req {
            model: &self.model,
            messages: vec![
                Msg {
                    role: "system",
                    content: system,
                },
                Msg {
                    role: "user",
                    content: user,
                },
            ],
            temperature: 0.2,
            max_tokens: 600,
        };

        let resp = self
            .http
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
            .context("openai request failed")?;

        let status = resp.status();
        if !status.is_success() {
            bail!("openai returned status {status}");
        }

        let body: Resp = resp.json().await.context("openai response parse failed")?;
        let content = body
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| anyhow!("openai response had no choices"))?;
        Ok(content)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

/// Deterministic client for tests and local runs. Shaped like real search
/// output so the extraction pipeline exercises its full parse path.
pub struct MockLlm;

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, _system: &str, user: &str) -> anyhow::Result<String> {
        let gist: String = user.chars().take(60).collect();
        Ok(format!(
            "Title: **Mock Headline**\n- Deterministic summary for \"{gist}\". Generated without a live provider."
        ))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Fails every completion; used when the provider is switched off.
pub struct DisabledLlm;

#[async_trait]
impl LlmClient for DisabledLlm {
    async fn complete(&self, _system: &str, _user: &str) -> anyhow::Result<String> {
        bail!("agent provider is disabled")
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}
