// src/config.rs
//! Environment-driven service configuration. Anything required and missing
//! here is fatal: the binary refuses to start rather than limp along.

use std::env;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8001";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_DATA_DIR: &str = "NEWS_DATA_DIR";
pub const ENV_PROVIDER: &str = "AGENT_PROVIDER";
pub const ENV_MODEL: &str = "AGENT_MODEL";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_TEST_MODE: &str = "AGENT_TEST_MODE";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("unsupported agent provider: {0}")]
    UnsupportedProvider(String),
}

/// How agent capabilities talk to a language model.
#[derive(Debug, Clone)]
pub enum AgentMode {
    /// Real provider: OpenAI-compatible chat completions.
    OpenAi { api_key: String },
    /// Deterministic canned output; no network. `AGENT_TEST_MODE=mock`.
    Mock,
    /// Every execution reports failure. `AGENT_PROVIDER=disabled`.
    Disabled,
}

/// Shared construction config for agent capabilities.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub mode: AgentMode,
    pub model: String,
}

impl AgentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(|key| env::var(key).ok())
    }

    /// Resolve the config from a variable lookup. Separated from the process
    /// environment so the mode switches stay testable.
    fn resolve<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let model = lookup(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string());

        if lookup(ENV_TEST_MODE).as_deref() == Some("mock") {
            return Ok(Self {
                mode: AgentMode::Mock,
                model,
            });
        }

        let provider = lookup(ENV_PROVIDER)
            .unwrap_or_else(|| "openai".to_string())
            .to_lowercase();

        let mode = match provider.as_str() {
            "openai" => {
                let api_key = lookup(ENV_OPENAI_API_KEY)
                    .ok_or(ConfigError::MissingVar(ENV_OPENAI_API_KEY))?;
                AgentMode::OpenAi { api_key }
            }
            "disabled" => AgentMode::Disabled,
            other => return Err(ConfigError::UnsupportedProvider(other.to_string())),
        };

        Ok(Self { mode, model })
    }

    /// Config for tests and local probes: no env, no network.
    pub fn mock() -> Self {
        Self {
            mode: AgentMode::Mock,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: String,
    pub data_dir: String,
    pub agent: AgentConfig,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bind_addr: env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            data_dir: env::var(ENV_DATA_DIR).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string()),
            agent: AgentConfig::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>(entries: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            entries
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn missing_openai_key_is_fatal() {
        let err = AgentConfig::resolve(vars(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(ENV_OPENAI_API_KEY)));
    }

    #[test]
    fn openai_is_the_default_provider() {
        let cfg = AgentConfig::resolve(vars(&[(ENV_OPENAI_API_KEY, "sk-test")])).unwrap();
        assert!(matches!(cfg.mode, AgentMode::OpenAi { ref api_key } if api_key == "sk-test"));
        assert_eq!(cfg.model, DEFAULT_MODEL);
    }

    #[test]
    fn disabled_provider_needs_no_key() {
        let cfg = AgentConfig::resolve(vars(&[(ENV_PROVIDER, "disabled")])).unwrap();
        assert!(matches!(cfg.mode, AgentMode::Disabled));
    }

    #[test]
    fn test_mode_mock_wins_over_provider_settings() {
        let cfg = AgentConfig::resolve(vars(&[
            (ENV_TEST_MODE, "mock"),
            (ENV_PROVIDER, "openai"),
            (ENV_MODEL, "gpt-4o"),
        ]))
        .unwrap();
        assert!(matches!(cfg.mode, AgentMode::Mock));
        assert_eq!(cfg.model, "gpt-4o");
    }

    #[test]
    fn unsupported_provider_is_rejected() {
        let err = AgentConfig::resolve(vars(&[(ENV_PROVIDER, "ollama")])).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedProvider(ref p) if p == "ollama"));
    }
}
