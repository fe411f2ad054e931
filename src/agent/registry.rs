// src/agent/registry.rs
//! Process-lifetime capability registry: each agent type is constructed at
//! most once and shared across every subsequent request.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{Agent, AgentType, ChatAgent, SearchAgent};
use crate::config::AgentConfig;

pub struct AgentRegistry {
    config: AgentConfig,
    agents: RwLock<HashMap<AgentType, Arc<dyn Agent>>>,
}

impl AgentRegistry {
    pub fn new(config: AgentConfig) -> Self {
        Self {
            config,
            agents: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve an already-constructed capability or build it on first use.
    /// Concurrent first calls converge on a single stored instance: the
    /// construction happens under the write lock via `or_insert_with`.
    pub fn resolve_or_create(&self, kind: AgentType) -> Arc<dyn Agent> {
        {
            let guard = self.agents.read().expect("agent registry lock poisoned");
            if let Some(agent) = guard.get(&kind) {
                return Arc::clone(agent);
            }
        }

        let mut guard = self.agents.write().expect("agent registry lock poisoned");
        guard
            .entry(kind)
            .or_insert_with(|| self.build(kind))
            .clone()
    }

    fn build(&self, kind: AgentType) -> Arc<dyn Agent> {
        match kind {
            AgentType::Chat => Arc::new(ChatAgent::new(&self.config)),
            AgentType::Search => Arc::new(SearchAgent::new(&self.config)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_twice_returns_same_instance() {
        let registry = AgentRegistry::new(AgentConfig::mock());
        let a = registry.resolve_or_create(AgentType::Search);
        let b = registry.resolve_or_create(AgentType::Search);
        assert!(Arc::ptr_eq(&a, &b), "second resolve must reuse the first");
    }

    #[test]
    fn chat_and_search_are_distinct_instances() {
        let registry = AgentRegistry::new(AgentConfig::mock());
        let chat = registry.resolve_or_create(AgentType::Chat);
        let search = registry.resolve_or_create(AgentType::Search);
        assert!(!Arc::ptr_eq(&chat, &search));
        assert_ne!(chat.capabilities(), search.capabilities());
    }
}
