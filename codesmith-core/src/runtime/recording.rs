use std::sync::{Arc, Mutex};

use anyhow::Result;
use tracing::debug;

use crate::ai::types::{ConversationRequest, Message};
use crate::runtime::{AgentRuntime, RuntimeConfig, RuntimeFactory};

/// Test runtime: remembers every config it was built from and answers each
/// invocation with a single model call. Clones share recorded state.
#[derive(Clone, Default)]
pub struct RecordingRuntime {
    configs: Arc<Mutex<Vec<RuntimeConfig>>>,
}

impl RecordingRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn built_configs(&self) -> Vec<RuntimeConfig> {
        self.configs.lock().unwrap().clone()
    }

    pub fn last_config(&self) -> Option<RuntimeConfig> {
        self.configs.lock().unwrap().last().cloned()
    }
}

impl RuntimeFactory for RecordingRuntime {
    fn build(&self, config: RuntimeConfig) -> Result<Box<dyn AgentRuntime>> {
        self.configs.lock().unwrap().push(config.clone());
        Ok(Box::new(SingleTurnRuntime { config }))
    }
}

struct SingleTurnRuntime {
    config: RuntimeConfig,
}

#[async_trait::async_trait]
impl AgentRuntime for SingleTurnRuntime {
    async fn invoke(&self, mut messages: Vec<Message>) -> Result<Vec<Message>> {
        let request = ConversationRequest {
            messages: self.config.prompt.apply(&messages)?,
        };
        debug!(
            agent = %self.config.name,
            provider = self.config.model.name(),
            messages = request.messages.len(),
            "Single turn"
        );

        let response = self.config.model.converse(request).await?;
        messages.push(response.message);
        Ok(messages)
    }
}
