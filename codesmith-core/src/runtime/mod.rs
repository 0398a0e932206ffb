//! The seam between agent configuration and whatever executes the agent.
//!
//! The reasoning loop, tool dispatch, checkpointing and interrupts all belong
//! to the runtime. This module only describes what a runtime is handed.

pub mod recording;

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ai::provider::AiProvider;
use crate::ai::types::Message;
use crate::prompt::Prompt;
use crate::tools::SharedTool;

/// Protocol version the runtime should speak.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GraphVersion {
    #[default]
    V1,
    V2,
}

impl fmt::Display for GraphVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GraphVersion::V1 => write!(f, "v1"),
            GraphVersion::V2 => write!(f, "v2"),
        }
    }
}

/// Schema for structured output, as a JSON schema document.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseFormat {
    pub schema: Value,
}

impl ResponseFormat {
    pub fn from_schema(schema: Value) -> Self {
        Self { schema }
    }

    pub fn from_type<T: JsonSchema>() -> Result<Self> {
        let schema = serde_json::to_value(schemars::schema_for!(T))?;
        Ok(Self { schema })
    }
}

/// Opaque handle to the runtime's checkpoint persistence.
pub trait CheckpointSaver: Send + Sync + fmt::Debug {}

/// Opaque handle to the runtime's cross-thread key/value store.
pub trait StateStore: Send + Sync + fmt::Debug {}

/// Options forwarded to the runtime without interpretation.
#[derive(Debug, Clone, Default)]
pub struct RuntimeOptions {
    pub response_format: Option<ResponseFormat>,
    pub checkpointer: Option<Arc<dyn CheckpointSaver>>,
    pub store: Option<Arc<dyn StateStore>>,
    pub interrupt_before: Vec<String>,
    pub interrupt_after: Vec<String>,
    pub debug: bool,
    pub version: GraphVersion,
}

/// Everything a runtime needs to execute an agent.
#[derive(Clone)]
pub struct RuntimeConfig {
    pub name: String,
    pub model: Arc<dyn AiProvider>,
    pub tools: Vec<SharedTool>,
    pub prompt: Prompt,
    pub max_iterations: u32,
    pub cache_enabled: bool,
    pub options: RuntimeOptions,
}

impl fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("name", &self.name)
            .field("model", &self.model.model_id())
            .field(
                "tools",
                &self.tools.iter().map(|t| t.name()).collect::<Vec<_>>(),
            )
            .field("prompt", &self.prompt)
            .field("max_iterations", &self.max_iterations)
            .field("cache_enabled", &self.cache_enabled)
            .field("options", &self.options)
            .finish()
    }
}

/// A running agent. Implementations own the reasoning loop.
#[async_trait::async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Runs the agent over `messages` and returns the resulting conversation.
    async fn invoke(&self, messages: Vec<Message>) -> Result<Vec<Message>>;
}

/// Constructs a runtime from agent configuration.
pub trait RuntimeFactory {
    fn build(&self, config: RuntimeConfig) -> Result<Box<dyn AgentRuntime>>;
}
