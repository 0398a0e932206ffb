use std::sync::Arc;

use serde_json::Value;

/// A tool as seen by the prompt composer: just enough to list it in the
/// system prompt. Executors that also provide a schema can override
/// `input_schema`.
pub trait ToolDescriptor: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    fn input_schema(&self) -> Value {
        Value::Object(Default::default())
    }
}

pub type SharedTool = Arc<dyn ToolDescriptor>;

/// Plain name/description pair, for tools defined outside this crate or in
/// tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn shared(name: impl Into<String>, description: impl Into<String>) -> SharedTool {
        Arc::new(Self::new(name, description))
    }
}

impl ToolDescriptor for ToolSpec {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Renders one bulleted line per tool: `- {name}: {description}`.
pub fn render_tool_directory(tools: &[SharedTool]) -> String {
    tools
        .iter()
        .map(|tool| format!("- {}: {}", tool.name(), tool.description()))
        .collect::<Vec<_>>()
        .join("\n")
}
