pub mod agents;
pub mod ai;
pub mod prompt;
pub mod runtime;
pub mod settings;
pub mod snippets;
pub mod tools;

// Public library API - the types most callers need to configure a coder agent
// and hand it to a runtime.
pub use agents::agent::Agent;
pub use agents::coder::{CoderAgent, CoderAgentBuilder};
pub use ai::provider::AiProvider;
pub use prompt::{Prompt, PromptError, PromptTemplate};
pub use runtime::{AgentRuntime, RuntimeConfig, RuntimeFactory};
pub use settings::CoderSettings;
pub use snippets::{CodeSnippet, SnippetStore};
pub use tools::ToolDescriptor;
