use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::agents::agent::Agent;
use crate::ai::provider::AiProvider;
use crate::prompt::{Prompt, PromptError, PromptTemplate};
use crate::runtime::{
    AgentRuntime, CheckpointSaver, GraphVersion, ResponseFormat, RuntimeConfig, RuntimeFactory,
    RuntimeOptions, StateStore,
};
use crate::settings::CoderSettings;
use crate::snippets::{CodeSnippet, SnippetStore};
use crate::tools::{render_tool_directory, SharedTool};

pub const CODER_TEMPLATE: &str = r#"You are a professional software engineer who writes clean, efficient and well-documented code.

## How to work

### Understand the problem
- Read the requirements carefully before writing any code
- Split large problems into small, independent pieces
- List the edge cases and failure modes up front

### Design the solution
- Decide on an approach before implementing it
- Compare candidate algorithms and data structures
- Favour designs that stay maintainable as they grow

### Implement
- Write readable code with meaningful names
- Follow the conventions of the language and the surrounding project
- Comment logic that is not obvious from the code itself

### Test and debug
- Exercise the code with ordinary inputs and with edge cases
- Debug methodically; change one thing at a time
- Confirm the result meets every stated requirement

### Optimize
- Improve efficiency only where it matters
- Refactor for clarity once the behaviour is correct
- Keep time and space complexity in mind

## Guidelines
- Readability and maintainability come first
- Handle errors and edge cases explicitly
- Explain the choices behind your implementation

Available tools:
{tools}
"#;

const DEFAULT_MAX_ITERATIONS: u32 = 5;

/// Coding assistant configuration: the prompt, tool list and runtime options
/// for a coder agent, plus the snippets it produced this session.
///
/// Execution is delegated to an [`AgentRuntime`] built from
/// [`CoderAgent::runtime_config`].
pub struct CoderAgent {
    name: String,
    model: Arc<dyn AiProvider>,
    tools: Vec<SharedTool>,
    template: PromptTemplate,
    prompt: Prompt,
    max_iterations: u32,
    cache_enabled: bool,
    options: RuntimeOptions,
    snippets: SnippetStore,
}

impl CoderAgent {
    pub fn builder(name: impl Into<String>, model: Arc<dyn AiProvider>) -> CoderAgentBuilder {
        CoderAgentBuilder::new(name, model)
    }

    pub fn model(&self) -> &Arc<dyn AiProvider> {
        &self.model
    }

    /// The template text prompts are re-rendered from when tools change.
    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    pub fn options(&self) -> &RuntimeOptions {
        &self.options
    }

    /// Adds tools and refreshes the prompt's tool directory.
    ///
    /// Only a text prompt is refreshed. Message, callable and runnable
    /// prompts keep whatever they were built with. The tool list is extended
    /// even when rendering fails and `Err` is returned.
    pub fn add_tools(
        &mut self,
        tools: impl IntoIterator<Item = SharedTool>,
    ) -> Result<(), PromptError> {
        self.tools.extend(tools);

        if !self.prompt.is_text() {
            warn!(
                agent = %self.name,
                tools = self.tools.len(),
                "Prompt is not text; tool directory not refreshed"
            );
            return Ok(());
        }

        let directory = render_tool_directory(&self.tools);
        self.prompt = Prompt::Text(self.template.render_tools(&directory)?);
        debug!(agent = %self.name, tools = self.tools.len(), "Re-rendered prompt");
        Ok(())
    }

    pub fn save_code_snippet(
        &mut self,
        language: impl Into<String>,
        code: impl Into<String>,
        description: impl Into<String>,
    ) {
        self.snippets.save(language, code, description);
    }

    pub fn code_snippets(&self, language: Option<&str>) -> Vec<&CodeSnippet> {
        self.snippets.list(language)
    }

    pub fn latest_snippet(&self) -> Option<&CodeSnippet> {
        self.snippets.latest()
    }

    pub fn clear_snippets(&mut self) {
        self.snippets.clear();
    }

    pub fn snippets(&self) -> &SnippetStore {
        &self.snippets
    }

    pub fn iteration_count(&self) -> u64 {
        self.snippets.iteration_count()
    }

    /// Everything a runtime is constructed from. Snippets stay here.
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            name: self.name.clone(),
            model: self.model.clone(),
            tools: self.tools.clone(),
            prompt: self.prompt.clone(),
            max_iterations: self.max_iterations,
            cache_enabled: self.cache_enabled,
            options: self.options.clone(),
        }
    }

    pub fn spawn_runtime(
        &self,
        factory: &dyn RuntimeFactory,
    ) -> anyhow::Result<Box<dyn AgentRuntime>> {
        info!(
            agent = %self.name,
            model = %self.model.model_id(),
            tools = self.tools.len(),
            version = %self.options.version,
            "Spawning agent runtime"
        );
        factory.build(self.runtime_config())
    }
}

impl Agent for CoderAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Generates, debugs and reviews code for assigned tasks"
    }

    fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    fn tools(&self) -> &[SharedTool] {
        &self.tools
    }
}

pub struct CoderAgentBuilder {
    name: String,
    model: Arc<dyn AiProvider>,
    tools: Vec<SharedTool>,
    template: PromptTemplate,
    prompt: Option<Prompt>,
    max_iterations: u32,
    cache_enabled: bool,
    options: RuntimeOptions,
}

impl CoderAgentBuilder {
    fn new(name: impl Into<String>, model: Arc<dyn AiProvider>) -> Self {
        Self {
            name: name.into(),
            model,
            tools: Vec::new(),
            template: PromptTemplate::new(CODER_TEMPLATE),
            prompt: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            cache_enabled: true,
            options: RuntimeOptions::default(),
        }
    }

    pub fn tools(mut self, tools: Vec<SharedTool>) -> Self {
        self.tools = tools;
        self
    }

    pub fn tool(mut self, tool: SharedTool) -> Self {
        self.tools.push(tool);
        self
    }

    /// Replaces the built-in template. Must contain a `{tools}` slot if any
    /// tools are configured.
    pub fn template(mut self, template: impl Into<PromptTemplate>) -> Self {
        self.template = template.into();
        self
    }

    /// Uses `prompt` verbatim instead of rendering the template. An empty
    /// text prompt counts as no prompt.
    pub fn prompt(mut self, prompt: impl Into<Prompt>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn cache_enabled(mut self, cache_enabled: bool) -> Self {
        self.cache_enabled = cache_enabled;
        self
    }

    pub fn response_format(mut self, response_format: ResponseFormat) -> Self {
        self.options.response_format = Some(response_format);
        self
    }

    pub fn checkpointer(mut self, checkpointer: Arc<dyn CheckpointSaver>) -> Self {
        self.options.checkpointer = Some(checkpointer);
        self
    }

    pub fn store(mut self, store: Arc<dyn StateStore>) -> Self {
        self.options.store = Some(store);
        self
    }

    pub fn interrupt_before(mut self, nodes: Vec<String>) -> Self {
        self.options.interrupt_before = nodes;
        self
    }

    pub fn interrupt_after(mut self, nodes: Vec<String>) -> Self {
        self.options.interrupt_after = nodes;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.options.debug = debug;
        self
    }

    pub fn version(mut self, version: GraphVersion) -> Self {
        self.options.version = version;
        self
    }

    /// Overlays file-backed settings on top of whatever was set so far.
    pub fn settings(mut self, settings: &CoderSettings) -> Self {
        self.max_iterations = settings.max_iterations;
        self.cache_enabled = settings.cache_enabled;
        self.options.debug = settings.debug;
        self.options.version = settings.version;
        self.options.interrupt_before = settings.interrupt_before.clone();
        self.options.interrupt_after = settings.interrupt_after.clone();
        self
    }

    pub fn build(self) -> Result<CoderAgent, PromptError> {
        let prompt = match self.prompt {
            Some(Prompt::Text(text)) if text.is_empty() => None,
            other => other,
        };

        let prompt = match prompt {
            Some(prompt) => prompt,
            None => {
                let directory = render_tool_directory(&self.tools);
                Prompt::Text(self.template.render_tools(&directory)?)
            }
        };
        debug!(agent = %self.name, tools = self.tools.len(), prompt = ?prompt, "Built coder agent");

        Ok(CoderAgent {
            name: self.name,
            model: self.model,
            tools: self.tools,
            template: self.template,
            prompt,
            max_iterations: self.max_iterations,
            cache_enabled: self.cache_enabled,
            options: self.options,
            snippets: SnippetStore::new(),
        })
    }
}
