use crate::prompt::Prompt;
use crate::tools::SharedTool;

/// A configured agent, ready to be handed to a runtime.
pub trait Agent: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    /// The instructions the runtime should apply on every model call.
    fn prompt(&self) -> &Prompt;

    fn tools(&self) -> &[SharedTool];
}
