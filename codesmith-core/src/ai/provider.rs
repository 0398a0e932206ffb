use crate::ai::{error::AiError, types::*};

/// Opaque model handle. The coder agent never calls the model itself; it
/// only carries the handle through to whichever runtime executes the agent.
#[async_trait::async_trait]
pub trait AiProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Identifier of the model this handle talks to, e.g. for logging.
    fn model_id(&self) -> &str;

    async fn converse(&self, request: ConversationRequest)
        -> Result<ConversationResponse, AiError>;
}
