use crate::ai::{error::AiError, provider::AiProvider, types::*};
use std::sync::{Arc, Mutex};

/// Mock behavior for the mock provider
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MockBehavior {
    /// Return a fixed assistant reply
    #[default]
    Success,
    /// Reply with the given text
    Reply { text: String },
    /// Always return a retryable error
    AlwaysRetryableError,
    /// Always return a non-retryable error
    AlwaysNonRetryableError,
}

/// Mock AI provider for testing. Clones share captured state.
#[derive(Clone)]
pub struct MockProvider {
    behavior: Arc<Mutex<MockBehavior>>,
    captured_requests: Arc<Mutex<Vec<ConversationRequest>>>,
}

impl MockProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior: Arc::new(Mutex::new(behavior)),
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn get_call_count(&self) -> usize {
        self.captured_requests.lock().unwrap().len()
    }

    pub fn get_captured_requests(&self) -> Vec<ConversationRequest> {
        self.captured_requests.lock().unwrap().clone()
    }

    pub fn get_last_captured_request(&self) -> Option<ConversationRequest> {
        self.captured_requests.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl AiProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }

    async fn converse(
        &self,
        request: ConversationRequest,
    ) -> Result<ConversationResponse, AiError> {
        self.captured_requests.lock().unwrap().push(request);

        let behavior = self.behavior.lock().unwrap().clone();
        let text = match behavior {
            MockBehavior::Success => "Mock response".to_string(),
            MockBehavior::Reply { text } => text,
            MockBehavior::AlwaysRetryableError => {
                return Err(AiError::Retryable(anyhow::anyhow!(
                    "Mock retryable error (always fails)"
                )))
            }
            MockBehavior::AlwaysNonRetryableError => {
                return Err(AiError::Terminal(anyhow::anyhow!(
                    "Mock non-retryable error"
                )))
            }
        };

        Ok(ConversationResponse {
            message: Message::assistant(text),
            usage: TokenUsage::new(10, 10),
            stop_reason: StopReason::EndTurn,
        })
    }
}
