use thiserror::Error;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("Retryable error: {0}")]
    Retryable(anyhow::Error),

    #[error("Terminal error: {0}")]
    Terminal(anyhow::Error),
}

impl AiError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Retryable(_))
    }
}
