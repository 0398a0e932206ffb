pub mod template;

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::ai::types::Message;

pub use template::PromptTemplate;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    #[error("template has no '{{{name}}}' slot")]
    MissingSlot { name: String },

    #[error("no value supplied for template slot '{{{name}}}'")]
    UnknownSlot { name: String },

    #[error("unbalanced brace at byte {offset}")]
    UnbalancedBrace { offset: usize },
}

/// Builds the model input from the conversation so far.
pub type PromptFn = Arc<dyn Fn(&[Message]) -> Vec<Message> + Send + Sync>;

/// A composed prompt pipeline. Unlike [`PromptFn`] a runnable may fail.
pub trait PromptRunnable: Send + Sync {
    fn name(&self) -> &str;
    fn invoke(&self, messages: &[Message]) -> anyhow::Result<Vec<Message>>;
}

/// The system-level instructions handed to an agent runtime.
///
/// Only `Text` takes part in tool directory re-rendering. The other three
/// cases are opaque and passed through untouched.
#[derive(Clone)]
pub enum Prompt {
    Text(String),
    Message(Message),
    Callable(PromptFn),
    Runnable(Arc<dyn PromptRunnable>),
}

impl Prompt {
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&[Message]) -> Vec<Message> + Send + Sync + 'static,
    {
        Self::Callable(Arc::new(f))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Produces the messages a model call should see. Text and message
    /// prompts are prepended as a system message; callables and runnables
    /// own the whole transformation.
    pub fn apply(&self, messages: &[Message]) -> anyhow::Result<Vec<Message>> {
        let system = match self {
            Self::Text(text) => Message::system(text.clone()),
            Self::Message(message) => message.clone(),
            Self::Callable(f) => return Ok(f(messages)),
            Self::Runnable(runnable) => return runnable.invoke(messages),
        };

        let mut out = Vec::with_capacity(messages.len() + 1);
        out.push(system);
        out.extend(messages.iter().cloned());
        Ok(out)
    }
}

impl fmt::Debug for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Message(message) => f.debug_tuple("Message").field(message).finish(),
            Self::Callable(_) => f.write_str("Callable(..)"),
            Self::Runnable(runnable) => f.debug_tuple("Runnable").field(&runnable.name()).finish(),
        }
    }
}

impl From<String> for Prompt {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Prompt {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Message> for Prompt {
    fn from(message: Message) -> Self {
        Self::Message(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Uppercase;

    impl PromptRunnable for Uppercase {
        fn name(&self) -> &str {
            "uppercase"
        }

        fn invoke(&self, messages: &[Message]) -> anyhow::Result<Vec<Message>> {
            Ok(messages
                .iter()
                .map(|m| Message::new(m.role, m.content.to_uppercase()))
                .collect())
        }
    }

    #[test]
    fn test_text_prompt_prepends_system_message() {
        let prompt = Prompt::from("be terse");
        let out = prompt.apply(&[Message::user("hi")]).unwrap();
        assert_eq!(out, vec![Message::system("be terse"), Message::user("hi")]);
    }

    #[test]
    fn test_message_prompt_prepends_as_is() {
        let prompt = Prompt::from(Message::system("custom"));
        let out = prompt.apply(&[]).unwrap();
        assert_eq!(out, vec![Message::system("custom")]);
        assert!(prompt.as_text().is_none());
    }

    #[test]
    fn test_callable_prompt_owns_transformation() {
        let prompt = Prompt::callable(|messages| messages.iter().rev().cloned().collect());
        let out = prompt
            .apply(&[Message::user("a"), Message::assistant("b")])
            .unwrap();
        assert_eq!(out, vec![Message::assistant("b"), Message::user("a")]);
    }

    #[test]
    fn test_runnable_prompt_invoked() {
        let prompt = Prompt::Runnable(Arc::new(Uppercase));
        let out = prompt.apply(&[Message::user("hello")]).unwrap();
        assert_eq!(out, vec![Message::user("HELLO")]);
        assert_eq!(format!("{prompt:?}"), "Runnable(\"uppercase\")");
    }

    #[test]
    fn test_error_messages_name_the_slot() {
        let err = PromptError::MissingSlot {
            name: "tools".to_string(),
        };
        assert_eq!(err.to_string(), "template has no '{tools}' slot");
    }
}
