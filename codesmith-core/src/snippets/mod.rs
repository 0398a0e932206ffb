//! In-memory record of the code a coder agent produced during a session.
//!
//! Snippets live only as long as the owning agent. Nothing is persisted or
//! evicted; the store grows until it is cleared.

use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSnippet {
    language: String,
    code: String,
    description: String,
    timestamp: String,
}

impl CodeSnippet {
    fn new(language: String, code: String, description: String) -> Self {
        Self {
            language,
            code,
            description,
            timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Micros, false),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// ISO-8601 creation time in local time with offset.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// Ordered, unbounded snippet list plus the iteration counter that advances
/// with every save.
#[derive(Debug, Default)]
pub struct SnippetStore {
    snippets: Vec<CodeSnippet>,
    iteration_count: u64,
}

impl SnippetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(
        &mut self,
        language: impl Into<String>,
        code: impl Into<String>,
        description: impl Into<String>,
    ) {
        let snippet = CodeSnippet::new(language.into(), code.into(), description.into());
        debug!(
            language = %snippet.language,
            bytes = snippet.code.len(),
            "Saving code snippet"
        );
        self.snippets.push(snippet);
        self.iteration_count += 1;
    }

    /// Snippets in insertion order. With a language, only exact
    /// (case-sensitive) matches, including the empty language.
    pub fn list(&self, language: Option<&str>) -> Vec<&CodeSnippet> {
        match language {
            Some(language) => self
                .snippets
                .iter()
                .filter(|s| s.language == language)
                .collect(),
            None => self.snippets.iter().collect(),
        }
    }

    pub fn latest(&self) -> Option<&CodeSnippet> {
        self.snippets.last()
    }

    pub fn clear(&mut self) {
        debug!(dropped = self.snippets.len(), "Clearing code snippets");
        self.snippets.clear();
        self.iteration_count = 0;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CodeSnippet> {
        self.snippets.iter()
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    pub fn iteration_count(&self) -> u64 {
        self.iteration_count
    }
}

impl<'a> IntoIterator for &'a SnippetStore {
    type Item = &'a CodeSnippet;
    type IntoIter = std::slice::Iter<'a, CodeSnippet>;

    fn into_iter(self) -> Self::IntoIter {
        self.snippets.iter()
    }
}
