use crate::prompt::PromptError;

/// Name of the one slot the coder templates expose.
pub const TOOLS_SLOT: &str = "tools";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(String),
}

/// A prompt template with `{name}` substitution slots. `{{` and `}}` produce
/// literal braces.
///
/// The template is parsed eagerly so malformed braces are reported when the
/// template is rendered, not when it is handed to a runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    source: String,
}

impl PromptTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// True when the template contains a `{name}` slot.
    pub fn has_slot(&self, name: &str) -> Result<bool, PromptError> {
        Ok(self
            .parse()?
            .iter()
            .any(|segment| matches!(segment, Segment::Slot(slot) if slot == name)))
    }

    /// Substitutes every slot from `values`. A slot with no value is an
    /// error, unused values are ignored.
    pub fn format(&self, values: &[(&str, &str)]) -> Result<String, PromptError> {
        let mut out = String::with_capacity(self.source.len());
        for segment in self.parse()? {
            match segment {
                Segment::Literal(text) => out.push_str(&text),
                Segment::Slot(name) => {
                    let value = values
                        .iter()
                        .find(|(key, _)| *key == name)
                        .map(|(_, value)| *value)
                        .ok_or(PromptError::UnknownSlot { name })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }

    /// Fills the `{tools}` slot with a rendered tool directory.
    ///
    /// An empty directory is still substituted so no raw placeholder reaches
    /// the model. A non-empty directory requires the slot to exist.
    pub fn render_tools(&self, directory: &str) -> Result<String, PromptError> {
        if !directory.is_empty() && !self.has_slot(TOOLS_SLOT)? {
            return Err(PromptError::MissingSlot {
                name: TOOLS_SLOT.to_string(),
            });
        }
        self.format(&[(TOOLS_SLOT, directory)])
    }

    fn parse(&self) -> Result<Vec<Segment>, PromptError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = self.source.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(PromptError::UnbalancedBrace { offset }),
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        if c == '{' {
                            return Err(PromptError::UnbalancedBrace { offset });
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(PromptError::UnbalancedBrace { offset });
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Slot(name));
                }
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(segments)
    }
}

impl From<&str> for PromptTemplate {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for PromptTemplate {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_keeps_raw_template() {
        let template = PromptTemplate::from("Use {{braces}} with {tools}");
        assert_eq!(template.source(), "Use {{braces}} with {tools}");
        assert_eq!(template.render_tools("").unwrap(), "Use {braces} with ");
        assert_eq!(template.source(), "Use {{braces}} with {tools}");
    }

    #[test]
    fn test_format_substitutes_slot() {
        let template = PromptTemplate::new("Tools:\n{tools}\nEnd");
        let rendered = template.format(&[("tools", "- a: b")]).unwrap();
        assert_eq!(rendered, "Tools:\n- a: b\nEnd");
    }

    #[test]
    fn test_escaped_braces_are_literal() {
        let template = PromptTemplate::new("fn main() {{ }} {tools}");
        let rendered = template.format(&[("tools", "x")]).unwrap();
        assert_eq!(rendered, "fn main() { } x");
    }

    #[test]
    fn test_unknown_slot_fails() {
        let template = PromptTemplate::new("{tools} and {memory}");
        let err = template.format(&[("tools", "x")]).unwrap_err();
        assert!(matches!(err, PromptError::UnknownSlot { name } if name == "memory"));
    }

    #[test]
    fn test_unbalanced_braces_fail() {
        let err = PromptTemplate::new("oops {tools").format(&[]).unwrap_err();
        assert!(matches!(err, PromptError::UnbalancedBrace { offset: 5 }));

        let err = PromptTemplate::new("oops }").format(&[]).unwrap_err();
        assert!(matches!(err, PromptError::UnbalancedBrace { offset: 5 }));
    }

    #[test]
    fn test_render_tools_requires_slot_when_tools_present() {
        let template = PromptTemplate::new("No slot here");
        let err = template.render_tools("- search: looks things up").unwrap_err();
        assert!(matches!(err, PromptError::MissingSlot { name } if name == "tools"));
    }

    #[test]
    fn test_render_tools_empty_directory_clears_slot() {
        let template = PromptTemplate::new("Available tools:\n{tools}\n");
        let rendered = template.render_tools("").unwrap();
        assert_eq!(rendered, "Available tools:\n\n");
        assert!(!rendered.contains("{tools}"));
    }

    #[test]
    fn test_render_tools_empty_directory_without_slot() {
        let template = PromptTemplate::new("Just instructions");
        assert_eq!(template.render_tools("").unwrap(), "Just instructions");
    }
}
