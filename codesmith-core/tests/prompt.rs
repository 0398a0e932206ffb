use std::sync::Arc;

use codesmith_core::{
    ai::types::Message,
    prompt::PromptRunnable,
    tools::{SharedTool, ToolSpec},
    Agent, CoderAgent, Prompt, PromptError,
};


struct PassThrough;

impl PromptRunnable for PassThrough {
    fn name(&self) -> &str {
        "pass_through"
    }

    fn invoke(&self, messages: &[Message]) -> anyhow::Result<Vec<Message>> {
        Ok(messages.to_vec())
    }
}

fn search_tool() -> SharedTool {
    ToolSpec::shared("search", "looks things up")
}

#[test]
fn test_rendered_prompt_lists_tools() {
    let fixture = fixture::Fixture::new();
    let agent = CoderAgent::builder("coder", fixture.model())
        .tools(vec![search_tool()])
        .build()
        .unwrap();

    let prompt = agent.prompt().as_text().unwrap();
    assert!(prompt.lines().any(|l| l == "- search: looks things up"));
    assert!(!prompt.contains("{tools}"));
}

#[test]
fn test_no_tools_leaves_no_placeholder_or_bullets() {
    let fixture = fixture::Fixture::new();
    let agent = CoderAgent::builder("coder", fixture.model())
        .template("Instructions.\nAvailable tools:\n{tools}\n")
        .build()
        .unwrap();

    let prompt = agent.prompt().as_text().unwrap();
    assert!(!prompt.contains("{tools}"));
    assert!(!prompt.lines().any(|l| l.starts_with("- ")));
}

#[test]
fn test_template_without_slot_fails_when_tools_present() {
    let fixture = fixture::Fixture::new();
    let result = CoderAgent::builder("coder", fixture.model())
        .template("No tool listing in here")
        .tools(vec![search_tool()])
        .build();

    assert!(matches!(
        result,
        Err(PromptError::MissingSlot { name }) if name == "tools"
    ));
}

#[test]
fn test_add_tools_rerenders_from_template() {
    let fixture = fixture::Fixture::new();
    let mut agent = CoderAgent::builder("coder", fixture.model())
        .template("Tools:\n{tools}")
        .tools(vec![search_tool()])
        .build()
        .unwrap();

    agent
        .add_tools(vec![ToolSpec::shared("run_tests", "runs the test suite")])
        .unwrap();

    assert_eq!(agent.tools().len(), 2);
    assert_eq!(
        agent.prompt().as_text(),
        Some("Tools:\n- search: looks things up\n- run_tests: runs the test suite")
    );
}

#[test]
fn test_add_tools_replaces_custom_text_prompt() {
    let fixture = fixture::Fixture::new();
    let mut agent = CoderAgent::builder("coder", fixture.model())
        .template("Tools:\n{tools}")
        .prompt("hand written")
        .build()
        .unwrap();
    assert_eq!(agent.prompt().as_text(), Some("hand written"));

    agent.add_tools(vec![search_tool()]).unwrap();
    assert_eq!(
        agent.prompt().as_text(),
        Some("Tools:\n- search: looks things up")
    );
}

#[test]
fn test_add_tools_leaves_non_text_prompts_untouched() {
    let fixture = fixture::Fixture::new();
    let prompts = vec![
        Prompt::from(Message::system("fixed instructions")),
        Prompt::callable(|messages| messages.to_vec()),
        Prompt::Runnable(Arc::new(PassThrough)),
    ];

    for prompt in prompts {
        let mut agent = CoderAgent::builder("coder", fixture.model())
            .prompt(prompt)
            .build()
            .unwrap();

        let before = format!("{:?}", agent.prompt());
        agent.add_tools(vec![search_tool()]).unwrap();

        assert_eq!(agent.tools().len(), 1);
        assert!(!agent.prompt().is_text());
        assert_eq!(format!("{:?}", agent.prompt()), before);
    }
}

#[test]
fn test_add_tools_missing_slot_propagates() {
    let fixture = fixture::Fixture::new();
    let mut agent = CoderAgent::builder("coder", fixture.model())
        .template("Static instructions")
        .build()
        .unwrap();
    assert_eq!(agent.prompt().as_text(), Some("Static instructions"));

    let err = agent.add_tools(vec![search_tool()]).unwrap_err();
    assert!(matches!(err, PromptError::MissingSlot { .. }));
    assert_eq!(agent.tools().len(), 1);
    assert_eq!(agent.prompt().as_text(), Some("Static instructions"));
}

#[test]
fn test_message_prompt_passed_through() {
    let fixture = fixture::Fixture::new();
    let agent = CoderAgent::builder("coder", fixture.model())
        .tools(vec![search_tool()])
        .prompt(Message::system("fixed instructions"))
        .build()
        .unwrap();

    let Prompt::Message(message) = agent.prompt() else {
        panic!("expected message prompt, got {:?}", agent.prompt());
    };
    assert_eq!(message.content, "fixed instructions");
}
