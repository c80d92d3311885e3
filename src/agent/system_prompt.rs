//! System prompt builder.
//!
//! Layers (in order):
//! 1. Core role (a tool-using assistant)
//! 2. Available tools with their inputs
//! 3. Answering rules

use crate::tools::ToolDescriptor;
use tracing::debug;

/// Core role description.
const CORE_ROLE: &str = r#"
# Role

You are a helpful assistant that solves the user's task by calling tools.
Call a tool whenever it can produce or verify part of the answer instead of
guessing. Use the exact tool names and provide every listed input.
"#;

/// Rules for the final reply.
const ANSWER_RULES: &str = r#"
# Answering

- When you have enough information, reply with the final answer as plain text and call no more tools.
- Base the answer on the tool results you received. Quote numbers exactly.
- If a tool reports an error, say so briefly instead of inventing data.
- Keep the answer short.
"#;

/// Build the complete system prompt for a run.
pub fn build_system_prompt<'a>(tools: impl IntoIterator<Item = &'a ToolDescriptor>) -> String {
    let mut prompt = String::with_capacity(2048);

    prompt.push_str(CORE_ROLE);
    prompt.push('\n');

    prompt.push_str("# Tools\n\n");
    let mut any = false;
    for tool in tools {
        any = true;
        prompt.push_str(&format!("## {}\n{}\n", tool.name, tool.description));
        for input in &tool.inputs {
            prompt.push_str(&format!(
                "- `{}` ({}): {}\n",
                input.name, input.kind, input.description
            ));
        }
        prompt.push_str(&format!("Returns: {}\n\n", tool.output_type));
    }
    if !any {
        prompt.push_str("No tools are available. Answer directly.\n\n");
    }

    prompt.push_str(ANSWER_RULES);

    debug!("System prompt: {} chars", prompt.len());
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{AddNumbersTool, Tool};

    #[test]
    fn lists_tools_and_inputs() {
        let add = AddNumbersTool::new();
        let prompt = build_system_prompt([add.descriptor()]);

        assert!(prompt.contains("## add_numbers"));
        assert!(prompt.contains("- `a` (number): The first number to add"));
        assert!(prompt.contains("Returns: number"));
        assert!(!prompt.contains("No tools are available"));
    }

    #[test]
    fn notes_missing_tools() {
        let prompt = build_system_prompt(std::iter::empty());
        assert!(prompt.contains("No tools are available"));
    }
}
