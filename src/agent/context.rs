//! Message context builder for an agent run.

use crate::types::*;

/// Sent once the step budget is spent, with tools withdrawn.
const FINAL_ANSWER_REQUEST: &str = "You have used all available tool steps. Using the tool results above, give your final answer to the original task now.";

/// Opening transcript for a task: system prompt then the user's text.
pub fn build_messages(system_prompt: &str, task: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt),
        ChatMessage::user(task.trim()),
    ]
}

/// Append one round of tool calls and their results.
pub fn push_tool_round(
    messages: &mut Vec<ChatMessage>,
    content: Option<&str>,
    calls: &[ToolCall],
    results: &[ToolResult],
) {
    messages.push(ChatMessage::assistant(
        content.unwrap_or_default(),
        calls.to_vec(),
    ));
    for result in results {
        messages.push(ChatMessage::tool(&result.tool_call_id, &result.output));
    }
}

/// Closing request used when the step budget runs out.
pub fn final_answer_request() -> ChatMessage {
    ChatMessage::user(FINAL_ANSWER_REQUEST)
}
