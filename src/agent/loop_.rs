//! Bounded tool-calling loop: Think → Act → Observe.
//!
//! For each step the agent:
//! 1. Calls inference with the transcript and tool definitions
//! 2. Returns the text if the model called no tools
//! 3. Otherwise executes each call in order and appends the results
//!
//! When the step budget is spent, one last call without tools asks for
//! the final answer.

use crate::agent::{context, system_prompt, AgentError, Orchestrator};
use crate::config::AgentConfig;
use crate::llm::InferenceClient;
use crate::tools::{ToolDefinition, ToolRegistry};
use crate::types::*;
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Agent that answers prompts with a local model and a fixed tool set.
pub struct ToolCallingAgent {
    inference: InferenceClient,
    tools: ToolRegistry,
    tool_defs: Vec<ToolDefinition>,
    system_prompt: String,
    model: String,
    max_steps: u32,
    max_tokens: u32,
    temperature: f64,
}

impl ToolCallingAgent {
    pub fn new(config: &AgentConfig, inference: InferenceClient, tools: ToolRegistry) -> Self {
        let tool_defs = tools.definitions();
        let system_prompt = system_prompt::build_system_prompt(tools.descriptors());

        Self {
            inference,
            tools,
            tool_defs,
            system_prompt,
            model: config.model_name().to_string(),
            max_steps: config.max_steps,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    async fn infer(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<InferenceResponse, AgentError> {
        self.inference
            .chat(&self.model, messages, tools, self.max_tokens, self.temperature)
            .await
            .map_err(AgentError::Inference)
    }
}

#[async_trait]
impl Orchestrator for ToolCallingAgent {
    async fn run(&self, task: &str) -> Result<String, AgentError> {
        let mut messages = context::build_messages(&self.system_prompt, task);

        for step in 1..=self.max_steps {
            let response = self.infer(&messages, &self.tool_defs).await?;
            debug!(
                "[Step {}] tokens: {}/{}",
                step, response.usage.prompt_tokens, response.usage.completion_tokens
            );

            if response.tool_calls.is_empty() {
                return response
                    .content
                    .map(|c| c.trim().to_string())
                    .ok_or(AgentError::NoAnswer { steps: step });
            }

            let mut results = Vec::with_capacity(response.tool_calls.len());
            for tc in &response.tool_calls {
                info!("[Step {}] Tool: {}({})", step, tc.name, tc.arguments);

                let mut result = self.tools.execute(&tc.name, &tc.arguments).await;
                result.tool_call_id = tc.id.clone();

                if result.success {
                    info!("[Step {}] Tool result: {} chars", step, result.output.len());
                } else {
                    warn!("[Step {}] Tool error: {}", step, result.output);
                }
                results.push(result);
            }

            context::push_tool_round(
                &mut messages,
                response.content.as_deref(),
                &response.tool_calls,
                &results,
            );
        }

        warn!(
            "Reached max steps ({}) without a final answer, asking for one",
            self.max_steps
        );
        messages.push(context::final_answer_request());

        let response = self.infer(&messages, &[]).await?;
        response
            .content
            .map(|c| c.trim().to_string())
            .ok_or(AgentError::NoAnswer {
                steps: self.max_steps,
            })
    }
}
