//! Tool-calling agent: turns a prompt into a final answer, calling tools
//! along the way.

pub mod context;
pub mod loop_;
pub mod system_prompt;

pub use loop_::ToolCallingAgent;

use async_trait::async_trait;

/// Why an agent run produced no answer.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("inference failed: {0:#}")]
    Inference(anyhow::Error),

    #[error("model returned no answer after {steps} step(s)")]
    NoAnswer { steps: u32 },
}

/// Anything that can answer a prompt, possibly by calling tools.
#[async_trait]
pub trait Orchestrator: Send + Sync {
    async fn run(&self, task: &str) -> Result<String, AgentError>;
}
