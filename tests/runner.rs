//! Console runner driven by a scripted orchestrator.

use agent_tools::agent::{AgentError, Orchestrator};
use agent_tools::presets::Preset;
use agent_tools::runner::Runner;
use agent_tools::types::RunnerState;
use async_trait::async_trait;
use std::sync::Mutex;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;

/// Records prompts and answers from a script.
#[derive(Default)]
struct ScriptedAgent {
    prompts: Mutex<Vec<String>>,
    fail_on: Option<&'static str>,
}

#[async_trait]
impl Orchestrator for ScriptedAgent {
    async fn run(&self, task: &str) -> Result<String, AgentError> {
        self.prompts.lock().unwrap().push(task.to_string());
        if self.fail_on == Some(task) {
            return Err(AgentError::NoAnswer { steps: 5 });
        }
        Ok(format!("answer to {task}"))
    }
}

/// Never finishes; lets a test cancel mid-run.
struct StuckAgent;

#[async_trait]
impl Orchestrator for StuckAgent {
    async fn run(&self, _task: &str) -> Result<String, AgentError> {
        std::future::pending().await
    }
}

async fn drive(agent: &dyn Orchestrator, input: &str) -> (RunnerState, usize, String) {
    let mut runner = Runner::new(agent, Preset::Math);
    let mut out = Vec::new();
    let cancel = CancellationToken::new();

    runner
        .run_interactive(BufReader::new(input.as_bytes()), &mut out, &cancel)
        .await
        .unwrap();

    (runner.state(), runner.calls(), String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn quit_terminates_without_calling_agent() {
    for word in ["quit", "QUIT", "Exit", "q"] {
        let agent = ScriptedAgent::default();
        let input = format!("{word}\nWhat is 1 + 1?\n");

        let (state, calls, out) = drive(&agent, &input).await;

        assert_eq!(state, RunnerState::Terminated);
        assert_eq!(calls, 0);
        assert!(agent.prompts.lock().unwrap().is_empty());
        assert!(out.contains("Goodbye!"));
    }
}

#[tokio::test]
async fn blank_lines_issue_no_call() {
    let agent = ScriptedAgent::default();

    let (state, calls, _) = drive(&agent, "\n   \n\t\nq\n").await;

    assert_eq!(state, RunnerState::Terminated);
    assert_eq!(calls, 0);
}

#[tokio::test]
async fn prompts_are_forwarded_and_printed() {
    let agent = ScriptedAgent::default();

    let (_, calls, out) = drive(&agent, "What is 5 + 3?\n\n  Add 1 and 2  \nexit\n").await;

    assert_eq!(calls, 2);
    assert_eq!(
        *agent.prompts.lock().unwrap(),
        vec!["What is 5 + 3?".to_string(), "Add 1 and 2".to_string()]
    );
    assert!(out.contains("🤔 Processing: What is 5 + 3?"));
    assert!(out.contains("✅ Result: answer to What is 5 + 3?"));
    assert!(out.contains("✅ Result: answer to Add 1 and 2"));
}

#[tokio::test]
async fn failed_run_is_reported_and_loop_continues() {
    let agent = ScriptedAgent {
        fail_on: Some("break me"),
        ..ScriptedAgent::default()
    };

    let (state, calls, out) = drive(&agent, "break me\nstill here\nquit\n").await;

    assert_eq!(state, RunnerState::Terminated);
    assert_eq!(calls, 2);
    assert!(out.contains("❌ Error: model returned no answer after 5 step(s)"));
    assert!(out.contains("✅ Result: answer to still here"));
}

#[tokio::test]
async fn end_of_input_terminates() {
    let agent = ScriptedAgent::default();

    let (state, calls, out) = drive(&agent, "What is 2 + 2?\n").await;

    assert_eq!(state, RunnerState::Terminated);
    assert_eq!(calls, 1);
    assert!(out.trim_end().ends_with("Goodbye!"));
}

#[tokio::test]
async fn interrupt_while_waiting_for_input() {
    let agent = ScriptedAgent::default();
    let (reader, _writer) = tokio::io::duplex(64);
    let mut runner = Runner::new(&agent, Preset::Weather);
    let mut out = Vec::new();
    let cancel = CancellationToken::new();
    cancel.cancel();

    runner
        .run_interactive(BufReader::new(reader), &mut out, &cancel)
        .await
        .unwrap();

    assert_eq!(runner.state(), RunnerState::Terminated);
    assert_eq!(runner.calls(), 0);
    assert!(String::from_utf8(out).unwrap().contains("Goodbye!"));
}

#[tokio::test]
async fn interrupt_while_agent_is_working() {
    let agent = StuckAgent;
    let mut runner = Runner::new(&agent, Preset::Math);
    let mut out = Vec::new();
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        trigger.cancel();
    });

    runner
        .run_interactive(BufReader::new("What is 1 + 1?\n".as_bytes()), &mut out, &cancel)
        .await
        .unwrap();

    assert_eq!(runner.state(), RunnerState::Terminated);
    assert_eq!(runner.calls(), 1);
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Goodbye!"));
    assert!(!out.contains("Result:"));
}

#[tokio::test]
async fn examples_mode_runs_each_prompt_once() {
    let agent = ScriptedAgent {
        fail_on: Some("Add these numbers: 42 and 58"),
        ..ScriptedAgent::default()
    };
    let mut runner = Runner::new(&agent, Preset::Math);
    let mut out = Vec::new();
    let cancel = CancellationToken::new();

    runner.run_examples(&mut out, &cancel).await.unwrap();

    let prompts = agent.prompts.lock().unwrap().clone();
    assert_eq!(prompts, Preset::Math.examples().to_vec());
    assert_eq!(runner.state(), RunnerState::Terminated);

    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("📝 Example 1: What is 5 + 3?"));
    assert!(out.contains("✅ Answer: answer to I need to add 1234 and 5678"));
    assert!(out.contains("❌ Error: "));
    assert!(out.contains("🎉 All examples completed!"));
}
