//! Console runners: the interactive prompt loop and the examples list.
//!
//! The interactive loop is a two-state machine. It stays `Running` until
//! it reads an exit keyword (`quit`, `exit`, `q`, any casing), reaches
//! end of input, or the cancellation token fires (Ctrl-C). Blank lines are
//! ignored. A failed agent run is reported and the loop carries on.

use crate::agent::{AgentError, Orchestrator};
use crate::presets::{tool_blurb, Preset};
use crate::types::RunnerState;
use colored::Colorize;
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

const EXIT_KEYWORDS: &[&str] = &["quit", "exit", "q"];

/// What one line of input asks the runner to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Exit,
    Skip,
    Prompt(String),
}

/// Classify a line read from the user.
pub fn classify_input(line: &str) -> InputAction {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        InputAction::Skip
    } else if EXIT_KEYWORDS
        .iter()
        .any(|k| trimmed.eq_ignore_ascii_case(k))
    {
        InputAction::Exit
    } else {
        InputAction::Prompt(trimmed.to_string())
    }
}

/// Print the startup banner for a preset.
pub fn print_banner<W: Write>(out: &mut W, preset: Preset, weather_demo: bool) -> io::Result<()> {
    writeln!(out, "🤖 Creating {}...", preset.title())?;
    writeln!(out, "{}", "✅ Agent created successfully!".green())?;
    writeln!(out, "🔧 Available tools:")?;
    for tool in preset.tools() {
        writeln!(out, "   • {} ({})", tool.name().bold(), tool_blurb(*tool))?;
    }
    let width = preset.rule_width() + 20;
    writeln!(out, "\n{}", "=".repeat(width))?;

    if weather_demo && preset.tools().contains(&crate::tools::BuiltinTool::Weather) {
        writeln!(
            out,
            "💡 Tip: Set OPENWEATHER_API_KEY environment variable for real-time weather data"
        )?;
        writeln!(out, "   Get a free API key from: https://openweathermap.org/api")?;
        writeln!(out, "   Example: export OPENWEATHER_API_KEY='your_api_key_here'")?;
        writeln!(out, "{}", "-".repeat(width))?;
    }
    Ok(())
}

/// Drives an orchestrator from the console.
pub struct Runner<'a> {
    agent: &'a dyn Orchestrator,
    preset: Preset,
    state: RunnerState,
    calls: usize,
}

impl<'a> Runner<'a> {
    pub fn new(agent: &'a dyn Orchestrator, preset: Preset) -> Self {
        Self {
            agent,
            preset,
            state: RunnerState::Running,
            calls: 0,
        }
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    /// Prompts forwarded to the orchestrator so far.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Read prompts from `input` until an exit keyword, end of input or
    /// cancellation.
    pub async fn run_interactive<R, W>(
        &mut self,
        input: R,
        out: &mut W,
        cancel: &CancellationToken,
    ) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        let rule = "-".repeat(self.preset.rule_width());

        while self.state == RunnerState::Running {
            write!(out, "\n💬 {}", self.preset.input_prompt())?;
            out.flush()?;

            let line = tokio::select! {
                line = lines.next_line() => line,
                _ = cancel.cancelled() => {
                    self.interrupt(out)?;
                    break;
                }
            };

            let line = match line {
                Ok(Some(line)) => line,
                Ok(None) => {
                    debug!("End of input");
                    self.terminate(out, "👋 Goodbye!")?;
                    break;
                }
                Err(e) => {
                    writeln!(out, "❌ Error: {}", e)?;
                    continue;
                }
            };

            let text = match classify_input(&line) {
                InputAction::Exit => {
                    self.terminate(out, "👋 Goodbye!")?;
                    break;
                }
                InputAction::Skip => continue,
                InputAction::Prompt(text) => text,
            };

            writeln!(out, "\n🤔 Processing: {}", text)?;
            writeln!(out, "{}", rule)?;

            match self.ask(&text, cancel).await {
                None => {
                    self.interrupt(out)?;
                    break;
                }
                Some(Ok(answer)) => {
                    writeln!(out, "{}", rule)?;
                    writeln!(out, "✅ Result: {}", answer)?;
                }
                Some(Err(e)) => writeln!(out, "❌ Error: {}", e)?,
            }
        }
        Ok(())
    }

    /// Run every example prompt of the preset once, then stop.
    pub async fn run_examples<W: Write>(
        &mut self,
        out: &mut W,
        cancel: &CancellationToken,
    ) -> io::Result<()> {
        let rule = "-".repeat(self.preset.rule_width().min(40));

        writeln!(out, "🚀 Starting {} Examples", self.preset.title())?;
        writeln!(out, "{}", "=".repeat(50))?;

        for (i, query) in self.preset.examples().iter().enumerate() {
            writeln!(out, "\n📝 Example {}: {}", i + 1, query)?;
            writeln!(out, "{}", rule)?;

            match self.ask(query, cancel).await {
                None => {
                    self.interrupt(out)?;
                    return Ok(());
                }
                Some(Ok(answer)) => writeln!(out, "✅ Answer: {}", answer)?,
                Some(Err(e)) => writeln!(out, "❌ Error: {}", e)?,
            }
            writeln!(out, "{}", rule)?;
        }

        writeln!(out, "\n🎉 All examples completed!")?;
        self.state = RunnerState::Terminated;
        Ok(())
    }

    /// Forward one prompt. `None` means the run was cancelled.
    async fn ask(
        &mut self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Option<Result<String, AgentError>> {
        self.calls += 1;
        let agent = self.agent;

        let outcome = tokio::select! {
            result = agent.run(text) => Some(result),
            _ = cancel.cancelled() => None,
        };

        if let Some(Err(e)) = &outcome {
            error!("Agent run failed: {}", e);
        }
        outcome
    }

    fn interrupt<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.terminate(out, "\n👋 Goodbye!")
    }

    fn terminate<W: Write>(&mut self, out: &mut W, farewell: &str) -> io::Result<()> {
        writeln!(out, "{}", farewell)?;
        self.state = RunnerState::Terminated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_keywords_any_case() {
        for word in ["quit", "QUIT", "Exit", "q", "Q", "  quit  "] {
            assert_eq!(classify_input(word), InputAction::Exit, "{word:?}");
        }
    }

    #[test]
    fn blank_lines_are_skipped() {
        for line in ["", "   ", "\t\n"] {
            assert_eq!(classify_input(line), InputAction::Skip);
        }
    }

    #[test]
    fn other_text_is_a_prompt() {
        assert_eq!(
            classify_input("  What is 5 + 3?  "),
            InputAction::Prompt("What is 5 + 3?".into())
        );
        assert_eq!(
            classify_input("quit now"),
            InputAction::Prompt("quit now".into())
        );
    }

    #[test]
    fn banner_lists_tools_and_demo_tip() {
        let mut out = Vec::new();
        print_banner(&mut out, Preset::Weather, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Weather Enhanced Agent"));
        assert!(text.contains("get_weather"));
        assert!(text.contains("OPENWEATHER_API_KEY"));

        let mut out = Vec::new();
        print_banner(&mut out, Preset::Math, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("add_numbers"));
        assert!(!text.contains("OPENWEATHER_API_KEY"));
    }
}
