//! agent-tools: tool-calling agents for a local LLM.
//!
//! Usage:
//!   agent-tools                       Interactive loop (weather preset)
//!   agent-tools examples              Run the preset's example prompts once
//!   agent-tools --preset math         Pick a different tool set

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::io::Write;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use agent_tools::agent::ToolCallingAgent;
use agent_tools::config::{self, AgentConfig};
use agent_tools::llm::InferenceClient;
use agent_tools::presets::Preset;
use agent_tools::runner::{self, Runner};
use agent_tools::tools::ToolRegistry;
use agent_tools::types::RunMode;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "agent-tools")]
#[command(version)]
#[command(about = "Tool-calling agents for a local LLM")]
struct Cli {
    /// interactive (default) or examples.
    #[arg(value_enum, default_value_t = RunMode::Interactive)]
    mode: RunMode,

    /// Tool set and example prompts to use.
    #[arg(long, value_enum, default_value_t = Preset::Weather)]
    preset: Preset,

    /// Path to the config file.
    #[arg(long)]
    config: Option<String>,

    /// Model id, e.g. ollama/qwen2:7b (overrides config).
    #[arg(long)]
    model: Option<String>,

    /// Model server base URL (overrides config).
    #[arg(long)]
    api_base: Option<String>,

    /// Log level (debug, info, warn, error). Overrides config.
    #[arg(long)]
    log_level: Option<String>,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .as_deref()
        .map(config::resolve_path)
        .unwrap_or_else(config::default_config_path);
    let mut cfg = config::load_config(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    apply_overrides(&mut cfg, &cli);
    cfg.fill_model(cli.preset.default_model());

    // Initialize logging
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let weather_source = cfg.weather_source(config::weather_key_from_env());
    info!(
        "Preset {} with model {} at {} (weather: {})",
        cli.preset,
        cfg.model_name(),
        cfg.api_base,
        if weather_source.is_demo() { "demo" } else { "live" }
    );

    let tools = ToolRegistry::from_builtins(cli.preset.tools(), &cfg, &weather_source)?;
    let inference = InferenceClient::new(&cfg.api_base, &cfg.api_key);
    let agent = ToolCallingAgent::new(&cfg, inference, tools);

    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => ctrl_c_cancel.cancel(),
            Err(e) => warn!("Failed to listen for Ctrl+C: {}", e),
        }
    });

    let mut stdout = std::io::stdout();
    let mut runner = Runner::new(&agent, cli.preset);

    match cli.mode {
        RunMode::Interactive => {
            runner::print_banner(&mut stdout, cli.preset, weather_source.is_demo())?;
            let stdin = BufReader::new(tokio::io::stdin());
            runner.run_interactive(stdin, &mut stdout, &cancel).await?;
            info!("Runner {} after {} prompt(s)", runner.state(), runner.calls());
            // The blocking stdin reader would hold the runtime open until the next newline.
            stdout.flush()?;
            std::process::exit(0);
        }
        RunMode::Examples => {
            runner.run_examples(&mut stdout, &cancel).await?;
            println!(
                "\n{} To run in interactive mode, use: agent-tools interactive --preset {}",
                "💡".yellow(),
                cli.preset
            );
            info!("Runner {} after {} prompt(s)", runner.state(), runner.calls());
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn apply_overrides(cfg: &mut AgentConfig, cli: &Cli) {
    if let Some(model) = &cli.model {
        cfg.model_id = Some(model.clone());
    }
    if let Some(api_base) = &cli.api_base {
        cfg.api_base = api_base.clone();
    }
    if let Some(level) = &cli.log_level {
        cfg.log_level = level.clone();
    }
}
