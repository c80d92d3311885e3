pub mod arithmetic;
pub mod traits;
pub mod weather;
pub mod web_search;

pub use arithmetic::{AddNumbersTool, MultiplyNumbersTool};
pub use traits::{
    ParamType, Tool, ToolArgs, ToolDefinition, ToolDescriptor, ToolError, ToolInput, ToolOutput,
};
pub use weather::WeatherTool;
pub use web_search::WebSearchTool;

use crate::config::{AgentConfig, WeatherSource};
use crate::types::ToolResult;
use anyhow::{bail, Context, Result};
use std::fmt;
use tracing::debug;

/// The closed set of tools this runtime ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinTool {
    AddNumbers,
    MultiplyNumbers,
    WebSearch,
    Weather,
}

impl BuiltinTool {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddNumbers => arithmetic::ADD_NUMBERS,
            Self::MultiplyNumbers => arithmetic::MULTIPLY_NUMBERS,
            Self::WebSearch => web_search::WEB_SEARCH,
            Self::Weather => weather::GET_WEATHER,
        }
    }
}

impl fmt::Display for BuiltinTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shared HTTP client for tool requests, bounded by the configured timeout.
pub fn http_client(config: &AgentConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.http_timeout())
        .user_agent(concat!("agent-tools/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

/// Render an error together with its sources, outermost first.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !out.contains(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = cause.source();
    }
    out
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Ordered set of tools handed to the orchestrator. Names are unique.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Fails if the name is already taken.
    pub fn register(&mut self, tool: Box<dyn Tool>) -> Result<()> {
        if self.get(tool.name()).is_some() {
            bail!("Tool '{}' is already registered", tool.name());
        }
        debug!("Registered tool {}", tool.name());
        self.tools.push(tool);
        Ok(())
    }

    /// Build a registry from builtin tools, in the given order.
    pub fn from_builtins(
        builtins: &[BuiltinTool],
        config: &AgentConfig,
        weather_source: &WeatherSource,
    ) -> Result<Self> {
        let http = http_client(config)?;
        let with_weather = builtins.contains(&BuiltinTool::Weather);

        let mut registry = Self::new();
        for builtin in builtins {
            let tool: Box<dyn Tool> = match builtin {
                BuiltinTool::AddNumbers => Box::new(AddNumbersTool::new()),
                BuiltinTool::MultiplyNumbers => Box::new(MultiplyNumbersTool::new()),
                BuiltinTool::WebSearch if with_weather => Box::new(WebSearchTool::beside_weather(
                    http.clone(),
                    &config.search_api_url,
                )),
                BuiltinTool::WebSearch => {
                    Box::new(WebSearchTool::new(http.clone(), &config.search_api_url))
                }
                BuiltinTool::Weather => Box::new(WeatherTool::new(
                    http.clone(),
                    &config.weather_api_url,
                    weather_source.clone(),
                )),
            };
            registry.register(tool)?;
        }
        Ok(registry)
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Descriptors in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter().map(|t| t.descriptor())
    }

    /// Tool definitions exposed to the inference model.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.descriptors().map(ToolDescriptor::definition).collect()
    }

    /// Validate arguments and run a tool by name.
    pub async fn execute(&self, name: &str, args: &serde_json::Value) -> ToolResult {
        let result = match self.get(name) {
            None => Err(format!("Unknown tool: {}", name)),
            Some(tool) => match ToolArgs::validate(tool.descriptor(), args) {
                Ok(args) => Ok(tool.invoke(&args).await),
                Err(e) => Err(format!("{} (tool {})", e, name)),
            },
        };

        match result {
            Ok(output) => ToolResult {
                tool_call_id: String::new(), // Set by caller
                output: output.to_string(),
                success: true,
            },
            Err(e) => ToolResult {
                tool_call_id: String::new(),
                output: format!("Error: {}", e),
                success: false,
            },
        }
    }
}
