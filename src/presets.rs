//! Agent presets: which tools an agent gets, how the console greets the
//! user, and which prompts the examples mode runs.

use crate::tools::BuiltinTool;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// Addition only.
    Math,
    /// Addition and web search.
    Enhanced,
    /// Addition, web search and weather.
    Weather,
    /// Addition, multiplication and web search.
    Gemma,
}

impl Default for Preset {
    fn default() -> Self {
        Self::Weather
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Math => write!(f, "math"),
            Self::Enhanced => write!(f, "enhanced"),
            Self::Weather => write!(f, "weather"),
            Self::Gemma => write!(f, "gemma"),
        }
    }
}

impl Preset {
    /// Tools in registration order.
    pub fn tools(&self) -> &'static [BuiltinTool] {
        match self {
            Self::Math => &[BuiltinTool::AddNumbers],
            Self::Enhanced => &[BuiltinTool::AddNumbers, BuiltinTool::WebSearch],
            Self::Weather => &[
                BuiltinTool::AddNumbers,
                BuiltinTool::WebSearch,
                BuiltinTool::Weather,
            ],
            Self::Gemma => &[
                BuiltinTool::AddNumbers,
                BuiltinTool::MultiplyNumbers,
                BuiltinTool::WebSearch,
            ],
        }
    }

    /// Model this preset was tuned for, used when no model is configured.
    pub fn default_model(&self) -> Option<&'static str> {
        match self {
            Self::Gemma => Some("ollama/gemma3n:latest"),
            Self::Math | Self::Enhanced | Self::Weather => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Math => "Simple Math Agent",
            Self::Enhanced => "Enhanced Agent",
            Self::Weather => "Weather Enhanced Agent",
            Self::Gemma => "Gemma Agent",
        }
    }

    /// Input prompt shown in interactive mode.
    pub fn input_prompt(&self) -> &'static str {
        match self {
            Self::Math => "Ask me to add numbers (or type 'quit' to exit): ",
            Self::Enhanced => "Ask me anything - math or web search (or type 'quit' to exit): ",
            Self::Weather => {
                "Ask me anything - math, weather, or web search (or type 'quit' to exit): "
            }
            Self::Gemma => {
                "Ask me anything - math or web search (or type 'quit' to exit): "
            }
        }
    }

    /// Width of the separator rules printed around results.
    pub fn rule_width(&self) -> usize {
        match self {
            Self::Math => 30,
            Self::Enhanced => 40,
            Self::Weather | Self::Gemma => 50,
        }
    }

    /// Fixed prompts for the examples mode.
    pub fn examples(&self) -> &'static [&'static str] {
        match self {
            Self::Math => &[
                "What is 5 + 3?",
                "Can you add 10.5 and 7.3?",
                "Calculate the sum of 100 and 200",
                "Add these numbers: 42 and 58",
                "What's 15.7 plus 8.9?",
                "I need to add 1234 and 5678",
            ],
            Self::Enhanced => &[
                "What is the weather in London today?",
                "What is 2 + 3?",
                "Who is Albert Einstein?",
            ],
            Self::Weather => &[
                "What is the weather in London today?",
                "How's the weather in New York?",
                "Tell me about the weather in Tokyo",
                "What's 15 + 25?",
                "Who is Albert Einstein?",
            ],
            Self::Gemma => &[
                "What is 15 + 27?",
                "What is the current weather in New York?",
            ],
        }
    }
}

/// One-line summary of a builtin tool for the banner.
pub fn tool_blurb(tool: BuiltinTool) -> &'static str {
    match tool {
        BuiltinTool::AddNumbers => "adds two numbers",
        BuiltinTool::MultiplyNumbers => "multiplies two numbers",
        BuiltinTool::WebSearch => "searches the web for information",
        BuiltinTool::Weather => "gets real-time weather for any city",
    }
}
