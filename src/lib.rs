//! agent-tools: tool-calling agents for a local LLM.
//!
//! A small runtime that hands a fixed set of tools (arithmetic, web search,
//! weather) to a model served over an OpenAI-compatible API, and drives the
//! resulting agent from the console.

pub mod agent;
pub mod config;
pub mod llm;
pub mod presets;
pub mod runner;
pub mod tools;
pub mod types;
