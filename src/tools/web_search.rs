//! `web_search` tool backed by the DuckDuckGo Instant Answer API.
//!
//! The API needs no key and returns an abstract, an instant answer and a
//! list of related topics rather than full result listings. The tool folds
//! those into a few plain-text lines for the model:
//!
//! ```text
//! Summary: <Abstract>
//! Answer: <Answer>
//! Related: <topic 1>; <topic 2>; <topic 3>
//! ```
//!
//! Failures are reported as text, never as errors.

use super::traits::{ParamType, Tool, ToolArgs, ToolDescriptor, ToolInput, ToolOutput};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Canonical tool name for the web search tool.
pub const WEB_SEARCH: &str = "web_search";

/// Related topics kept in the summary.
const MAX_RELATED: usize = 3;

const DESCRIPTION: &str = "Performs a web search to find information about a topic. Use this when you need to find current information, facts, or details about something.";

const DESCRIPTION_BESIDE_WEATHER: &str = "Performs a web search to find information about a topic. Use this when you need to find current information, facts, or details about something that's not weather-related.";

/// Search failures, kept apart until rendered.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Connect, timeout, DNS or non-2xx status.
    #[error("{0}")]
    Network(String),

    /// Response body was not the expected JSON.
    #[error("{0}")]
    Decode(String),
}

impl SearchError {
    /// Text handed to the model in place of results.
    pub fn render(&self) -> String {
        match self {
            Self::Network(detail) => format!("Error performing web search: {}", detail),
            Self::Decode(detail) => format!("Unexpected error during web search: {}", detail),
        }
    }
}

/// Normalized instant-answer response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    pub summary: Option<String>,
    pub direct_answer: Option<String>,
    pub related: Vec<String>,
}

impl SearchResult {
    /// Pull `Abstract`, `Answer` and the first three `RelatedTopics[].Text`
    /// out of a provider response. Topics without text still use up a slot.
    pub fn from_response(data: &Value) -> Self {
        let related = data["RelatedTopics"]
            .as_array()
            .map(|topics| {
                topics
                    .iter()
                    .take(MAX_RELATED)
                    .filter_map(|t| non_empty_text(&t["Text"]))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            summary: non_empty_text(&data["Abstract"]),
            direct_answer: non_empty_text(&data["Answer"]),
            related,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summary.is_none() && self.direct_answer.is_none() && self.related.is_empty()
    }

    /// Newline-joined summary, or the fallback sentence naming `query`.
    pub fn render(&self, query: &str) -> String {
        let mut parts = Vec::new();

        if let Some(summary) = &self.summary {
            parts.push(format!("Summary: {}", summary));
        }
        if let Some(answer) = &self.direct_answer {
            parts.push(format!("Answer: {}", answer));
        }
        if !self.related.is_empty() {
            parts.push(format!("Related: {}", self.related.join("; ")));
        }

        if parts.is_empty() {
            return format!(
                "I searched for '{}' but couldn't find specific information. You might want to try a more specific search term.",
                query
            );
        }
        parts.join("\n")
    }
}

fn non_empty_text(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Web search over the instant-answer API.
pub struct WebSearchTool {
    descriptor: ToolDescriptor,
    http: reqwest::Client,
    endpoint: String,
}

impl WebSearchTool {
    /// `http` should carry the request timeout.
    pub fn new(http: reqwest::Client, endpoint: &str) -> Self {
        Self::with_description(http, endpoint, DESCRIPTION)
    }

    /// Variant whose description steers weather questions elsewhere.
    pub fn beside_weather(http: reqwest::Client, endpoint: &str) -> Self {
        Self::with_description(http, endpoint, DESCRIPTION_BESIDE_WEATHER)
    }

    fn with_description(http: reqwest::Client, endpoint: &str, description: &str) -> Self {
        Self {
            descriptor: ToolDescriptor {
                name: WEB_SEARCH.into(),
                description: description.into(),
                inputs: vec![ToolInput::string(
                    "query",
                    "The search query to look up on the web",
                )],
                output_type: ParamType::String,
            },
            http,
            endpoint: endpoint.to_string(),
        }
    }

    /// Run one search request.
    pub async fn search(&self, query: &str) -> Result<SearchResult, SearchError> {
        debug!("Web search: {}", query);

        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SearchError::Network(super::error_chain(&e)))?;

        let body = resp
            .text()
            .await
            .map_err(|e| SearchError::Network(super::error_chain(&e)))?;
        let data: Value =
            serde_json::from_str(&body).map_err(|e| SearchError::Decode(e.to_string()))?;

        Ok(SearchResult::from_response(&data))
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, args: &ToolArgs) -> ToolOutput {
        let query = match args.text("query") {
            Ok(q) => q,
            Err(e) => return ToolOutput::Text(format!("Error: {}", e)),
        };

        let text = match self.search(query).await {
            Ok(result) => result.render(query),
            Err(e) => e.render(),
        };
        ToolOutput::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_all_sections_in_order() {
        let data = json!({
            "Abstract": "Rust is a systems programming language.",
            "Answer": "42",
            "RelatedTopics": [
                {"Text": "Cargo - the Rust package manager"},
                {"Text": "Ferris - the Rust mascot"}
            ]
        });

        let out = SearchResult::from_response(&data).render("rust");
        assert_eq!(
            out,
            "Summary: Rust is a systems programming language.\n\
             Answer: 42\n\
             Related: Cargo - the Rust package manager; Ferris - the Rust mascot"
        );
    }

    #[test]
    fn empty_response_uses_fallback_sentence() {
        let data = json!({"Abstract": "", "Answer": "", "RelatedTopics": []});

        let result = SearchResult::from_response(&data);
        assert!(result.is_empty());
        assert_eq!(
            result.render("obscure thing"),
            "I searched for 'obscure thing' but couldn't find specific information. You might want to try a more specific search term."
        );
    }

    #[test]
    fn related_topics_limited_to_first_three() {
        let data = json!({
            "RelatedTopics": [
                {"Text": "one"},
                {"Text": "two"},
                {"Text": "three"},
                {"Text": "four"},
                {"Text": "five"}
            ]
        });

        let out = SearchResult::from_response(&data).render("q");
        assert_eq!(out, "Related: one; two; three");
    }

    #[test]
    fn topics_without_text_are_skipped_but_count() {
        let data = json!({
            "RelatedTopics": [
                {"Name": "group", "Topics": []},
                {"Text": ""},
                {"Text": "third"},
                {"Text": "fourth"}
            ]
        });

        let result = SearchResult::from_response(&data);
        assert_eq!(result.related, vec!["third".to_string()]);
    }

    #[test]
    fn missing_fields_are_empty() {
        let result = SearchResult::from_response(&json!({}));
        assert_eq!(result, SearchResult::default());
    }

    #[test]
    fn non_string_fields_are_ignored() {
        let result = SearchResult::from_response(&json!({
            "Abstract": "",
            "Answer": 0,
            "RelatedTopics": [{"Text": 42}, {"Text": null}]
        }));
        assert!(result.is_empty());
        assert!(result.render("zero").starts_with("I searched for 'zero'"));
    }

    #[test]
    fn error_prefixes() {
        assert_eq!(
            SearchError::Network("timed out".into()).render(),
            "Error performing web search: timed out"
        );
        assert!(SearchError::Decode("bad json".into())
            .render()
            .starts_with("Unexpected error during web search: "));
    }
}
