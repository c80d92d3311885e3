//! Model inference against an OpenAI-compatible chat completions endpoint.
//!
//! Ollama serves this API at `/v1/chat/completions`, including function
//! calling, so a local model can drive the tools directly.

use crate::tools::ToolDefinition;
use crate::types::*;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Inference client for the model server.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

// -- OpenAI-compatible request/response types --------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<MessagePayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ToolPayload<'a>>>,
    max_tokens: u32,
    temperature: f64,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct MessagePayload {
    role: &'static str,
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ToolCallPayload>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct ToolPayload<'a> {
    r#type: &'a str,
    function: FunctionPayload<'a>,
}

#[derive(Debug, Serialize)]
struct FunctionPayload<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ToolCallPayload {
    #[serde(default)]
    id: Option<String>,
    #[serde(default = "function_type")]
    r#type: String,
    function: FunctionCallPayload,
}

fn function_type() -> String {
    "function".into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FunctionCallPayload {
    name: String,
    /// A JSON-encoded string per the OpenAI format; some servers send an object.
    #[serde(default)]
    arguments: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<UsagePayload>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ToolCallPayload>,
}

#[derive(Debug, Deserialize)]
struct UsagePayload {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

impl InferenceClient {
    /// Create a new inference client. An empty `api_key` sends no auth header.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Run inference with tool support. Returns a response with optional tool calls.
    pub async fn chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
        max_tokens: u32,
        temperature: f64,
    ) -> Result<InferenceResponse> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let msg_payloads: Vec<MessagePayload> = messages.iter().map(message_payload).collect();

        let tool_payloads: Option<Vec<ToolPayload>> = if tools.is_empty() {
            None
        } else {
            Some(
                tools
                    .iter()
                    .map(|t| ToolPayload {
                        r#type: "function",
                        function: FunctionPayload {
                            name: &t.name,
                            description: &t.description,
                            parameters: &t.parameters,
                        },
                    })
                    .collect(),
            )
        };

        let request = ChatRequest {
            model,
            messages: msg_payloads,
            tools: tool_payloads,
            max_tokens,
            temperature,
            stream: false,
        };

        debug!(
            "Inference request to model {} ({} messages, {} tools)",
            model,
            messages.len(),
            tools.len()
        );

        let mut req = self.http.post(&url).json(&request);
        if !self.api_key.is_empty() {
            req = req.bearer_auth(&self.api_key);
        }
        let resp = req.send().await.context("Inference request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("Inference failed ({}): {}", status, body);
        }

        let body: ChatResponse = resp
            .json()
            .await
            .context("Failed to parse inference response")?;

        Ok(body.into_inference())
    }
}

impl ChatResponse {
    fn into_inference(self) -> InferenceResponse {
        let choice = self.choices.into_iter().next().unwrap_or(Choice {
            message: ResponseMessage {
                content: None,
                tool_calls: Vec::new(),
            },
        });

        let tool_calls: Vec<ToolCall> = choice
            .message
            .tool_calls
            .into_iter()
            .map(|tc| ToolCall {
                id: tc
                    .id
                    .filter(|id| !id.is_empty())
                    .unwrap_or_else(|| format!("call_{}", ulid::Ulid::new())),
                name: tc.function.name,
                arguments: decode_arguments(tc.function.arguments),
            })
            .collect();

        let usage = self
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        InferenceResponse {
            content: choice.message.content.filter(|c| !c.trim().is_empty()),
            tool_calls,
            usage,
        }
    }
}

fn message_payload(m: &ChatMessage) -> MessagePayload {
    let tool_calls = if m.tool_calls.is_empty() {
        None
    } else {
        Some(
            m.tool_calls
                .iter()
                .map(|tc| ToolCallPayload {
                    id: Some(tc.id.clone()),
                    r#type: function_type(),
                    function: FunctionCallPayload {
                        name: tc.name.clone(),
                        arguments: serde_json::Value::String(tc.arguments.to_string()),
                    },
                })
                .collect(),
        )
    };

    MessagePayload {
        role: m.role.as_str(),
        content: Some(m.content.clone()),
        tool_calls,
        tool_call_id: m.tool_call_id.clone(),
    }
}

/// Arguments as a JSON object. Unparseable strings become `{}`.
fn decode_arguments(raw: serde_json::Value) -> serde_json::Value {
    match raw {
        serde_json::Value::String(s) if s.trim().is_empty() => serde_json::json!({}),
        serde_json::Value::String(s) => {
            serde_json::from_str(&s).unwrap_or_else(|_| serde_json::json!({}))
        }
        serde_json::Value::Null => serde_json::json!({}),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_string_and_object_arguments() {
        assert_eq!(decode_arguments(json!("{\"a\": 1}")), json!({"a": 1}));
        assert_eq!(decode_arguments(json!({"a": 1})), json!({"a": 1}));
        assert_eq!(decode_arguments(json!("not json")), json!({}));
        assert_eq!(decode_arguments(json!("")), json!({}));
        assert_eq!(decode_arguments(serde_json::Value::Null), json!({}));
    }

    #[test]
    fn assistant_tool_calls_are_re_encoded() {
        let msg = ChatMessage::assistant(
            "",
            vec![ToolCall {
                id: "call_1".into(),
                name: "add_numbers".into(),
                arguments: json!({"a": 1, "b": 2}),
            }],
        );

        let payload = serde_json::to_value(message_payload(&msg)).unwrap();
        assert_eq!(payload["role"], "assistant");
        assert_eq!(payload["tool_calls"][0]["id"], "call_1");
        assert_eq!(payload["tool_calls"][0]["type"], "function");
        assert_eq!(
            payload["tool_calls"][0]["function"]["arguments"],
            "{\"a\":1,\"b\":2}"
        );
        assert!(payload.get("tool_call_id").is_none());
    }

    #[test]
    fn tool_message_carries_call_id() {
        let payload =
            serde_json::to_value(message_payload(&ChatMessage::tool("call_9", "42"))).unwrap();
        assert_eq!(payload["role"], "tool");
        assert_eq!(payload["tool_call_id"], "call_9");
        assert_eq!(payload["content"], "42");
        assert!(payload.get("tool_calls").is_none());
    }

    #[test]
    fn response_keeps_usage_and_fills_call_ids() {
        let body: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {
                "content": "  ",
                "tool_calls": [{"function": {
                    "name": "get_weather",
                    "arguments": "{\"city\":\"Paris\"}"
                }}]
            }}],
            "usage": {"prompt_tokens": 120, "completion_tokens": 20, "total_tokens": 140}
        }))
        .unwrap();

        let resp = body.into_inference();
        assert_eq!(resp.content, None);
        assert_eq!(resp.usage.prompt_tokens, 120);
        assert_eq!(resp.usage.completion_tokens, 20);
        assert_eq!(resp.usage.total_tokens, 140);
        assert!(resp.tool_calls[0].id.starts_with("call_"));
        assert_eq!(resp.tool_calls[0].arguments, json!({"city": "Paris"}));
    }

    #[test]
    fn missing_usage_defaults_to_zero() {
        let body: ChatResponse =
            serde_json::from_value(json!({"choices": [{"message": {"content": "hi"}}]})).unwrap();
        let resp = body.into_inference();
        assert_eq!(resp.content.as_deref(), Some("hi"));
        assert_eq!(resp.usage.total_tokens, 0);
    }
}
