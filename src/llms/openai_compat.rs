//! OpenAI-compatible chat completions wire format.
//!
//! Message conversion, tool schemas, SSE line parsing and tool-call delta
//! accumulation. Endpoint and auth handling stay with the provider.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use l2_base::state::Turn;
use l2_base::tools::{ToolDefinition, ToolResult, ToolUse};

// ───────────────────────────────────────────────────────────────────
// Request types
// ───────────────────────────────────────────────────────────────────

/// OpenAI-compatible chat message.
#[derive(Debug, Clone, Serialize)]
pub struct OaiMessage {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<OaiToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl OaiMessage {
    pub fn text(role: &str, content: impl Into<String>) -> Self {
        Self { role: role.to_string(), content: Some(content.into()), tool_calls: None, tool_call_id: None }
    }

    /// Assistant message announcing the tool calls of one round.
    pub fn assistant_tool_calls(calls: &[ToolUse]) -> Self {
        let calls = calls
            .iter()
            .map(|tu| OaiToolCall {
                id: tu.id.clone(),
                call_type: "function".to_string(),
                function: OaiFunction {
                    name: tu.name.clone(),
                    arguments: serde_json::to_string(&tu.input).unwrap_or_else(|_| "{}".to_string()),
                },
            })
            .collect();
        Self { role: "assistant".to_string(), content: None, tool_calls: Some(calls), tool_call_id: None }
    }

    pub fn tool_result(result: &ToolResult) -> Self {
        Self {
            role: "tool".to_string(),
            content: Some(result.to_content()),
            tool_calls: None,
            tool_call_id: Some(result.tool_use_id.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OaiToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: String,
    pub function: OaiFunction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OaiFunction {
    pub name: String,
    pub arguments: String,
}

/// OpenAI-compatible tool definition wrapper.
#[derive(Debug, Serialize)]
pub struct OaiTool {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: OaiFunctionDef,
}

#[derive(Debug, Serialize)]
pub struct OaiFunctionDef {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Convert history turns to wire messages. Recorded tool calls are display
/// metadata only and never go back over the wire.
pub fn to_oai_messages(turns: &[Turn]) -> Vec<OaiMessage> {
    turns.iter().map(|t| OaiMessage::text(t.role.as_str(), t.content.clone())).collect()
}

/// Convert internal tool definitions to OpenAI-compatible format.
pub fn tools_to_oai(tools: &[ToolDefinition]) -> Vec<OaiTool> {
    tools
        .iter()
        .map(|t| OaiTool {
            tool_type: "function".to_string(),
            function: OaiFunctionDef {
                name: t.id.clone(),
                description: t.description.clone(),
                parameters: t.to_json_schema(),
            },
        })
        .collect()
}

// ───────────────────────────────────────────────────────────────────
// Non-streaming response
// ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    pub content: Option<String>,
}

// ───────────────────────────────────────────────────────────────────
// SSE stream parsing
// ───────────────────────────────────────────────────────────────────

/// Parsed SSE streaming chunk.
#[derive(Debug, Deserialize)]
pub struct StreamResponse {
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
    /// Some gateways report upstream failures inside the stream.
    pub error: Option<StreamError>,
}

#[derive(Debug, Deserialize)]
pub struct StreamError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct StreamChoice {
    pub delta: Option<StreamDelta>,
}

#[derive(Debug, Deserialize)]
pub struct StreamDelta {
    pub content: Option<String>,
    pub tool_calls: Option<Vec<StreamToolCall>>,
}

#[derive(Debug, Deserialize)]
pub struct StreamToolCall {
    pub index: Option<usize>,
    pub id: Option<String>,
    pub function: Option<StreamFunctionDelta>,
}

#[derive(Debug, Deserialize)]
pub struct StreamFunctionDelta {
    pub name: Option<String>,
    pub arguments: Option<String>,
}

/// True for the `data: [DONE]` terminator.
pub fn is_done_line(line: &str) -> bool {
    line.trim_end() == "data: [DONE]"
}

/// Process a single SSE line, returning the parsed chunk if it carries one.
/// Comments (`: keep-alive`), blank lines and the terminator yield `None`.
pub fn parse_sse_line(line: &str) -> Option<StreamResponse> {
    let json_str = line.strip_prefix("data: ")?.trim_end();
    if json_str == "[DONE]" {
        return None;
    }
    serde_json::from_str(json_str).ok()
}

/// Accumulator for building tool calls from streaming deltas.
#[derive(Default)]
pub struct ToolCallAccumulator {
    calls: BTreeMap<usize, (String, String, String)>,
}

impl ToolCallAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a streaming tool call delta.
    pub fn feed(&mut self, call: &StreamToolCall) {
        let idx = call.index.unwrap_or(0);
        let entry = self.calls.entry(idx).or_default();

        if let Some(ref id) = call.id {
            entry.0 = id.clone();
        }
        if let Some(ref func) = call.function {
            if let Some(ref name) = func.name {
                entry.1 = name.clone();
            }
            if let Some(ref args) = func.arguments {
                entry.2.push_str(args);
            }
        }
    }

    /// Drain completed tool calls in index order.
    pub fn drain(&mut self) -> Vec<ToolUse> {
        std::mem::take(&mut self.calls)
            .into_values()
            .filter_map(|(id, name, arguments)| {
                if name.is_empty() {
                    return None;
                }
                let input: Value = if arguments.trim().is_empty() {
                    Value::Object(serde_json::Map::new())
                } else {
                    serde_json::from_str(&arguments).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
                };
                Some(ToolUse { id, name, input })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_content_delta() {
        let line = r#"data: {"choices":[{"delta":{"content":"Hi"},"finish_reason":null}]}"#;
        let resp = parse_sse_line(line).unwrap();
        assert_eq!(resp.choices[0].delta.as_ref().unwrap().content.as_deref(), Some("Hi"));
    }

    #[test]
    fn skips_comments_and_terminator() {
        assert!(parse_sse_line(": OPENROUTER PROCESSING").is_none());
        assert!(parse_sse_line("").is_none());
        assert!(parse_sse_line("data: [DONE]").is_none());
        assert!(is_done_line("data: [DONE]\r"));
    }

    #[test]
    fn surfaces_in_stream_errors() {
        let line = r#"data: {"error":{"code":502,"message":"upstream overloaded"}}"#;
        let resp = parse_sse_line(line).unwrap();
        assert_eq!(resp.error.unwrap().message, "upstream overloaded");
        assert!(resp.choices.is_empty());
    }

    #[test]
    fn accumulates_split_tool_arguments() {
        let mut acc = ToolCallAccumulator::new();
        let deltas = [
            r#"{"index":1,"id":"call_b","function":{"name":"get_lexicon","arguments":""}}"#,
            r#"{"index":0,"id":"call_a","function":{"name":"add_lexicon_entry","arguments":"{\"word\":"}}"#,
            r#"{"index":0,"function":{"arguments":"\"kala\"}"}}"#,
        ];
        for raw in deltas {
            let call: StreamToolCall = serde_json::from_str(raw).unwrap();
            acc.feed(&call);
        }

        let calls = acc.drain();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].name, "add_lexicon_entry");
        assert_eq!(calls[0].input, json!({"word": "kala"}));
        assert_eq!(calls[1].id, "call_b");
        assert_eq!(calls[1].input, json!({}));
        assert!(acc.drain().is_empty());
    }

    #[test]
    fn turns_map_to_role_and_content() {
        let wire = to_oai_messages(&[Turn::system("s"), Turn::user("REQUEST: hi")]);
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json, json!([{"role": "system", "content": "s"}, {"role": "user", "content": "REQUEST: hi"}]));
    }
}
