//! OpenRouter adapter.
//!
//! OpenRouter speaks the OpenAI chat-completions dialect, so message and SSE
//! handling is delegated to `openai_compat`. Tool calls requested by the
//! model are executed here, between streaming rounds, against the registry.

use std::io::{BufRead, BufReader};
use std::sync::Arc;

use reqwest::blocking::{Client, Response};
use secrecy::{ExposeSecret, SecretBox};
use serde::Serialize;

use l2_base::config::PROMPTS;
use l2_base::state::Turn;

use super::error::LlmError;
use super::openai_compat::{self, ChatResponse, OaiMessage, OaiTool, ToolCallAccumulator};
use super::{Backend, Fragment};
use crate::infra::constants::{CONNECT_TIMEOUT, MAX_TOOL_ROUNDS, SUMMARY_TIMEOUT};
use crate::modules::ToolRegistry;

pub struct OpenRouterClient {
    api_key: SecretBox<String>,
    model: String,
    endpoint: String,
    http: Client,
    tools: Arc<ToolRegistry>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [OaiMessage],
    #[serde(skip_serializing_if = "no_tools")]
    tools: &'a [OaiTool],
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
    stream: bool,
}

fn no_tools(tools: &&[OaiTool]) -> bool {
    tools.is_empty()
}

impl<'a> ChatRequest<'a> {
    fn new(model: &'a str, messages: &'a [OaiMessage], tools: &'a [OaiTool], stream: bool) -> Self {
        let tool_choice = if tools.is_empty() { None } else { Some("auto") };
        Self { model, messages, tools, tool_choice, stream }
    }
}

impl OpenRouterClient {
    pub fn new(
        api_key: SecretBox<String>,
        model: impl Into<String>,
        base_url: &str,
        tools: Arc<ToolRegistry>,
    ) -> Result<Self, LlmError> {
        let http = Client::builder().connect_timeout(CONNECT_TIMEOUT).build()?;
        Ok(Self {
            api_key,
            model: model.into(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            http,
            tools,
        })
    }

    fn post(&self, body: &ChatRequest<'_>) -> reqwest::blocking::RequestBuilder {
        self.http
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key.expose_secret()))
            .header("Content-Type", "application/json")
            .header("X-Title", "L2")
            .json(body)
    }

    /// One streaming request. Emits text as it arrives and returns the tool
    /// calls the model asked for, in index order.
    fn stream_round(
        &self,
        messages: &[OaiMessage],
        tools: &[OaiTool],
        emit: &mut dyn FnMut(Fragment),
    ) -> Result<Vec<l2_base::tools::ToolUse>, LlmError> {
        let response = check_status(self.post(&ChatRequest::new(&self.model, messages, tools, true)).send()?)?;
        read_sse(BufReader::new(response), emit)
    }
}

fn check_status(response: Response) -> Result<Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(status_error(status.as_u16(), body))
}

fn status_error(status: u16, body: String) -> LlmError {
    match status {
        401 | 403 => LlmError::Auth(body),
        _ => LlmError::Api { status, body },
    }
}

/// Consume an SSE body until `[DONE]` or EOF.
fn read_sse(reader: impl BufRead, emit: &mut dyn FnMut(Fragment)) -> Result<Vec<l2_base::tools::ToolUse>, LlmError> {
    let mut acc = ToolCallAccumulator::new();
    for line in reader.lines() {
        let line = line.map_err(|e| LlmError::StreamRead(e.to_string()))?;
        if openai_compat::is_done_line(&line) {
            break;
        }
        let Some(chunk) = openai_compat::parse_sse_line(&line) else {
            continue;
        };
        if let Some(err) = chunk.error {
            return Err(LlmError::Backend(err.message));
        }
        for choice in chunk.choices {
            let Some(delta) = choice.delta else { continue };
            if let Some(content) = delta.content
                && !content.is_empty()
            {
                emit(Fragment::Text(content));
            }
            for call in delta.tool_calls.iter().flatten() {
                acc.feed(call);
            }
        }
    }
    Ok(acc.drain())
}

impl Backend for OpenRouterClient {
    fn model(&self) -> &str {
        &self.model
    }

    fn invoke(&self, messages: &[Turn]) -> Result<Turn, LlmError> {
        let oai = openai_compat::to_oai_messages(messages);
        let response = self.post(&ChatRequest::new(&self.model, &oai, &[], false)).timeout(SUMMARY_TIMEOUT).send()?;
        let parsed: ChatResponse = check_status(response)?.json().map_err(|e| LlmError::Parse(e.to_string()))?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LlmError::Parse("response has no choices".into()))?;
        Ok(Turn::assistant(content))
    }

    fn stream(&self, messages: &[Turn], emit: &mut dyn FnMut(Fragment)) -> Result<(), LlmError> {
        let tools = openai_compat::tools_to_oai(&self.tools.definitions());
        let mut oai = Vec::with_capacity(messages.len() + 1);
        if !tools.is_empty() {
            oai.push(OaiMessage::text("system", PROMPTS.tool_guidelines.trim()));
        }
        oai.extend(openai_compat::to_oai_messages(messages));

        for round in 0..MAX_TOOL_ROUNDS {
            let calls = self.stream_round(&oai, &tools, emit)?;
            if calls.is_empty() {
                return Ok(());
            }
            tracing::debug!(round, calls = calls.len(), "model requested tools");

            oai.push(OaiMessage::assistant_tool_calls(&calls));
            for call in &calls {
                emit(Fragment::ToolCall { name: call.name.clone(), arguments: call.input.clone() });
                let result = self.tools.execute(call);
                oai.push(OaiMessage::tool_result(&result));
            }
        }

        tracing::warn!(max = MAX_TOOL_ROUNDS, "tool round limit reached; ending response");
        Ok(())
    }
}
