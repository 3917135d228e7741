//! Scripted offline backend.
//!
//! Selected at runtime with `L2_PROVIDER=mock`, where it echoes the request
//! back word by word, and used by the session tests to script fragments,
//! failures and summaries.

use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use serde_json::Value;

use l2_base::state::{Role, Turn};

use super::{Backend, Fragment, LlmError};
use crate::infra::constants::REQUEST_PREFIX;

const MOCK_MODEL: &str = "mock/echo";

pub struct MockBackend {
    script: Vec<Fragment>,
    echo: bool,
    fragment_delay: Duration,
    summary: Result<String, String>,
    summary_delay: Duration,
    start_error: Option<String>,
    fail_after: Option<(usize, String)>,
    stream_requests: Mutex<Vec<Vec<Turn>>>,
    invoke_requests: Mutex<Vec<Vec<Turn>>>,
}

impl MockBackend {
    /// Stream exactly `script` on every call.
    pub fn new(script: Vec<Fragment>) -> Self {
        Self {
            script,
            echo: false,
            fragment_delay: Duration::ZERO,
            summary: Ok("Summary of the earlier conversation.".to_string()),
            summary_delay: Duration::ZERO,
            start_error: None,
            fail_after: None,
            stream_requests: Mutex::new(Vec::new()),
            invoke_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn from_text(chunks: &[&str]) -> Self {
        Self::new(chunks.iter().map(|c| Fragment::Text(c.to_string())).collect())
    }

    /// Echo the latest request back, one word per fragment.
    pub fn echo() -> Self {
        Self { echo: true, fragment_delay: Duration::from_millis(40), ..Self::new(Vec::new()) }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.fragment_delay = delay;
        self
    }

    pub fn with_summary(mut self, summary: Result<&str, &str>) -> Self {
        self.summary = summary.map(str::to_string).map_err(str::to_string);
        self
    }

    pub fn with_summary_delay(mut self, delay: Duration) -> Self {
        self.summary_delay = delay;
        self
    }

    /// Fail before the first fragment.
    pub fn failing_start(mut self, message: &str) -> Self {
        self.start_error = Some(message.to_string());
        self
    }

    /// Deliver `count` fragments, then fail.
    pub fn failing_after(mut self, count: usize, message: &str) -> Self {
        self.fail_after = Some((count, message.to_string()));
        self
    }

    /// Message lists passed to `stream`, oldest first.
    pub fn stream_requests(&self) -> Vec<Vec<Turn>> {
        self.stream_requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Message lists passed to `invoke`, oldest first.
    pub fn invoke_requests(&self) -> Vec<Vec<Turn>> {
        self.invoke_requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn echo_fragments(messages: &[Turn]) -> Vec<Fragment> {
        let request = messages
            .iter()
            .rev()
            .find(|t| t.role == Role::User)
            .map(|t| t.content.strip_prefix(REQUEST_PREFIX).unwrap_or(&t.content))
            .unwrap_or("");
        let reply = format!("You said: {}\n\n(offline mock backend; set OPENROUTER to talk to a real model)", request);
        reply.split_inclusive(' ').map(|w| Fragment::Text(w.to_string())).collect()
    }
}

fn record(log: &Mutex<Vec<Vec<Turn>>>, messages: &[Turn]) {
    if let Ok(mut log) = log.lock() {
        log.push(messages.to_vec());
    }
}

impl Backend for MockBackend {
    fn model(&self) -> &str {
        MOCK_MODEL
    }

    fn invoke(&self, messages: &[Turn]) -> Result<Turn, LlmError> {
        record(&self.invoke_requests, messages);
        if !self.summary_delay.is_zero() {
            thread::sleep(self.summary_delay);
        }
        self.summary.clone().map(Turn::assistant).map_err(LlmError::Backend)
    }

    fn stream(&self, messages: &[Turn], emit: &mut dyn FnMut(Fragment)) -> Result<(), LlmError> {
        record(&self.stream_requests, messages);
        if let Some(ref message) = self.start_error {
            return Err(LlmError::Network(message.clone()));
        }

        let fragments = if self.echo { Self::echo_fragments(messages) } else { self.script.clone() };
        for (idx, fragment) in fragments.into_iter().enumerate() {
            if let Some((count, ref message)) = self.fail_after
                && idx == count
            {
                return Err(LlmError::StreamRead(message.clone()));
            }
            if !self.fragment_delay.is_zero() {
                thread::sleep(self.fragment_delay);
            }
            emit(fragment);
        }
        Ok(())
    }
}

/// Convenience for scripting a tool-call marker.
pub fn tool_call(name: &str, arguments: Value) -> Fragment {
    Fragment::ToolCall { name: name.to_string(), arguments }
}
