//! Language-model backend abstraction.
//!
//! The session engine only ever sees the `Backend` capability set: a one-shot
//! `invoke` used for summarization and a `stream` that pushes fragments into a
//! caller-supplied sink. Tool execution is the adapter's business.

pub mod error;
pub mod mock;
pub mod openai_compat;
pub mod openrouter;

use serde_json::Value;

use l2_base::state::{ToolCallRecord, Turn};

pub use error::LlmError;

/// One incremental unit of a streaming response.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// Text chunk from the response
    Text(String),
    /// The backend's tool layer invoked a tool
    ToolCall { name: String, arguments: Value },
}

impl Fragment {
    /// Text appended to the visible response for this fragment.
    pub fn visible_text(&self) -> String {
        match self {
            Fragment::Text(text) => text.clone(),
            Fragment::ToolCall { name, .. } => format!("\n{}\n", tool_call_marker(name)),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Fragment::Text(_))
    }

    pub fn tool_call(&self) -> Option<ToolCallRecord> {
        match self {
            Fragment::ToolCall { name, arguments } => {
                Some(ToolCallRecord { name: name.clone(), arguments: arguments.clone() })
            }
            Fragment::Text(_) => None,
        }
    }
}

/// Opening text of an inline tool-call annotation.
pub const TOOL_CALL_MARKER: &str = "[Tool Call:";

pub fn tool_call_marker(name: &str) -> String {
    format!("{} {}]", TOOL_CALL_MARKER, name)
}

/// A remote model reachable through a synchronous and a streaming call.
pub trait Backend: Send + Sync {
    /// Model identifier shown in the status bar.
    fn model(&self) -> &str;

    /// Single-shot completion.
    fn invoke(&self, messages: &[Turn]) -> Result<Turn, LlmError>;

    /// Stream a completion, calling `emit` for every fragment in order.
    ///
    /// Returns once the backend signals end of stream. An error after some
    /// fragments were emitted ends the stream early; those fragments stand.
    fn stream(&self, messages: &[Turn], emit: &mut dyn FnMut(Fragment)) -> Result<(), LlmError>;
}
