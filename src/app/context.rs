//! Context condensation: turns an unbounded history into the bounded message
//! list sent with each request. Stateless, recomputed every turn, never
//! mutates history.

use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use l2_base::config::PROMPTS;
use l2_base::state::{Role, Turn};

use crate::infra::constants::{CONTEXT_PREFIX, FALLBACK_TURNS, REQUEST_PREFIX, SUMMARIZE_THRESHOLD, VERBATIM_CAP};
use crate::llms::{Backend, LlmError, TOOL_CALL_MARKER};

/// Build the outbound list: every system turn from history in order, one
/// synthetic context message, then the raw input wrapped as the request.
pub fn build_outbound(history: &[Turn], request: &str, backend: &Arc<dyn Backend>, timeout: Duration) -> Vec<Turn> {
    let mut out: Vec<Turn> = history.iter().filter(|t| t.is_system()).cloned().collect();
    out.push(condense(history, backend, timeout));
    out.push(Turn::user(format!("{}{}", REQUEST_PREFIX, request)));
    out
}

/// The synthetic system-role context message for `history`.
///
/// Short dialogues are carried verbatim. Longer ones are summarized by the
/// backend, all but the most recent turn; if that fails the last few of
/// those turns are carried verbatim instead.
pub fn condense(history: &[Turn], backend: &Arc<dyn Backend>, timeout: Duration) -> Turn {
    let dialogue: Vec<&Turn> = history.iter().filter(|t| t.is_dialogue()).collect();

    let body = if dialogue.len() > SUMMARIZE_THRESHOLD {
        let older = &dialogue[..dialogue.len() - 1];
        match summarize(older, backend, timeout) {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(error = %e, turns = older.len(), "context summary failed, using recent turns verbatim");
                format_transcript(&older[older.len().saturating_sub(FALLBACK_TURNS)..])
            }
        }
    } else {
        format_transcript(&dialogue)
    };

    Turn::system(format!("{}{}", CONTEXT_PREFIX, body))
}

/// Role-labeled transcript of at most the last `VERBATIM_CAP` turns.
pub fn format_transcript(turns: &[&Turn]) -> String {
    if turns.is_empty() {
        return "No previous conversation".to_string();
    }
    let recent = &turns[turns.len().saturating_sub(VERBATIM_CAP)..];

    let mut out = String::from("Previous conversation includes:\n\n");
    for turn in recent {
        let label = match turn.role {
            Role::User => "User",
            Role::Assistant => "Assistant",
            Role::System => "System",
        };
        out.push_str(&format!("**{}:** {}\n\n", label, bracket_tool_markers(&turn.content)));
    }
    out
}

/// Wrap each inline `[Tool Call: name]` annotation in bold markers.
pub fn bracket_tool_markers(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(start) = rest.find(TOOL_CALL_MARKER) {
        let Some(len) = rest[start..].find(']') else { break };
        let end = start + len + 1;
        out.push_str(&rest[..start]);
        out.push_str("**");
        out.push_str(&rest[start..end]);
        out.push_str("**");
        rest = &rest[end..];
    }
    out.push_str(rest);
    out
}

/// Ask the backend for a summary, giving up after `timeout`.
fn summarize(turns: &[&Turn], backend: &Arc<dyn Backend>, timeout: Duration) -> Result<String, LlmError> {
    let mut messages = Vec::with_capacity(turns.len() + 1);
    messages.push(Turn::system(PROMPTS.summary_prompt.clone()));
    messages.extend(turns.iter().map(|t| (*t).clone()));

    let (tx, rx) = mpsc::channel();
    let backend = Arc::clone(backend);
    thread::spawn(move || {
        let _ = tx.send(backend.invoke(&messages));
    });

    let reply = match rx.recv_timeout(timeout) {
        Ok(result) => result?,
        Err(RecvTimeoutError::Timeout) => {
            return Err(LlmError::Timeout(format!("summary not ready after {}s", timeout.as_secs_f32())));
        }
        Err(RecvTimeoutError::Disconnected) => return Err(LlmError::Backend("summary worker exited".into())),
    };

    if reply.content.trim().is_empty() {
        return Err(LlmError::Parse("empty summary".into()));
    }
    Ok(reply.content)
}
