use std::time::Instant;

use l2_base::state::{TokenCounter, ToolCallRecord, Turn, UsageStats};

use crate::infra::constants::MAX_HISTORY_DISPLAY;
use crate::llms::Fragment;
use crate::ui::throttle::RenderThrottle;
use crate::ui::transcript::build_content;

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Streaming,
    Exiting,
}

/// Runtime state of one session
pub struct State {
    /// Append-only conversation log
    pub history: Vec<Turn>,
    pub phase: Phase,
    /// Response text accumulated for the active stream
    pub pending_response: String,
    /// `pending_response` length in chars, tracked incrementally
    pub pending_chars: usize,
    /// Tool calls observed during the active stream
    pub pending_tool_calls: Vec<ToolCallRecord>,
    /// Shared with the stream worker, which increments it
    pub stats: TokenCounter,
    pub input: String,
    /// Visible content buffer
    pub content: String,
    /// Underlying data changed since `content` was rebuilt
    pub content_stale: bool,
    /// Screen needs a redraw
    pub dirty: bool,
    pub throttle: RenderThrottle,
    pub max_history_display: usize,
    /// Lines scrolled up from the bottom of the conversation
    pub scroll_offset: u16,
    pub model_name: String,
    /// Most recent recoverable problem, shown in the status bar
    pub last_warning: Option<String>,
}

impl State {
    pub fn new(history: Vec<Turn>, stats: UsageStats, model_name: impl Into<String>) -> Self {
        Self {
            history,
            phase: Phase::Idle,
            pending_response: String::new(),
            pending_chars: 0,
            pending_tool_calls: Vec::new(),
            stats: TokenCounter::from(stats),
            input: String::new(),
            content: String::new(),
            content_stale: true,
            dirty: true,
            throttle: RenderThrottle::new(),
            max_history_display: MAX_HISTORY_DISPLAY,
            scroll_offset: 0,
            model_name: model_name.into(),
            last_warning: None,
        }
    }

    pub fn is_streaming(&self) -> bool {
        self.phase == Phase::Streaming
    }

    /// Append the system prompt unless the latest system turn already says the same.
    /// Returns true if a turn was appended.
    pub fn ensure_system_prompt(&mut self, prompt: &str) -> bool {
        let current = self.history.iter().rev().find(|t| t.is_system());
        if current.is_some_and(|t| t.content == prompt) {
            return false;
        }
        self.history.push(Turn::system(prompt));
        true
    }

    /// Record the user's turn and enter `Streaming` with an empty accumulator.
    pub fn begin_turn(&mut self, input: String) {
        self.history.push(Turn::user(input));
        self.pending_response.clear();
        self.pending_chars = 0;
        self.pending_tool_calls.clear();
        self.phase = Phase::Streaming;
        self.scroll_offset = 0;
        self.content_stale = true;
    }

    pub fn push_fragment(&mut self, fragment: &Fragment) {
        let text = fragment.visible_text();
        self.pending_chars += text.chars().count();
        self.pending_response.push_str(&text);
        if let Some(call) = fragment.tool_call() {
            self.pending_tool_calls.push(call);
        }
        self.throttle.adjust(self.pending_chars);
        self.content_stale = true;
    }

    /// Commit the accumulated response as an assistant turn, even if empty.
    pub fn commit_response(&mut self) {
        let turn = Turn::assistant(self.pending_response.clone()).with_tool_calls(self.pending_tool_calls.clone());
        self.history.push(turn);
        self.phase = Phase::Idle;
        self.content_stale = true;
    }

    /// Leave `Streaming` without an assistant turn.
    pub fn abort_turn(&mut self) {
        self.phase = Phase::Idle;
        self.content_stale = true;
    }

    fn rebuild_content(&mut self) {
        let pending = self.is_streaming().then_some(self.pending_response.as_str());
        self.content = build_content(&self.history, pending, self.max_history_display);
        self.content_stale = false;
        self.dirty = true;
    }

    /// Rebuild the content buffer if it is stale and the throttle allows it.
    pub fn refresh_content(&mut self, now: Instant) -> bool {
        if !self.content_stale || !self.throttle.try_flush(now) {
            return false;
        }
        self.rebuild_content();
        true
    }

    /// Rebuild the content buffer regardless of the throttle.
    pub fn force_refresh(&mut self, now: Instant) {
        self.throttle.force(now);
        self.rebuild_content();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn state() -> State {
        State::new(Vec::new(), UsageStats::default(), "mock")
    }

    #[test]
    fn system_prompt_not_duplicated_across_launches() {
        let mut s = state();
        assert!(s.ensure_system_prompt("You are L2."));
        assert!(!s.ensure_system_prompt("You are L2."));
        assert!(s.ensure_system_prompt("You are L2, v2."));
        assert_eq!(s.history.iter().filter(|t| t.is_system()).count(), 2);
    }

    #[test]
    fn fragments_accumulate_with_markers() {
        let mut s = state();
        s.begin_turn("save kala".into());
        s.push_fragment(&Fragment::Text("Saving".into()));
        s.push_fragment(&Fragment::ToolCall { name: "add_lexicon_entry".into(), arguments: json!({"word": "kala"}) });
        s.push_fragment(&Fragment::Text("done".into()));

        assert_eq!(s.pending_response, "Saving\n[Tool Call: add_lexicon_entry]\ndone");
        assert_eq!(s.pending_chars, s.pending_response.chars().count());

        s.commit_response();
        let last = s.history.last().unwrap();
        assert_eq!(last.tool_calls.as_ref().unwrap()[0].arguments, json!({"word": "kala"}));
        assert_eq!(s.phase, Phase::Idle);
    }

    #[test]
    fn refresh_is_throttled_but_force_is_not() {
        let mut s = state();
        let t0 = Instant::now();
        s.begin_turn("hi".into());
        assert!(s.refresh_content(t0));

        s.push_fragment(&Fragment::Text("a".into()));
        assert!(!s.refresh_content(t0 + Duration::from_millis(10)));
        assert!(s.content_stale);

        s.force_refresh(t0 + Duration::from_millis(20));
        assert!(s.content.ends_with("a▌"));
        assert!(!s.refresh_content(t0 + Duration::from_millis(200)), "nothing stale");
    }

    #[test]
    fn idle_content_has_no_streaming_section() {
        let mut s = state();
        s.begin_turn("hi".into());
        s.push_fragment(&Fragment::Text("yo".into()));
        s.commit_response();
        s.force_refresh(Instant::now());
        assert!(!s.content.contains("Streaming Response"));
        assert!(s.content.ends_with("🤖 Assistant: yo\n\n"));
    }
}
