//! Plain-text content buffer shown in the conversation panel.

use l2_base::state::{Role, Turn};

pub const USER_LABEL: &str = "👤 User: ";
pub const ASSISTANT_LABEL: &str = "🤖 Assistant: ";
pub const STREAMING_HEADER: &str = "=== Streaming Response ===";
pub const CURSOR: &str = "▌";

/// Rebuild the buffer from the last `max_display` visible turns plus, while
/// streaming, the whole in-progress response. Work is bounded by
/// `max_display`, not by history length.
pub fn build_content(history: &[Turn], pending: Option<&str>, max_display: usize) -> String {
    let mut visible: Vec<&Turn> = history.iter().rev().filter(|t| !t.is_system()).take(max_display + 1).collect();
    let truncated = visible.len() > max_display;
    visible.truncate(max_display);
    visible.reverse();

    let mut out = String::new();
    if truncated {
        out.push_str(&format!("... (showing last {} messages) ...\n\n", max_display));
    }

    for turn in visible {
        let label = match turn.role {
            Role::User => USER_LABEL,
            Role::Assistant => ASSISTANT_LABEL,
            Role::System => continue,
        };
        out.push_str(label);
        out.push_str(&turn.content);
        out.push_str("\n\n");
    }

    if let Some(response) = pending {
        out.push_str(STREAMING_HEADER);
        out.push_str("\n\n");
        out.push_str(response);
        out.push_str(CURSOR);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_turns_and_hides_system() {
        let history = vec![Turn::system("secret"), Turn::user("Hello"), Turn::assistant("Hi there!")];
        let content = build_content(&history, None, 10);
        assert_eq!(content, "👤 User: Hello\n\n🤖 Assistant: Hi there!\n\n");
    }

    #[test]
    fn shows_only_the_last_turns() {
        let history: Vec<Turn> = (0..15).map(|i| Turn::user(format!("msg {:02}", i))).collect();
        let content = build_content(&history, None, 10);
        assert!(content.starts_with("... (showing last 10 messages) ..."));
        assert!(!content.contains("msg 04"));
        assert!(content.contains("msg 05"));
        assert!(content.contains("msg 14"));
    }

    #[test]
    fn exactly_full_window_has_no_header() {
        let history: Vec<Turn> = (0..10).map(|i| Turn::user(format!("m{}", i))).collect();
        assert!(!build_content(&history, None, 10).starts_with("..."));
    }

    #[test]
    fn streaming_section_keeps_full_response() {
        let long = "x".repeat(50_000);
        let content = build_content(&[Turn::user("Hello")], Some(&long), 10);
        assert!(content.ends_with(&format!("{}\n\n{}{}", STREAMING_HEADER, long, CURSOR)));
    }
}
