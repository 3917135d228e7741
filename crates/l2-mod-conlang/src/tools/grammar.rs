use serde_json::json;

use l2_base::storage::Store;
use l2_base::tools::{ToolResult, ToolUse};

const TERMINATORS: [char; 3] = ['.', '!', '?'];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct GrammarReport {
    pub errors: Vec<String>,
    pub suggestions: Vec<String>,
}

impl GrammarReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn check(text: &str) -> GrammarReport {
    let mut report = GrammarReport::default();
    let text = text.trim();

    if text.split_whitespace().count() < 2 {
        report.errors.push("Text appears to be too short for meaningful grammar validation".to_string());
    }
    if !text.ends_with(TERMINATORS) {
        report.suggestions.push("Consider adding proper sentence termination".to_string());
    }
    report
}

pub fn execute(tool: &ToolUse, store: &Store) -> ToolResult {
    let text = tool.str_arg("text").unwrap_or("");
    if text.trim().is_empty() {
        return ToolResult::fail(tool, "Text is required for grammar validation");
    }

    if let Some(grammar_file) = tool.str_arg("grammar_file").filter(|f| !f.is_empty())
        && let Err(e) = store.read_named(grammar_file)
    {
        return ToolResult::fail(tool, format!("Failed to load grammar rules: {}", e));
    }

    let report = check(text);
    ToolResult::ok(tool, "Grammar validation completed")
        .with("valid", json!(report.is_valid()))
        .with("errors", json!(report.errors))
        .with("suggestions", json!(report.suggestions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tool(input: serde_json::Value) -> ToolUse {
        ToolUse { id: "T".into(), name: "validate_grammar".into(), input }
    }

    #[test]
    fn single_word_is_invalid() {
        let report = check("kala");
        assert!(!report.is_valid());
        assert_eq!(report.suggestions.len(), 1);
    }

    #[test]
    fn terminated_sentence_passes() {
        let report = check("mi kala tumi.");
        assert!(report.is_valid());
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn missing_grammar_file_fails() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path());

        let result = execute(&tool(json!({"text": "mi kala.", "grammar_file": "rules.md"})), &store);

        assert!(!result.success);
        assert!(result.message.starts_with("Failed to load grammar rules"));
    }

    #[test]
    fn loaded_grammar_file_reports_payload() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path());
        store.write_named("rules.md", b"SOV").unwrap();

        let result = execute(&tool(json!({"text": "mi kala", "grammar_file": "rules.md"})), &store);

        assert!(result.success);
        assert_eq!(result.payload["valid"], json!(true));
        assert_eq!(result.payload["suggestions"], json!(["Consider adding proper sentence termination"]));
    }
}
