use std::collections::BTreeSet;

use serde_json::json;

use l2_base::tools::{ToolResult, ToolUse};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct PhonologyReport {
    pub phonemes: Vec<String>,
    pub allophones: Vec<String>,
    pub syllables: Vec<String>,
}

/// Surface-level inventory over the lowercased text: ASCII letters outside
/// brackets are phonemes, `[...]` spans are allophones, whitespace-separated
/// words stand in for syllables.
pub fn analyze(text: &str) -> PhonologyReport {
    let text = text.to_lowercase();
    let mut phonemes = BTreeSet::new();
    let mut allophones = Vec::new();
    let mut bracket: Option<String> = None;

    for c in text.chars() {
        match bracket.take() {
            Some(inner) if c == ']' => {
                let allophone = format!("[{}]", inner);
                if !inner.is_empty() && !allophones.contains(&allophone) {
                    allophones.push(allophone);
                }
            }
            Some(mut inner) => {
                inner.push(c);
                bracket = Some(inner);
            }
            None => match c {
                '[' => bracket = Some(String::new()),
                'a'..='z' => {
                    phonemes.insert(c.to_string());
                }
                _ => {}
            },
        }
    }

    PhonologyReport {
        phonemes: phonemes.into_iter().collect(),
        allophones,
        syllables: text.split_whitespace().map(str::to_string).collect(),
    }
}

pub fn execute(tool: &ToolUse) -> ToolResult {
    let text = tool.str_arg("text").unwrap_or("");
    if text.trim().is_empty() {
        return ToolResult::fail(tool, "Text is required for phonology analysis");
    }

    let report = analyze(text);
    ToolResult::ok(tool, "Phonology analysis completed")
        .with("phonemes", json!(report.phonemes))
        .with("allophones", json!(report.allophones))
        .with("syllables", json!(report.syllables))
}
