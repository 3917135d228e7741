use serde::{Deserialize, Serialize};
use serde_json::json;

use l2_base::storage::Store;
use l2_base::tools::{ToolResult, ToolUse};

/// Data blob holding the lexicon as a pretty-printed JSON array.
pub const LEXICON_BLOB: &str = "lexicon.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub word: String,
    pub definition: String,
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub etymology: String,
}

/// Load the lexicon; an absent blob is an empty lexicon.
fn load(store: &Store) -> Result<Vec<LexiconEntry>, String> {
    match store.read_named_json::<Vec<LexiconEntry>>(LEXICON_BLOB) {
        Ok(entries) => Ok(entries),
        Err(e) if e.is_not_found() => Ok(Vec::new()),
        Err(e) => Err(e.to_string()),
    }
}

pub fn execute_get(tool: &ToolUse, store: &Store) -> ToolResult {
    match load(store) {
        Ok(entries) if entries.is_empty() => {
            ToolResult::ok(tool, "No lexicon entries found").with("entries", json!([]))
        }
        Ok(entries) => ToolResult::ok(tool, format!("Retrieved {} lexicon entries", entries.len()))
            .with("entries", json!(entries)),
        Err(e) => ToolResult::fail(tool, format!("Failed to read lexicon: {}", e)),
    }
}

pub fn execute_add(tool: &ToolUse, store: &Store) -> ToolResult {
    let word = tool.str_arg("word").unwrap_or("").trim();
    if word.is_empty() {
        return ToolResult::fail(tool, "Word is required");
    }
    let definition = tool.str_arg("definition").unwrap_or("").trim();
    if definition.is_empty() {
        return ToolResult::fail(tool, "Definition is required");
    }

    let mut entries = match load(store) {
        Ok(entries) => entries,
        Err(e) => return ToolResult::fail(tool, format!("Failed to read lexicon: {}", e)),
    };

    if entries.iter().any(|e| e.word == word) {
        return ToolResult::fail(tool, format!("Word '{}' already exists in lexicon", word));
    }

    let entry = LexiconEntry {
        word: word.to_string(),
        definition: definition.to_string(),
        part_of_speech: tool.str_arg("part_of_speech").unwrap_or("").to_string(),
        etymology: tool.str_arg("etymology").unwrap_or("").to_string(),
    };
    entries.push(entry.clone());

    if let Err(e) = store.write_named_json(LEXICON_BLOB, &entries) {
        return ToolResult::fail(tool, format!("Failed to save lexicon: {}", e));
    }

    tracing::info!(word, total = entries.len(), "lexicon entry added");
    ToolResult::ok(tool, "Lexicon entry added successfully").with("entries", json!([entry]))
}
