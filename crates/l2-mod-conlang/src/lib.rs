mod tools;

pub use tools::lexicon::{LEXICON_BLOB, LexiconEntry};

use l2_base::modules::Module;
use l2_base::storage::Store;
use l2_base::tools::{ParamType, ToolDefinition, ToolParam, ToolResult, ToolUse};

pub struct ConlangModule;

impl Module for ConlangModule {
    fn id(&self) -> &'static str {
        "conlang"
    }

    fn tool_definitions(&self) -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                id: "get_lexicon".to_string(),
                description: "Retrieve every entry of the stored conlang lexicon.".to_string(),
                params: vec![],
            },
            ToolDefinition {
                id: "add_lexicon_entry".to_string(),
                description: "Add a word to the conlang lexicon with its definition, part of speech and etymology."
                    .to_string(),
                params: vec![
                    ToolParam::new("word", ParamType::String).desc("The word in the conlang").required(),
                    ToolParam::new("definition", ParamType::String).desc("Meaning of the word").required(),
                    ToolParam::new("part_of_speech", ParamType::String).desc("Noun, verb, particle, ..."),
                    ToolParam::new("etymology", ParamType::String).desc("Origin or derivation of the word"),
                ],
            },
            ToolDefinition {
                id: "analyze_phonology".to_string(),
                description: "Extract phonemes, bracketed allophones and syllables from a text in IPA-like notation."
                    .to_string(),
                params: vec![ToolParam::new("text", ParamType::String).desc("Text to analyze").required()],
            },
            ToolDefinition {
                id: "validate_grammar".to_string(),
                description: "Check a sentence against basic grammar rules and return errors and suggestions."
                    .to_string(),
                params: vec![
                    ToolParam::new("text", ParamType::String).desc("Sentence to validate").required(),
                    ToolParam::new("grammar_file", ParamType::String)
                        .desc("Stored document with grammar rules to load first"),
                ],
            },
        ]
    }

    fn execute_tool(&self, tool: &ToolUse, store: &Store) -> Option<ToolResult> {
        match tool.name.as_str() {
            "get_lexicon" => Some(self::tools::lexicon::execute_get(tool, store)),
            "add_lexicon_entry" => Some(self::tools::lexicon::execute_add(tool, store)),
            "analyze_phonology" => Some(self::tools::phonology::execute(tool)),
            "validate_grammar" => Some(self::tools::grammar::execute(tool, store)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_definition_is_dispatchable() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = Store::new(dir.path());
        let module = ConlangModule;
        for def in module.tool_definitions() {
            let tool = ToolUse { id: "t".into(), name: def.id.clone(), input: serde_json::json!({}) };
            assert!(module.execute_tool(&tool, &store).is_some(), "{} not dispatched", def.id);
        }
    }
}
