//! Prompt text embedded at compile time.
use std::sync::LazyLock;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PromptsConfig {
    /// Seed content for `system.md` on first run.
    pub system_template: String,
    /// Used when the stored system prompt is blank.
    pub fallback_system: String,
    /// Appended as a leading system message whenever tools are offered to the model.
    pub tool_guidelines: String,
    /// Instruction for condensing long histories.
    pub summary_prompt: String,
}

fn parse_yaml<T: for<'de> Deserialize<'de>>(name: &str, content: &str) -> T {
    serde_yaml::from_str(content).unwrap_or_else(|e| panic!("Failed to parse {}: {}", name, e))
}

pub static PROMPTS: LazyLock<PromptsConfig> =
    LazyLock::new(|| parse_yaml("prompts.yaml", include_str!("../../../yamls/prompts.yaml")));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_prompts_parse() {
        assert!(PROMPTS.system_template.contains("constructed languages"));
        assert!(PROMPTS.tool_guidelines.contains("add_lexicon_entry"));
        assert!(PROMPTS.tool_guidelines.contains("answers \"Yes\" to adding it"));
        assert!(!PROMPTS.summary_prompt.trim().is_empty());
        assert!(!PROMPTS.fallback_system.trim().is_empty());
    }
}
