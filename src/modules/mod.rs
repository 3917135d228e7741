//! Tool registry over the module crates.

use l2_base::modules::Module;
use l2_base::storage::Store;
use l2_base::tools::{ToolDefinition, ToolResult, ToolUse};

use l2_mod_conlang::ConlangModule;
use l2_mod_files::FilesModule;

pub fn all_modules() -> Vec<Box<dyn Module>> {
    vec![Box::new(ConlangModule), Box::new(FilesModule)]
}

/// Tools registered once at startup, executed against the data store.
pub struct ToolRegistry {
    modules: Vec<Box<dyn Module>>,
    store: Store,
}

impl ToolRegistry {
    pub fn new(store: Store) -> Self {
        Self { modules: all_modules(), store }
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.modules.iter().flat_map(|m| m.tool_definitions()).collect()
    }

    /// Dispatch a tool call to the module that owns it.
    pub fn execute(&self, tool: &ToolUse) -> ToolResult {
        for module in &self.modules {
            if let Some(result) = module.execute_tool(tool, &self.store) {
                tracing::info!(tool = %tool.name, module = module.id(), success = result.success, "tool executed");
                return result;
            }
        }
        tracing::warn!(tool = %tool.name, "model requested an unknown tool");
        ToolResult::fail(tool, format!("Unknown tool: {}", tool.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn tool_ids_are_unique() {
        let dir = TempDir::new().unwrap();
        let registry = ToolRegistry::new(Store::new(dir.path()));
        let mut ids: Vec<String> = registry.definitions().into_iter().map(|d| d.id).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(total, 6);
    }

    #[test]
    fn dispatches_to_owning_module() {
        let dir = TempDir::new().unwrap();
        let registry = ToolRegistry::new(Store::new(dir.path()));

        let add = ToolUse {
            id: "c1".into(),
            name: "add_file".into(),
            input: json!({"path": "notes.md", "content": "SOV word order"}),
        };
        assert!(registry.execute(&add).success);

        let read = ToolUse { id: "c2".into(), name: "read_file".into(), input: json!({"path": "notes.md"}) };
        let result = registry.execute(&read);
        assert_eq!(result.payload["content"], json!("SOV word order"));
        assert_eq!(result.tool_use_id, "c2");
    }

    #[test]
    fn unknown_tool_fails() {
        let dir = TempDir::new().unwrap();
        let registry = ToolRegistry::new(Store::new(dir.path()));
        let tool = ToolUse { id: "c3".into(), name: "summon_dragon".into(), input: json!({}) };
        let result = registry.execute(&tool);
        assert!(!result.success);
        assert_eq!(result.message, "Unknown tool: summon_dragon");
    }
}
