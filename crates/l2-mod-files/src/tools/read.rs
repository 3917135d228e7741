use serde_json::json;

use l2_base::storage::Store;
use l2_base::tools::{ToolResult, ToolUse};

pub fn execute(tool: &ToolUse, store: &Store) -> ToolResult {
    let path = tool.str_arg("path").unwrap_or("");
    if path.is_empty() {
        return ToolResult::fail(tool, "file path cannot be empty");
    }

    match store.read_named(path) {
        Ok(bytes) => ToolResult::ok(tool, format!("Successfully read file: {}", path))
            .with("content", json!(String::from_utf8_lossy(&bytes))),
        Err(e) if e.is_not_found() => ToolResult::fail(tool, format!("File not found: {}", path)),
        Err(e) => ToolResult::fail(tool, format!("Failed to read file '{}': {}", path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tool(path: &str) -> ToolUse {
        ToolUse { id: "T2".to_string(), name: "read_file".to_string(), input: json!({ "path": path }) }
    }

    #[test]
    fn returns_content_payload() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path());
        store.write_named("script.md", "ka ta na".as_bytes()).unwrap();

        let result = execute(&tool("script.md"), &store);

        assert!(result.success);
        assert_eq!(result.payload["content"], json!("ka ta na"));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path());

        let result = execute(&tool("nope.md"), &store);

        assert!(!result.success);
        assert_eq!(result.message, "File not found: nope.md");
    }
}
