use l2_base::storage::Store;
use l2_base::tools::{ToolResult, ToolUse};

pub fn execute(tool: &ToolUse, store: &Store) -> ToolResult {
    let path = tool.str_arg("path").unwrap_or("");
    if path.is_empty() {
        return ToolResult::fail(tool, "file path cannot be empty");
    }

    let content = tool.str_arg("content").unwrap_or("");
    if content.is_empty() {
        return ToolResult::fail(tool, "content cannot be empty");
    }

    match store.write_named(path, content.as_bytes()) {
        Ok(()) => {
            tracing::debug!(path, bytes = content.len(), "stored document");
            ToolResult::ok(tool, format!("Successfully wrote file: {}", path))
        }
        Err(e) => ToolResult::fail(tool, format!("Failed to write file '{}': {}", path, e)),
    }
}
