use crate::storage::Store;
use crate::tools::{ToolDefinition, ToolResult, ToolUse};

/// A group of tools registered once at startup.
///
/// Modules are stateless; anything they keep lives in the store's data directory.
pub trait Module: Send + Sync {
    /// Unique identifier (e.g., "files", "conlang")
    fn id(&self) -> &'static str;
    /// Tool definitions provided by this module
    fn tool_definitions(&self) -> Vec<ToolDefinition>;
    /// Execute a tool. Returns None if this module doesn't own the tool.
    fn execute_tool(&self, tool: &ToolUse, store: &Store) -> Option<ToolResult>;
}
