mod tools;

use l2_base::modules::Module;
use l2_base::storage::Store;
use l2_base::tools::{ParamType, ToolDefinition, ToolParam, ToolResult, ToolUse};

pub struct FilesModule;

impl Module for FilesModule {
    fn id(&self) -> &'static str {
        "files"
    }

    fn tool_definitions(&self) -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                id: "add_file".to_string(),
                description: "Create or overwrite a stored document (grammar notes, vocabulary lists, \
                              orthography tables and other language resources)."
                    .to_string(),
                params: vec![
                    ToolParam::new("path", ParamType::String)
                        .desc("Relative name of the document inside the data directory")
                        .required(),
                    ToolParam::new("content", ParamType::String).desc("Complete document contents").required(),
                ],
            },
            ToolDefinition {
                id: "read_file".to_string(),
                description: "Read a stored document previously written with add_file.".to_string(),
                params: vec![
                    ToolParam::new("path", ParamType::String)
                        .desc("Relative name of the document inside the data directory")
                        .required(),
                ],
            },
        ]
    }

    fn execute_tool(&self, tool: &ToolUse, store: &Store) -> Option<ToolResult> {
        match tool.name.as_str() {
            "add_file" => Some(self::tools::write::execute(tool, store)),
            "read_file" => Some(self::tools::read::execute(tool, store)),
            _ => None,
        }
    }
}
