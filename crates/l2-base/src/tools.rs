//! Tool call contract shared by the backend adapter and the tool modules.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// A tool invocation requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolUse {
    pub id: String,
    pub name: String,
    pub input: Value,
}

impl ToolUse {
    /// Fetch a string argument, treating absent and non-string values alike.
    pub fn str_arg(&self, key: &str) -> Option<&str> {
        self.input.get(key).and_then(Value::as_str)
    }
}

/// Outcome of a tool call: `(success, message, payload)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_use_id: String,
    #[serde(default)]
    pub tool_name: String,
    pub success: bool,
    pub message: String,
    /// Extra fields merged into the JSON handed back to the model.
    #[serde(default)]
    pub payload: Map<String, Value>,
}

impl ToolResult {
    pub fn ok(tool: &ToolUse, message: impl Into<String>) -> Self {
        Self {
            tool_use_id: tool.id.clone(),
            tool_name: tool.name.clone(),
            success: true,
            message: message.into(),
            payload: Map::new(),
        }
    }

    pub fn fail(tool: &ToolUse, message: impl Into<String>) -> Self {
        Self { success: false, ..Self::ok(tool, message) }
    }

    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.payload.insert(key.to_string(), value);
        self
    }

    /// JSON body sent back to the model as the tool message content.
    pub fn to_content(&self) -> String {
        let mut body = Map::new();
        body.insert("success".to_string(), json!(self.success));
        body.insert("message".to_string(), json!(self.message));
        for (k, v) in &self.payload {
            body.insert(k.clone(), v.clone());
        }
        Value::Object(body).to_string()
    }
}

/// Parameter type for tool inputs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    String,
    Array(Box<ParamType>),
}

impl ParamType {
    fn to_json_schema(&self) -> Value {
        match self {
            ParamType::String => json!({"type": "string"}),
            ParamType::Array(inner) => json!({"type": "array", "items": inner.to_json_schema()}),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParam {
    pub name: String,
    pub param_type: ParamType,
    pub description: Option<String>,
    pub required: bool,
}

impl ToolParam {
    pub fn new(name: &str, param_type: ParamType) -> Self {
        Self { name: name.to_string(), param_type, description: None, required: false }
    }

    pub fn desc(mut self, d: &str) -> Self {
        self.description = Some(d.to_string());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A tool definition with its schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool identifier the model calls (e.g., "get_lexicon")
    pub id: String,
    /// Full description for the model
    pub description: String,
    pub params: Vec<ToolParam>,
}

impl ToolDefinition {
    /// Build JSON Schema for the API
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &self.params {
            let mut schema = param.param_type.to_json_schema();
            if let Some(desc) = &param.description {
                schema["description"] = json!(desc);
            }
            properties.insert(param.name.clone(), schema);
            if param.required {
                required.push(param.name.clone());
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required
        })
    }
}
