//! Tool System
//!
//! Tools are registered once at startup, then the registry is shared
//! immutably with the conversation loop. A tool advertises a [`ToolSchema`]
//! to the model and evaluates [`ToolCall`]s whose arguments have already
//! passed structural validation against that schema.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{AgentError, Result};

/// Tool call request from the LLM
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolCall {
    /// Invocation identifier assigned by the model
    pub id: String,

    /// Tool identifier
    pub name: String,

    /// Arguments as key-value pairs
    pub arguments: Map<String, Value>,
}

impl ToolCall {
    /// Build a call from a `tool_use` block's input, which must be an object
    pub fn new(id: impl Into<String>, name: impl Into<String>, input: &Value) -> Result<Self> {
        let name = name.into();
        let Value::Object(arguments) = input else {
            return Err(AgentError::ToolValidation(format!(
                "{name}: arguments must be an object, got {input}"
            )));
        };

        Ok(Self {
            id: id.into(),
            name,
            arguments: arguments.clone(),
        })
    }

    /// Deserialize the arguments into a typed parameter struct
    pub fn parse_arguments<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.arguments.clone()))
            .map_err(|e| AgentError::ToolValidation(format!("{}: {e}", self.name)))
    }
}

/// Result from tool execution
///
/// `output` goes back to the model as the tool result. `follow_up` is extra
/// text from the human that is appended to the same turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    pub output: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<String>,
}

impl ToolResult {
    pub fn output(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            follow_up: None,
        }
    }

    #[must_use]
    pub fn with_follow_up(mut self, text: impl Into<String>) -> Self {
        self.follow_up = Some(text.into());
        self
    }
}

/// Parameter definition for tool schema
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// Parameter name
    pub name: String,

    /// JSON Schema type (string, number, boolean, object, array)
    #[serde(rename = "type")]
    pub param_type: String,

    /// Human-readable description
    pub description: String,

    /// Whether this parameter is required
    #[serde(default)]
    pub required: bool,
}

impl ParameterSchema {
    /// A required string parameter
    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: "string".into(),
            description: description.into(),
            required: true,
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self.param_type.as_str() {
            "string" => value.is_string(),
            "number" => value.is_number(),
            "integer" => value.is_i64() || value.is_u64(),
            "boolean" => value.is_boolean(),
            "object" => value.is_object(),
            "array" => value.is_array(),
            _ => true,
        }
    }
}

/// Tool definition schema (for LLM function calling)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Unique tool identifier
    pub name: String,

    /// Human-readable description (shown to LLM)
    pub description: String,

    /// Parameter definitions
    pub parameters: Vec<ParameterSchema>,
}

impl ToolSchema {
    /// JSON Schema object describing the tool input
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|p| {
                (
                    p.name.clone(),
                    json!({ "type": p.param_type, "description": p.description }),
                )
            })
            .collect();

        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// Tool trait - implement to add new capabilities
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool's schema for LLM function calling
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with validated arguments
    async fn execute(&self, call: &ToolCall) -> Result<ToolResult>;

    /// Check arguments against the schema before execution
    fn validate(&self, call: &ToolCall) -> Result<()> {
        let schema = self.schema();

        for param in &schema.parameters {
            match call.arguments.get(&param.name) {
                None if param.required => {
                    return Err(AgentError::ToolValidation(format!(
                        "{}: missing required parameter: {}",
                        schema.name, param.name
                    )));
                }
                Some(value) if !param.accepts(value) => {
                    return Err(AgentError::ToolValidation(format!(
                        "{}: parameter {} must be of type {}",
                        schema.name, param.name, param.param_type
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }
}

/// Name-keyed tool table
///
/// Registration order is preserved so the model always sees the tools in
/// the same order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new tool, replacing any tool with the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.register_boxed(Arc::new(tool));
    }

    /// Register a shared tool
    pub fn register_boxed(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.schema().name;
        if let Some(&slot) = self.index.get(&name) {
            self.tools[slot] = tool;
        } else {
            self.index.insert(name, self.tools.len());
            self.tools.push(tool);
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&i| Arc::clone(&self.tools[i]))
    }

    /// Execute a tool call
    ///
    /// Unknown tools and invalid arguments are errors; anything the tool
    /// itself tolerates comes back inside the [`ToolResult`].
    pub async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
        let tool = self
            .get(&call.name)
            .ok_or_else(|| AgentError::ToolNotFound(call.name.clone()))?;

        tool.validate(call)?;

        tool.execute(call).await
    }

    /// Get all tool schemas in registration order
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(|t| t.schema()).collect()
    }

    /// Get tool names in registration order
    pub fn names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.schema().name).collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "echo".into(),
                description: "Echo the text back".into(),
                parameters: vec![ParameterSchema::string("text", "Text to echo")],
            }
        }

        async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
            #[derive(Deserialize)]
            struct Params {
                text: String,
            }
            let params: Params = call.parse_arguments()?;
            Ok(ToolResult::output(params.text))
        }
    }

    fn call(input: Value) -> ToolCall {
        ToolCall::new("toolu_1", "echo", &input).unwrap()
    }

    #[test]
    fn test_input_schema() {
        let schema = EchoTool.schema().input_schema();
        assert_eq!(
            schema,
            json!({
                "type": "object",
                "properties": {"text": {"type": "string", "description": "Text to echo"}},
                "required": ["text"]
            })
        );
    }

    #[test]
    fn test_non_object_input_rejected() {
        let err = ToolCall::new("toolu_1", "echo", &json!("hi")).unwrap_err();
        assert!(matches!(err, AgentError::ToolValidation(_)));
    }

    #[tokio::test]
    async fn test_tool_registry() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        assert_eq!(registry.len(), 1);
        assert!(registry.get("echo").is_some());
        assert!(registry.get("unknown").is_none());

        let result = registry.execute(&call(json!({"text": "hi"}))).await.unwrap();
        assert_eq!(result, ToolResult::output("hi"));
    }

    #[tokio::test]
    async fn test_validation_errors_are_fatal() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        let missing = registry.execute(&call(json!({}))).await.unwrap_err();
        assert!(matches!(missing, AgentError::ToolValidation(_)));

        let wrong_type = registry.execute(&call(json!({"text": 5}))).await.unwrap_err();
        assert!(matches!(wrong_type, AgentError::ToolValidation(_)));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let registry = ToolRegistry::new();
        let call = ToolCall::new("toolu_2", "rm_rf", &json!({})).unwrap();
        let err = registry.execute(&call).await.unwrap_err();
        assert!(matches!(err, AgentError::ToolNotFound(name) if name == "rm_rf"));
    }

    #[test]
    fn test_register_replaces_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);
        registry.register(EchoTool);
        assert_eq!(registry.names(), vec!["echo".to_string()]);
    }
}
