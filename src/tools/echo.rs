use async_trait::async_trait;
use serde_json::json;

use crate::core::content::{CallToolResult, Content};
use crate::core::error::ToolError;
use crate::core::tool::{Tool, ToolSpec};

/// Returns its arguments serialized as JSON text.
#[derive(Clone, Default)]
pub struct EchoTool;

impl ToolSpec for EchoTool {
    fn name(&self) -> &'static str {
        "echo"
    }
    fn description(&self) -> &'static str {
        "Echo back input arguments"
    }
    fn input_schema(&self) -> serde_json::Value {
        json!({ "type": "object", "properties": { "message": { "type": "string" } } })
    }
}

#[async_trait]
impl Tool for EchoTool {
    async fn call(&self, arguments: &serde_json::Value) -> Result<CallToolResult, ToolError> {
        let text = serde_json::to_string(arguments)?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}
