use async_trait::async_trait;
use serde_json::json;

use crate::core::content::{CallToolResult, Content};
use crate::core::error::ToolError;
use crate::core::tool::{Tool, ToolSpec};

pub const FAILURE_TEXT: &str = "Intentional failure";

/// Always reports a tool-level failure (`isError: true`), never a protocol error.
#[derive(Clone, Default)]
pub struct FailTool;

impl ToolSpec for FailTool {
    fn name(&self) -> &'static str {
        "fail"
    }
    fn description(&self) -> &'static str {
        "Always returns an error"
    }
    fn input_schema(&self) -> serde_json::Value {
        json!({ "type": "object" })
    }
}

#[async_trait]
impl Tool for FailTool {
    async fn call(&self, _arguments: &serde_json::Value) -> Result<CallToolResult, ToolError> {
        Ok(CallToolResult::failure(vec![Content::text(FAILURE_TEXT)]))
    }
}
