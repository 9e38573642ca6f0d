use std::sync::Arc;

use crate::core::content::CallToolResult;
use crate::core::error::FixtureError;
use crate::core::tool::{Tool, ToolDescriptor};
use crate::tools::echo::EchoTool;
use crate::tools::fail::FailTool;

/// Fixed, ordered tool catalog. `tools/list` reports tools in this order.
#[derive(Clone)]
pub struct ToolRegistry {
    tools: Arc<[Arc<dyn Tool>]>,
}

impl ToolRegistry {
    /// The built-in catalog: `echo`, then `fail`.
    pub fn builtin() -> Self {
        Self::with_tools(vec![Arc::new(EchoTool) as Arc<dyn Tool>, Arc::new(FailTool) as Arc<dyn Tool>])
    }

    pub fn with_tools(tools: Vec<Arc<dyn Tool>>) -> Self {
        Self { tools: tools.into() }
    }

    pub fn list(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|t| t.descriptor()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub async fn call(
        &self,
        name: &str,
        args: &serde_json::Value,
    ) -> Result<CallToolResult, FixtureError> {
        let tool = self
            .get(name)
            .ok_or_else(|| FixtureError::ToolNotFound(name.to_owned()))?;
        tracing::debug!(tool = name, "calling tool");
        Ok(tool.call(args).await?)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
