//! Shared MCP protocol surface: JSON-RPC envelopes and the `initialize` payload.

use serde::{Deserialize, Serialize};
use serde_json::Value as J;

use crate::core::error::FixtureError;

// --- JSON-RPC structures ---

/// A request decoded from one input line.
///
/// Built from an already-parsed JSON value rather than through `Deserialize`
/// so that loosely-typed fields (a numeric `method`, a `null` id) are accepted
/// the way a lenient peer would send them.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcReq {
    /// `None` when the id is absent or explicitly `null`.
    pub id: Option<J>,
    pub method: String,
    pub params: J,
}

impl RpcReq {
    pub fn from_value(value: J) -> Result<Self, FixtureError> {
        let J::Object(mut obj) = value else {
            return Err(FixtureError::Internal(
                "request must be a JSON object".into(),
            ));
        };
        let id = obj.remove("id").filter(|v| !v.is_null());
        let method = match obj.remove("method") {
            None => String::new(),
            Some(J::String(s)) => s,
            Some(other) => other.to_string(),
        };
        let params = obj.remove("params").unwrap_or_else(|| J::Object(Default::default()));
        Ok(Self { id, method, params })
    }

    /// The id to echo in an error envelope.
    pub fn id_or_null(&self) -> J {
        self.id.clone().unwrap_or(J::Null)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcResp {
    pub jsonrpc: String,
    pub id: J,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<J>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErr>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcErr {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<J>,
}

pub const JSONRPC_VERSION: &str = "2.0";

pub fn ok(id: J, result: J) -> RpcResp {
    RpcResp { jsonrpc: JSONRPC_VERSION.into(), id, result: Some(result), error: None }
}

pub fn err(id: J, code: i32, msg: impl Into<String>, data: Option<J>) -> RpcResp {
    RpcResp {
        jsonrpc: JSONRPC_VERSION.into(),
        id,
        result: None,
        error: Some(RpcErr { code, message: msg.into(), data }),
    }
}

/// Error envelope for a [`FixtureError`], carrying its code and wire message.
pub fn from_fixture_error(id: J, e: &FixtureError) -> RpcResp {
    err(id, e.code(), e.to_string(), None)
}

// --- Initialize result ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ServerCapabilities {
    pub tools: ToolsCapability,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    pub list_changed: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}
