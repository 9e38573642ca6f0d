use serde_json::{json, Value as J};

use crate::core::error::FixtureError;
use crate::core::mcp::{from_fixture_error, ok as rpc_ok, RpcReq, RpcResp};
use crate::infra::config::Config;
use crate::tools::registry::ToolRegistry;

/// The closed set of methods this endpoint understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Initialize,
    Initialized,
    ToolsList,
    ToolsCall,
    Unknown(String),
}

impl Method {
    pub fn parse(name: &str) -> Self {
        match name {
            "initialize" => Method::Initialize,
            "notifications/initialized" => Method::Initialized,
            "tools/list" => Method::ToolsList,
            "tools/call" => Method::ToolsCall,
            other => Method::Unknown(other.to_owned()),
        }
    }
}

/// Turns request lines into (optional) response envelopes.
#[derive(Clone, Default)]
pub struct Dispatcher {
    config: Config,
    registry: ToolRegistry,
}

impl Dispatcher {
    pub fn new(config: Config, registry: ToolRegistry) -> Self {
        Self { config, registry }
    }

    /// Raw line as read from the transport, before UTF-8 decoding.
    pub async fn handle_raw(&self, bytes: &[u8]) -> Option<RpcResp> {
        match std::str::from_utf8(bytes) {
            Ok(line) => self.handle_line(line).await,
            Err(e) => Some(parse_failure(FixtureError::Parse(format!("invalid UTF-8: {e}")))),
        }
    }

    /// A parse failure is always answered with `id: null`; blank lines and
    /// non-object values produce nothing. Blank lines are separators, not
    /// requests, so they never count as a parse failure.
    pub async fn handle_line(&self, line: &str) -> Option<RpcResp> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let value: J = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => return Some(parse_failure(FixtureError::Parse(e.to_string()))),
        };
        match RpcReq::from_value(value) {
            Ok(req) => self.handle_request(req).await,
            Err(e) => {
                tracing::warn!(error = %e, "dropping request with no recoverable id");
                None
            }
        }
    }

    pub async fn handle_request(&self, req: RpcReq) -> Option<RpcResp> {
        tracing::debug!(method = %req.method, id = ?req.id, "request");
        let resp = match self.dispatch(&req.method, &req.params).await {
            Ok(Some(result)) => match req.id {
                Some(id) => Some(rpc_ok(id, result)),
                None => {
                    tracing::debug!(method = %req.method, "no id, result suppressed");
                    None
                }
            },
            Ok(None) => None,
            Err(e) if e.needs_id() && req.id.is_none() => {
                tracing::warn!(method = %req.method, error = %e, "internal error without id");
                None
            }
            Err(e) => {
                tracing::warn!(method = %req.method, code = e.code(), error = %e, "error response");
                Some(from_fixture_error(req.id_or_null(), &e))
            }
        };
        tracing::trace!(response = ?resp, "request handled");
        resp
    }

    /// Route one method. `Ok(None)` marks a notification.
    pub async fn dispatch(&self, method: &str, params: &J) -> Result<Option<J>, FixtureError> {
        match Method::parse(method) {
            Method::Initialize => Ok(Some(serde_json::to_value(self.config.initialize_result())?)),
            Method::Initialized => Ok(None),
            Method::ToolsList => Ok(Some(json!({ "tools": self.registry.list() }))),
            Method::ToolsCall => self.call_tool(params).await.map(Some),
            Method::Unknown(m) => Err(FixtureError::MethodNotFound(m)),
        }
    }

    async fn call_tool(&self, params: &J) -> Result<J, FixtureError> {
        let J::Object(params) = params else {
            return Err(FixtureError::Internal("Invalid params: expected an object".into()));
        };
        let name = match params.get("name") {
            None => String::new(),
            Some(J::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        let empty = J::Object(Default::default());
        let args = params.get("arguments").unwrap_or(&empty);
        let out = self.registry.call(&name, args).await?;
        Ok(serde_json::to_value(out)?)
    }
}

fn parse_failure(e: FixtureError) -> RpcResp {
    tracing::warn!(error = %e, "unparseable line");
    from_fixture_error(J::Null, &e)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn line(input: &str) -> Option<J> {
        Dispatcher::default()
            .handle_line(input)
            .await
            .map(|r| serde_json::to_value(r).unwrap())
    }

    #[test]
    fn method_parse_is_exact() {
        assert_eq!(Method::parse("tools/list"), Method::ToolsList);
        assert_eq!(Method::parse("tools.list"), Method::Unknown("tools.list".into()));
        assert_eq!(Method::parse("Initialize"), Method::Unknown("Initialize".into()));
    }

    #[tokio::test]
    async fn initialize_returns_identity() {
        let v = line(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#).await.unwrap();
        assert_eq!(v["id"], 1);
        assert_eq!(v["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(v["result"]["capabilities"]["tools"]["listChanged"], false);
        assert_eq!(v["result"]["serverInfo"]["name"], "echo-test");
        assert_eq!(v["result"]["serverInfo"]["version"], "1.0.0");
    }

    #[tokio::test]
    async fn initialized_notification_is_silent_even_with_id() {
        assert!(line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#).await.is_none());
        assert!(line(r#"{"jsonrpc":"2.0","id":9,"method":"notifications/initialized"}"#).await.is_none());
    }

    #[tokio::test]
    async fn tools_list_returns_both_tools() {
        let v = line(r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#).await.unwrap();
        let tools = v["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["name"], "echo");
        assert_eq!(tools[0]["description"], "Echo back input arguments");
        assert_eq!(tools[1]["name"], "fail");
        assert_eq!(tools[1]["inputSchema"], json!({"type": "object"}));
    }

    #[tokio::test]
    async fn echo_call_round_trips_arguments() {
        let v = line(
            r#"{"jsonrpc":"2.0","id":"a","method":"tools/call","params":{"name":"echo","arguments":{"message":"hello","n":[1,2]}}}"#,
        )
        .await
        .unwrap();
        assert_eq!(v["id"], "a");
        assert_eq!(v["result"]["isError"], false);
        assert_eq!(v["result"]["content"][0]["type"], "text");
        let text = v["result"]["content"][0]["text"].as_str().unwrap();
        let echoed: J = serde_json::from_str(text).unwrap();
        assert_eq!(echoed, json!({"message": "hello", "n": [1, 2]}));
    }

    #[tokio::test]
    async fn echo_call_defaults_arguments_to_empty_object() {
        let v = line(r#"{"id":2,"method":"tools/call","params":{"name":"echo"}}"#).await.unwrap();
        assert_eq!(v["result"]["content"][0]["text"], "{}");
    }

    #[tokio::test]
    async fn fail_call_is_a_successful_response() {
        let v = line(r#"{"id":3,"method":"tools/call","params":{"name":"fail","arguments":{}}}"#)
            .await
            .unwrap();
        assert!(v.get("error").is_none());
        assert_eq!(v["result"]["isError"], true);
        assert_eq!(v["result"]["content"][0]["text"], "Intentional failure");
    }

    #[tokio::test]
    async fn unknown_tool_is_method_not_found() {
        let v = line(r#"{"id":4,"method":"tools/call","params":{"name":"nope"}}"#).await.unwrap();
        assert!(v.get("result").is_none());
        assert_eq!(v["error"]["code"], -32601);
        assert_eq!(v["error"]["message"], "Tool not found: nope");
    }

    #[tokio::test]
    async fn missing_tool_name_is_reported_as_empty() {
        let v = line(r#"{"id":4,"method":"tools/call","params":{}}"#).await.unwrap();
        assert_eq!(v["error"]["message"], "Tool not found: ");
    }

    #[tokio::test]
    async fn unknown_method_is_method_not_found() {
        let v = line(r#"{"jsonrpc":"2.0","id":5,"method":"resources/list"}"#).await.unwrap();
        assert_eq!(v["id"], 5);
        assert_eq!(v["error"]["code"], -32601);
        assert_eq!(v["error"]["message"], "Method not found: resources/list");
    }

    #[tokio::test]
    async fn protocol_errors_are_sent_without_id() {
        let v = line(r#"{"method":"bogus"}"#).await.unwrap();
        assert_eq!(v["id"], J::Null);
        assert_eq!(v["error"]["message"], "Method not found: bogus");

        let v = line(r#"{"method":"tools/call","params":{"name":"x"}}"#).await.unwrap();
        assert_eq!(v["id"], J::Null);
        assert_eq!(v["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn results_without_id_are_suppressed() {
        assert!(line(r#"{"method":"tools/list"}"#).await.is_none());
        assert!(line(r#"{"id":null,"method":"initialize"}"#).await.is_none());
        assert!(line(r#"{"method":"tools/call","params":{"name":"fail"}}"#).await.is_none());
    }

    #[tokio::test]
    async fn parse_error_uses_null_id() {
        let v = line("{ not-json }").await.unwrap();
        assert_eq!(v["id"], J::Null);
        assert_eq!(v["error"]["code"], -32700);
        assert!(v["error"]["message"].as_str().unwrap().starts_with("Parse error: "));
    }

    #[tokio::test]
    async fn big_ids_and_echo_arguments_are_reproduced_verbatim() {
        let input = r#"{"jsonrpc":"2.0","id":123456789012345678901234567890,"method":"tools/call","params":{"name":"echo","arguments":{"n":123456789012345678901234567890,"b":1,"a":2}}}"#;
        let resp = Dispatcher::default().handle_line(input).await.unwrap();
        let out = serde_json::to_string(&resp).unwrap();
        assert_eq!(
            out,
            r#"{"jsonrpc":"2.0","id":123456789012345678901234567890,"result":{"content":[{"type":"text","text":"{\"n\":123456789012345678901234567890,\"b\":1,\"a\":2}"}],"isError":false}}"#
        );
    }

    #[tokio::test]
    async fn nesting_beyond_depth_limit_is_a_parse_error() {
        let deep = format!("{}{}", "[".repeat(200), "]".repeat(200));
        let v = line(&deep).await.unwrap();
        assert_eq!(v["id"], J::Null);
        assert_eq!(v["error"]["code"], -32700);
        assert!(v["error"]["message"].as_str().unwrap().contains("recursion limit"));

        // a shallower document on the same dispatcher is still answered
        let v = line(r#"{"id":1,"method":"tools/call","params":{"name":"echo","arguments":{"a":[[[1]]]}}}"#)
            .await
            .unwrap();
        assert_eq!(v["result"]["content"][0]["text"], r#"{"a":[[[1]]]}"#);
    }

    #[tokio::test]
    async fn invalid_utf8_is_a_parse_error() {
        let resp = Dispatcher::default().handle_raw(b"{\"id\":1,\xff}").await.unwrap();
        assert_eq!(resp.id, J::Null);
        assert_eq!(resp.error.unwrap().code, -32700);
    }

    #[tokio::test]
    async fn blank_and_non_object_lines_are_silent() {
        assert!(line("   ").await.is_none());
        assert!(line("[1,2,3]").await.is_none());
        assert!(line("42").await.is_none());
    }

    #[tokio::test]
    async fn non_object_params_are_internal_errors() {
        let v = line(r#"{"id":7,"method":"tools/call","params":[1]}"#).await.unwrap();
        assert_eq!(v["id"], 7);
        assert_eq!(v["error"]["code"], -32603);
        assert_eq!(v["error"]["message"], "Invalid params: expected an object");

        assert!(line(r#"{"method":"tools/call","params":null}"#).await.is_none());
    }

    #[tokio::test]
    async fn dispatch_marks_notifications_with_none() {
        let d = Dispatcher::default();
        assert_eq!(d.dispatch("notifications/initialized", &json!({})).await, Ok(None));
        assert!(d.dispatch("tools/list", &json!({})).await.unwrap().is_some());
    }
}
