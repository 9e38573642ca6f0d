use crate::core::mcp::{InitializeResult, ServerCapabilities, ServerInfo};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "echo-test";
pub const SERVER_VERSION: &str = "1.0.0";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub server_name: String,
    pub server_version: String,
    pub protocol_version: String,
    pub log_filter: String, // tracing EnvFilter directive, logs go to stderr
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_name: SERVER_NAME.into(),
            server_version: SERVER_VERSION.into(),
            protocol_version: PROTOCOL_VERSION.into(),
            log_filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}

impl Config {
    /// Only the log filter is read from the environment (`RUST_LOG`); the
    /// identity reported by `initialize` is fixed.
    pub fn from_env() -> Self {
        let log_filter = std::env::var("RUST_LOG")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.into());
        Self { log_filter, ..Self::default() }
    }

    pub fn initialize_result(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: self.protocol_version.clone(),
            capabilities: ServerCapabilities::default(),
            server_info: ServerInfo {
                name: self.server_name.clone(),
                version: self.server_version.clone(),
            },
        }
    }
}
