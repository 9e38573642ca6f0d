//! Minimal MCP endpoint over stdio, used as a test double by integration tests.
//!
//! One JSON-RPC request per input line, at most one response per output line.

pub mod api;
pub mod cli;
pub mod core;
pub mod infra;
pub mod tools;

pub use api::mcp::Dispatcher;
pub use infra::runtime::stdio::{serve, serve_stdio, ServeStats};
