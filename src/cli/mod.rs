use clap::Parser;

/// The fixture takes no arguments; the parser exists for `--help` and `--version`.
#[derive(Parser, Debug)]
#[command(name = "echo-mcp-fixture")]
#[command(about = "Minimal MCP echo server over stdio, for integration tests")]
#[command(
    long_about = "Reads one JSON-RPC request per line on stdin and writes one response per line on stdout.\n\
                  Methods: initialize, notifications/initialized, tools/list, tools/call.\n\
                  Tools: echo, fail. Logs go to stderr (RUST_LOG)."
)]
#[command(version)]
pub struct Cli {}
