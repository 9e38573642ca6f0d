use clap::Parser;

use echo_mcp_fixture::cli::Cli;
use echo_mcp_fixture::infra::config::Config;
use echo_mcp_fixture::infra::logging;
use echo_mcp_fixture::tools::registry::ToolRegistry;
use echo_mcp_fixture::{serve_stdio, Dispatcher};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();

    let cfg = Config::from_env();
    logging::init(&cfg.log_filter);
    tracing::info!(
        server = %cfg.server_name,
        version = %cfg.server_version,
        protocol = %cfg.protocol_version,
        "BOOT echo-mcp-fixture"
    );

    let dispatcher = Dispatcher::new(cfg, ToolRegistry::builtin());
    let stats = serve_stdio(&dispatcher).await?;
    tracing::info!(lines = stats.lines, responses = stats.responses, "stdin closed, exiting");
    Ok(())
}
